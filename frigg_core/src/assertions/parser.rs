//! Compiles `function(argument)` strings into [`Assertion`]s.
//!
//! The argument ends at the first `)` after the opening `(`, and anything after
//! it is ignored. `text(a)b)` therefore compiles to `text(a)`.

use super::predicate::Assertion;
use crate::error::{AppError, Result};
use std::str::FromStr;

pub fn compile(raw: &str) -> Result<Assertion> {
    let (function, rest) = raw
        .split_once('(')
        .ok_or_else(|| AppError::MalformedAssertion(raw.to_string()))?;
    let (argument, _) = rest
        .split_once(')')
        .ok_or_else(|| AppError::MalformedAssertion(raw.to_string()))?;

    match function {
        "text" => Ok(Assertion::TextContains(argument.to_string())),
        "status_code" => argument
            .parse::<i64>()
            .map(Assertion::StatusCodeEquals)
            .map_err(|source| AppError::InvalidStatusCode {
                value: argument.to_string(),
                raw: raw.to_string(),
                source,
            }),
        _ => Err(AppError::UnknownAssertion {
            function: function.to_string(),
            raw: raw.to_string(),
        }),
    }
}

impl FromStr for Assertion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        compile(s)
    }
}
