use bytes::Bytes;
use std::fmt;

/// A compiled response check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    /// Body contains the value as a contiguous, case-sensitive substring.
    TextContains(String),
    /// Any integer is accepted; codes outside the HTTP range never match.
    StatusCodeEquals(i64),
}

impl Assertion {
    pub fn needs_body(&self) -> bool {
        matches!(self, Assertion::TextContains(_))
    }

    pub fn evaluate(&self, response: &ProbeResponse) -> bool {
        match self {
            Assertion::StatusCodeEquals(expected) => i64::from(response.status) == *expected,
            Assertion::TextContains(needle) => match &response.body {
                Some(body) => contains_bytes(body, needle.as_bytes()),
                None => false,
            },
        }
    }
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assertion::TextContains(value) => write!(f, "text({})", value),
            Assertion::StatusCodeEquals(code) => write!(f, "status_code({})", code),
        }
    }
}

/// What a round observed from the endpoint.
///
/// `body` is `None` when it was not needed or could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: Option<Bytes>,
}

impl ProbeResponse {
    pub fn new(status: u16) -> Self {
        Self { status, body: None }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}
