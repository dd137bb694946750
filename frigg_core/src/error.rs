//! Application error types and handling

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid healthcheck '{name}': {reason}")]
    InvalidCheck { name: String, reason: String },

    #[error("Malformed assertion '{0}': expected function(argument)")]
    MalformedAssertion(String),

    #[error("Unknown assertion function '{function}' in '{raw}'")]
    UnknownAssertion { function: String, raw: String },

    #[error("Invalid status code '{value}' in '{raw}'")]
    InvalidStatusCode {
        value: String,
        raw: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid_check(name: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::InvalidCheck {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
