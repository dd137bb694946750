use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

/// Process-level knobs that are not part of the healthcheck file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonSettings {
    pub log_format: LogFormat,
    pub log_level: String,
    /// 0 leaves the HTTP client without a request timeout.
    pub request_timeout_seconds: u64,
}

impl Default for DaemonSettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Compact,
            log_level: "info".to_string(),
            request_timeout_seconds: 0,
        }
    }
}

impl DaemonSettings {
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(Config::try_from(&DaemonSettings::default())?)
            .add_source(
                Environment::with_prefix("FRIGG")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let settings: DaemonSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Message(
                "Log level cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
