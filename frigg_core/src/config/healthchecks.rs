//! Healthcheck file model and loading

use crate::error::{AppError, Result};
use crate::health::Healthcheck;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FriggConfig {
    #[serde(default)]
    pub healthchecks: Vec<CheckConfig>,
}

/// One entry of the `healthchecks` list, as written in the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckConfig {
    pub name: String,
    /// Seconds between rounds.
    pub interval: u64,
    pub url: String,
    #[serde(rename = "assertions", default)]
    pub raw_assertions: Vec<String>,
}

impl CheckConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_check(&self.url, "name cannot be empty"));
        }

        if self.interval == 0 {
            return Err(AppError::invalid_check(
                &self.name,
                "interval must be greater than 0",
            ));
        }

        let url = Url::parse(&self.url).map_err(|e| {
            AppError::invalid_check(&self.name, format!("invalid url '{}': {}", self.url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::invalid_check(
                &self.name,
                format!("unsupported url scheme '{}'", url.scheme()),
            ));
        }

        Ok(())
    }
}

impl FriggConfig {
    pub fn validate(&self) -> Result<()> {
        self.healthchecks.iter().try_for_each(CheckConfig::validate)
    }
}

pub fn parse_config(raw: &[u8]) -> Result<FriggConfig> {
    let config: FriggConfig = serde_yaml::from_slice(raw)?;
    config.validate()?;
    Ok(config)
}

/// Parses, validates and compiles every check, keeping file order.
pub fn compile_config(raw: &[u8]) -> Result<Vec<Healthcheck>> {
    parse_config(raw)?
        .healthchecks
        .into_iter()
        .map(Healthcheck::from_config)
        .collect()
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Vec<Healthcheck>> {
    let path = path.as_ref();
    debug!("Reading healthcheck configuration from {}", path.display());

    let raw = std::fs::read(path)?;
    compile_config(&raw)
}
