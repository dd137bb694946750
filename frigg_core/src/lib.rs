//! Core library for the frigg healthcheck daemon: configuration, the assertion
//! DSL, healthcheck rounds and their scheduling.

pub mod assertions;
pub mod config;
pub mod error;
pub mod health;
pub mod scheduler;

pub use assertions::{compile, Assertion, ProbeResponse};
pub use config::{
    compile_config, load_config, parse_config, CheckConfig, DaemonSettings, FriggConfig, LogFormat,
};
pub use error::{AppError, Result};
pub use health::{Healthcheck, Outcome};
pub use scheduler::{RunningScheduler, Scheduler};

/// Builds the HTTP client shared by every round.
pub fn build_http_client(settings: &DaemonSettings) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = settings.request_timeout() {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}
