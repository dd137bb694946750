//! Runtime form of a configured healthcheck and its round execution

use crate::assertions::{compile, Assertion, ProbeResponse};
use crate::config::CheckConfig;
use crate::error::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of one round. Not retained after it is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub check_name: String,
    pub passed: bool,
}

impl Outcome {
    pub fn new(check_name: impl Into<String>, passed: bool) -> Self {
        Self {
            check_name: check_name.into(),
            passed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Healthcheck {
    name: String,
    interval: u64,
    url: String,
    assertions: Vec<Assertion>,
}

impl Healthcheck {
    pub fn new(
        name: impl Into<String>,
        interval: u64,
        url: impl Into<String>,
        assertions: Vec<Assertion>,
    ) -> Self {
        Self {
            name: name.into(),
            interval,
            url: url.into(),
            assertions,
        }
    }

    pub fn from_config(config: CheckConfig) -> Result<Self> {
        let assertions = config
            .raw_assertions
            .iter()
            .map(|raw| compile(raw))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(config.name, config.interval, config.url, assertions))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Never shorter than one second; a zero interval is only rejected on the config path.
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.interval.max(1))
    }

    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    pub fn debug_info(&self) -> String {
        format!("{} : {} : {}", self.name, self.interval, self.url)
    }

    pub fn startup_line(&self) -> String {
        format!("{} - {}", self.name, self.interval)
    }

    fn needs_body(&self) -> bool {
        self.assertions.iter().any(Assertion::needs_body)
    }

    /// `None` means the request never produced a response, which always fails.
    /// Otherwise every assertion must hold; an empty list passes.
    pub fn evaluate(&self, response: Option<&ProbeResponse>) -> bool {
        match response {
            Some(response) => self.assertions.iter().all(|a| a.evaluate(response)),
            None => false,
        }
    }

    pub async fn execute_round(&self, client: &Client) -> Outcome {
        let response = self.fetch(client).await;
        let passed = self.evaluate(response.as_ref());

        if passed {
            info!(check = %self.name, "{} pass", self.debug_info());
        } else {
            warn!(check = %self.name, "{} fail", self.debug_info());
        }

        Outcome::new(&self.name, passed)
    }

    async fn fetch(&self, client: &Client) -> Option<ProbeResponse> {
        let response = match client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(check = %self.name, "request for {} failed with: {}", self.url, e);
                return None;
            }
        };

        let mut probe = ProbeResponse::new(response.status().as_u16());
        debug!(check = %self.name, status = probe.status, "received response");

        if self.needs_body() {
            match response.bytes().await {
                Ok(body) => probe.body = Some(body),
                Err(e) => {
                    warn!(check = %self.name, "reading body from {} failed with: {}", self.url, e);
                }
            }
        }

        Some(probe)
    }
}
