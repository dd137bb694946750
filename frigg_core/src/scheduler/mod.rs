//! Per-check concurrent scheduling of healthcheck rounds

pub mod timeline;

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::health::{Healthcheck, Outcome};
pub use timeline::Timeline;

pub struct Scheduler {
    checks: Vec<Arc<Healthcheck>>,
    client: Client,
    reporter: Option<mpsc::UnboundedSender<Outcome>>,
    shutdown: CancellationToken,
}

impl Scheduler {
    pub fn new(checks: Vec<Healthcheck>, client: Client) -> Self {
        Self {
            checks: checks.into_iter().map(Arc::new).collect(),
            client,
            reporter: None,
            shutdown: CancellationToken::new(),
        }
    }

    /// Mirrors every outcome to `reporter` in addition to the log line.
    pub fn with_reporter(mut self, reporter: mpsc::UnboundedSender<Outcome>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn spawn(self) -> RunningScheduler {
        if self.checks.is_empty() {
            warn!("No healthchecks configured");
        }

        let mut timelines = JoinSet::new();

        for check in self.checks {
            let timeline = Timeline::new(
                check,
                self.client.clone(),
                self.reporter.clone(),
                self.shutdown.child_token(),
            );

            timelines.spawn(timeline.run());
        }

        info!("Started {} healthcheck timelines", timelines.len());

        RunningScheduler {
            timelines,
            shutdown: self.shutdown,
        }
    }

    /// Runs until the shutdown token is cancelled.
    pub async fn run(self) {
        self.spawn().wait().await;
    }
}

pub struct RunningScheduler {
    timelines: JoinSet<()>,
    shutdown: CancellationToken,
}

impl RunningScheduler {
    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }

    pub async fn wait(mut self) {
        while let Some(result) = self.timelines.join_next().await {
            if let Err(e) = result {
                error!("Timeline task failed: {}", e);
            }
        }

        self.shutdown.cancelled().await;
    }

    pub async fn shutdown(self) {
        self.shutdown.cancel();
        self.wait().await;
    }
}
