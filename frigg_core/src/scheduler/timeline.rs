use std::sync::Arc;

use reqwest::Client;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::health::{Healthcheck, Outcome};

/// Drives the rounds of a single healthcheck: one immediately, then one per
/// period measured from the timeline's start.
pub struct Timeline {
    check: Arc<Healthcheck>,
    client: Client,
    reporter: Option<mpsc::UnboundedSender<Outcome>>,
    shutdown: CancellationToken,
}

impl Timeline {
    pub fn new(
        check: Arc<Healthcheck>,
        client: Client,
        reporter: Option<mpsc::UnboundedSender<Outcome>>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            check,
            client,
            reporter,
            shutdown,
        }
    }

    pub async fn run(self) {
        let period = self.check.period();
        info!(check = %self.check.name(), "Timeline started with period {:?}", period);

        // Rounds run as independent tasks so a slow endpoint never delays the next tick.
        let mut rounds = JoinSet::new();
        self.spawn_round(&mut rounds);

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    debug!(
                        check = %self.check.name(),
                        in_flight = rounds.len(),
                        "Timeline cancelled"
                    );
                    break;
                }
                _ = ticker.tick() => {
                    self.spawn_round(&mut rounds);
                }
                Some(finished) = rounds.join_next() => {
                    if let Err(e) = finished {
                        error!(check = %self.check.name(), "Round task failed: {}", e);
                    }
                }
            }
        }

        rounds.abort_all();
    }

    fn spawn_round(&self, rounds: &mut JoinSet<()>) {
        let check = self.check.clone();
        let client = self.client.clone();
        let reporter = self.reporter.clone();

        rounds.spawn(async move {
            let outcome = check.execute_round(&client).await;

            if let Some(reporter) = reporter {
                if reporter.send(outcome).is_err() {
                    debug!(check = %check.name(), "Outcome receiver dropped");
                }
            }
        });
    }
}
