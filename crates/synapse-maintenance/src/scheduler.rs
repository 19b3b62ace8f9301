//! Periodic job driver. Each tick runs one job closure; a watch-channel
//! shutdown makes the loop stop between runs, never mid-run.

use std::time::Duration;

use tokio::sync::watch;
use tracing::warn;

use synapse_core::errors::SynapseResult;

pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Run `job` on every tick until `shutdown` flips to true. Job errors
    /// are logged and the loop continues — the next tick gets a fresh run.
    pub async fn run<F>(&self, mut shutdown: watch::Receiver<bool>, mut job: F)
    where
        F: FnMut() -> SynapseResult<()> + Send,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = job() {
                        warn!(error = %e, "scheduled job failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
    }
}
