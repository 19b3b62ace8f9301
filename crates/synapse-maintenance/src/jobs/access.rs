//! Access-count and feedback recording with retry-then-skip semantics:
//! a failing item is logged and skipped, never aborts the batch.

use chrono::{DateTime, Utc};
use tracing::warn;

use synapse_core::errors::SynapseResult;
use synapse_core::model::FeedbackSignal;
use synapse_core::traits::IStateStorage;

/// Outcome of one recording batch.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub recorded: usize,
    pub failed: usize,
}

pub struct AccessRecorder<'a> {
    states: &'a dyn IStateStorage,
    retry_attempts: u32,
}

impl<'a> AccessRecorder<'a> {
    pub fn new(states: &'a dyn IStateStorage, retry_attempts: u32) -> Self {
        Self {
            states,
            retry_attempts: retry_attempts.max(1),
        }
    }

    /// Record one access event.
    pub fn record_access(
        &self,
        org: &str,
        memory_id: &str,
        now: DateTime<Utc>,
    ) -> SynapseResult<()> {
        self.with_retries(memory_id, || self.states.record_access(org, memory_id, now))
    }

    /// Record accesses for a whole retrieval result. Failures are logged
    /// and counted; the batch always completes.
    pub fn record_access_batch(
        &self,
        org: &str,
        memory_ids: &[String],
        now: DateTime<Utc>,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        for memory_id in memory_ids {
            match self.record_access(org, memory_id, now) {
                Ok(()) => report.recorded += 1,
                Err(e) => {
                    warn!(org, memory_id = %memory_id, error = %e, "access record failed, skipping");
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Record an explicit feedback signal.
    pub fn record_feedback(
        &self,
        org: &str,
        memory_id: &str,
        signal: FeedbackSignal,
        now: DateTime<Utc>,
    ) -> SynapseResult<()> {
        self.with_retries(memory_id, || {
            self.states.record_feedback(org, memory_id, signal, now)
        })
    }

    fn with_retries<F>(&self, memory_id: &str, mut op: F) -> SynapseResult<()>
    where
        F: FnMut() -> SynapseResult<()>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match op() {
                Ok(()) => return Ok(()),
                Err(e) => {
                    if attempt >= self.retry_attempts {
                        return Err(e);
                    }
                    warn!(memory_id, attempt, error = %e, "state write failed, retrying");
                }
            }
        }
    }
}
