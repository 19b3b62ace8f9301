//! ExplanationLog: append-only persistence of ranking decisions.
//!
//! The log is a side-effect of ranking, not a dependency: a write failure
//! is retried with backoff and then surfaced as a degraded-mode warning,
//! while the ranking response itself still succeeds.

use std::time::Duration;

use tracing::warn;

use synapse_core::constants::LOG_WRITE_MAX_ATTEMPTS;
use synapse_core::errors::SynapseResult;
use synapse_core::model::{ExplanationFilter, RetrievalExplanation};
use synapse_core::traits::IExplanationStorage;

/// Base backoff between write attempts.
const RETRY_BACKOFF: Duration = Duration::from_millis(50);

pub struct ExplanationLog<'a> {
    storage: &'a dyn IExplanationStorage,
}

impl<'a> ExplanationLog<'a> {
    pub fn new(storage: &'a dyn IExplanationStorage) -> Self {
        Self { storage }
    }

    /// Append one explanation, retrying with backoff. On exhaustion the
    /// failure is logged and returned so the caller can attach a warning
    /// to its (still successful) response.
    pub fn append(&self, explanation: &RetrievalExplanation) -> SynapseResult<()> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.storage.insert_explanation(explanation) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!(
                        explanation_id = %explanation.id,
                        attempt,
                        error = %e,
                        "explanation log write failed"
                    );
                    if attempt >= LOG_WRITE_MAX_ATTEMPTS {
                        return Err(e);
                    }
                    std::thread::sleep(RETRY_BACKOFF * attempt);
                }
            }
        }
    }

    /// Filtered read for audit and debugging.
    pub fn read(&self, filter: &ExplanationFilter) -> SynapseResult<Vec<RetrievalExplanation>> {
        self.storage.read_explanations(filter)
    }
}
