//! Cooperative time budget for maintenance jobs.

use std::time::{Duration, Instant};

/// A wall-clock budget checked between batches. Jobs that run out return a
/// resume cursor instead of finishing the cycle.
#[derive(Debug, Clone)]
pub struct JobBudget {
    deadline: Instant,
}

impl JobBudget {
    pub fn new(duration: Duration) -> Self {
        Self {
            deadline: Instant::now() + duration,
        }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// True once the budget is spent. Checked between batches, never
    /// mid-transaction.
    pub fn expired(&self) -> bool {
        Instant::now() >= self.deadline
    }
}
