use serde::{Deserialize, Serialize};

use crate::constants;

/// Background-job configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    /// Rows processed per batch before the budget check.
    pub batch_size: usize,
    /// Wall-clock budget for one job run (seconds).
    pub job_time_budget_secs: u64,
    /// Attempts per item before it is skipped and logged.
    pub write_retry_attempts: u32,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            batch_size: constants::DEFAULT_MAINTENANCE_BATCH_SIZE,
            job_time_budget_secs: 300,
            write_retry_attempts: 3,
        }
    }
}
