use serde::{Deserialize, Serialize};

use crate::constants;

/// Co-activation graph configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Growth rate λ in `edge_weight = 1 − exp(−λ·count)`.
    pub lambda: f64,
    /// Maximum edges retained per memory after pruning.
    pub top_n: usize,
    /// Repeated co-activation of a pair within this window counts once.
    pub dedup_window_hours: i64,
    /// Edges idle this long are decayed by the nightly refresh (days).
    pub stale_after_days: i64,
    /// Count multiplier applied when a stale edge decays.
    pub decay_factor: f64,
    /// Minimum hours between decay applications to the same edge.
    pub decay_period_hours: i64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            lambda: constants::DEFAULT_EDGE_LAMBDA,
            top_n: constants::DEFAULT_EDGE_TOP_N,
            dedup_window_hours: constants::DEFAULT_DEDUP_WINDOW_HOURS,
            stale_after_days: constants::DEFAULT_STALE_AFTER_DAYS,
            decay_factor: constants::DEFAULT_DECAY_FACTOR,
            decay_period_hours: 20,
        }
    }
}
