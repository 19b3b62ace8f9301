/// Synapse system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Co-activation weight growth rate: `weight = 1 − exp(−λ·count)`.
pub const DEFAULT_EDGE_LAMBDA: f64 = 0.1;

/// Maximum edges retained per memory after pruning.
pub const DEFAULT_EDGE_TOP_N: usize = 10;

/// Window within which repeated co-activation of a pair counts once.
pub const DEFAULT_DEDUP_WINDOW_HOURS: i64 = 24;

/// Recency half-life for the `rec` component (days).
pub const DEFAULT_RECENCY_HALF_LIFE_DAYS: f64 = 30.0;

/// Saturation constant for the `freq` component: `n / (n + k)`.
pub const DEFAULT_FREQ_SATURATION: f64 = 5.0;

/// Saturation constant for the `prov` component: `n / (n + k)`.
pub const DEFAULT_PROV_SATURATION: f64 = 2.0;

/// Edges idle longer than this are decayed by the nightly refresh (days).
pub const DEFAULT_STALE_AFTER_DAYS: i64 = 30;

/// Multiplier applied to `coactivation_count` when a stale edge decays.
pub const DEFAULT_DECAY_FACTOR: f64 = 0.5;

/// Evidence count at which a proposed hypothesis may become active.
pub const CAUSAL_ACTIVATION_EVIDENCE_MIN: usize = 3;

/// Confidence at which a proposed hypothesis may become active.
pub const CAUSAL_ACTIVATION_CONFIDENCE_MIN: f64 = 0.6;

/// Maximum rows processed per maintenance batch.
pub const DEFAULT_MAINTENANCE_BATCH_SIZE: usize = 500;

/// Attempts for explanation-log writes before degrading to a warning.
pub const LOG_WRITE_MAX_ATTEMPTS: u32 = 3;
