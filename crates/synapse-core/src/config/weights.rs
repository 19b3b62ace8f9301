use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Weights for the nine activation components. `risk` weights the safety
/// term `(1 − risk)`; `nbr`'s weight drops out of the normalization when a
/// candidate has no in-set neighbor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentWeights {
    pub rel: f64,
    pub rec: f64,
    pub freq: f64,
    pub imp: f64,
    pub conf: f64,
    pub ctx: f64,
    pub prov: f64,
    pub risk: f64,
    pub nbr: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        // imp carries the largest weight after rel so that importance decides
        // ordering whenever the other components are equal.
        Self {
            rel: 0.25,
            rec: 0.12,
            freq: 0.08,
            imp: 0.20,
            conf: 0.12,
            ctx: 0.10,
            prov: 0.05,
            risk: 0.03,
            nbr: 0.05,
        }
    }
}

/// Scoring configuration: weights, per-tenant overrides, and the curve
/// constants behind the recency/frequency/provenance components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    pub weights: ComponentWeights,
    /// Per-tenant weight overrides, keyed by organization ID.
    pub tenant_weights: HashMap<String, ComponentWeights>,
    /// Half-life of the recency decay (days).
    pub recency_half_life_days: f64,
    /// `k` in the saturating frequency curve `n / (n + k)`.
    pub freq_saturation: f64,
    /// `k` in the saturating provenance curve `n / (n + k)`.
    pub prov_saturation: f64,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            weights: ComponentWeights::default(),
            tenant_weights: HashMap::new(),
            recency_half_life_days: constants::DEFAULT_RECENCY_HALF_LIFE_DAYS,
            freq_saturation: constants::DEFAULT_FREQ_SATURATION,
            prov_saturation: constants::DEFAULT_PROV_SATURATION,
        }
    }
}
