//! Multi-component activation scorer (9 components).
//!
//! Components: similarity, recency, frequency, importance, confidence,
//! context affinity, provenance, risk, neighbor boost.

pub mod affinity;
pub mod factors;

use synapse_core::config::{ActivationConfig, ComponentWeights};
use synapse_core::model::{ActivationState, Components, MemoryMetadata, QueryContext};

/// Everything the scorer needs for one candidate.
#[derive(Debug, Clone)]
pub struct ScorerInput<'a> {
    pub state: &'a ActivationState,
    pub metadata: &'a MemoryMetadata,
    /// Raw similarity from the vector backend; untrusted magnitude.
    pub similarity: f64,
    /// Max co-activation weight to another candidate in the current set.
    pub neighbor_weight: Option<f64>,
}

/// Compute all nine component scores for one candidate. Every value is
/// clamped to [0, 1]; out-of-range collaborator input is normalized, not
/// an error.
pub fn compute_components(
    input: &ScorerInput<'_>,
    query: &QueryContext,
    cfg: &ActivationConfig,
) -> Components {
    let state = input.state;
    let meta = input.metadata;

    Components {
        rel: input.similarity.clamp(0.0, 1.0),
        rec: factors::recency(state.age_days(query.now), cfg.recency_half_life_days),
        freq: factors::frequency(state.access_count, cfg.freq_saturation),
        imp: factors::importance(state),
        conf: factors::confidence(state),
        ctx: affinity::context_affinity(meta, query),
        prov: factors::provenance(meta.evidence_count, cfg.prov_saturation),
        risk: factors::risk(state, meta),
        nbr: input.neighbor_weight.map(|w| w.clamp(0.0, 1.0)),
    }
}

/// Combine components into the final activation: a weighted sum normalized
/// by the total weight of present components. `risk` enters as the safety
/// term `(1 − risk)`; `nbr`'s weight leaves the denominator when absent so
/// a candidate without in-set neighbors is not penalized for it.
pub fn combine(components: &Components, weights: &ComponentWeights) -> f64 {
    let c = components;
    let w = weights;

    let mut sum = w.rel * c.rel
        + w.rec * c.rec
        + w.freq * c.freq
        + w.imp * c.imp
        + w.conf * c.conf
        + w.ctx * c.ctx
        + w.prov * c.prov
        + w.risk * (1.0 - c.risk);
    let mut total = w.rel + w.rec + w.freq + w.imp + w.conf + w.ctx + w.prov + w.risk;

    if let Some(nbr) = c.nbr {
        sum += w.nbr * nbr;
        total += w.nbr;
    }

    if total <= f64::EPSILON {
        return 0.0;
    }
    (sum / total).clamp(0.0, 1.0)
}
