//! The per-component score functions. Each returns a value in [0, 1].

use synapse_core::model::{ActivationState, MemoryMetadata};

/// Feedback nudge bounds applied to base importance.
const FEEDBACK_NUDGE_CAP: f64 = 0.2;
const POSITIVE_NUDGE: f64 = 0.05;
const NEGATIVE_NUDGE: f64 = 0.10;

/// Multiplier applied to confidence when a memory is contradicted.
/// Contradiction collapses confidence rather than adjusting it.
const CONTRADICTION_PENALTY: f64 = 0.2;

/// Recency: `e^(−age_days / halfLife)`. Strictly decreasing in age,
/// 1.0 at age 0.
pub fn recency(age_days: f64, half_life_days: f64) -> f64 {
    (-age_days.max(0.0) / half_life_days.max(f64::EPSILON)).exp()
}

/// Access frequency: saturating `n / (n + k)`. Diminishing returns,
/// never reaches 1.
pub fn frequency(access_count: u64, saturation: f64) -> f64 {
    let n = access_count as f64;
    n / (n + saturation.max(f64::EPSILON))
}

/// Importance: base importance nudged by explicit feedback. Negative
/// feedback outweighs positive; the nudge is capped before clamping.
pub fn importance(state: &ActivationState) -> f64 {
    let nudge = POSITIVE_NUDGE * f64::from(state.positive_feedback)
        - NEGATIVE_NUDGE * f64::from(state.negative_feedback);
    let nudge = nudge.clamp(-FEEDBACK_NUDGE_CAP, FEEDBACK_NUDGE_CAP);
    (state.base_importance.value() + nudge).clamp(0.0, 1.0)
}

/// Confidence, collapsed toward 0 when the memory is contradicted.
pub fn confidence(state: &ActivationState) -> f64 {
    let base = state.confidence.value();
    if state.contradicted {
        base * CONTRADICTION_PENALTY
    } else {
        base
    }
}

/// Provenance strength: saturating in the number of independent evidence
/// links backing the memory.
pub fn provenance(evidence_count: u32, saturation: f64) -> f64 {
    let n = f64::from(evidence_count);
    n / (n + saturation.max(f64::EPSILON))
}

/// Risk: classification sensitivity, never below the state's intrinsic
/// risk factor. Gate denial overrides this with 1.0 in the ranker.
pub fn risk(state: &ActivationState, metadata: &MemoryMetadata) -> f64 {
    metadata
        .classification
        .sensitivity()
        .max(state.risk_factor.value())
        .clamp(0.0, 1.0)
}
