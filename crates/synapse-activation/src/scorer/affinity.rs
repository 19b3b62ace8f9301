//! Context affinity: how well a memory's scope/episode/goal match the
//! query context.

use synapse_core::model::{MemoryMetadata, QueryContext, Scope};

/// Affinity constants.
const SAME: f64 = 1.0;
const QUERY_BROADER: f64 = 0.7;
const QUERY_NARROWER: f64 = 0.3;
const DIFFERENT_ID: f64 = 0.3;
const NEUTRAL: f64 = 0.5;

/// Blend weights for the three affinity axes.
const SCOPE_SHARE: f64 = 0.5;
const EPISODE_SHARE: f64 = 0.3;
const GOAL_SHARE: f64 = 0.2;

/// Scope affinity. Same scope → 1.0. A broader query still matches a
/// narrower memory (0.7); a narrower query reaching for a broader memory
/// matches weakly (0.3).
pub fn scope_affinity(query_scope: Scope, memory_scope: Scope) -> f64 {
    use std::cmp::Ordering;
    match query_scope.breadth().cmp(&memory_scope.breadth()) {
        Ordering::Equal => SAME,
        Ordering::Greater => QUERY_BROADER,
        Ordering::Less => QUERY_NARROWER,
    }
}

/// Episode/goal affinity: same id → 1.0; both present but different →
/// 0.3; either absent → neutral.
pub fn id_affinity(query_id: Option<&str>, memory_id: Option<&str>) -> f64 {
    match (query_id, memory_id) {
        (Some(q), Some(m)) if q == m => SAME,
        (Some(_), Some(_)) => DIFFERENT_ID,
        _ => NEUTRAL,
    }
}

/// The blended `ctx` component.
pub fn context_affinity(metadata: &MemoryMetadata, query: &QueryContext) -> f64 {
    let scope = scope_affinity(query.scope, metadata.scope);
    let episode = id_affinity(query.episode_id.as_deref(), metadata.episode_id.as_deref());
    let goal = id_affinity(query.goal_id.as_deref(), metadata.goal_id.as_deref());

    (SCOPE_SHARE * scope + EPISODE_SHARE * episode + GOAL_SHARE * goal).clamp(0.0, 1.0)
}
