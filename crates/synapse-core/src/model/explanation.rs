use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::context::GateDecision;

/// The nine component scores behind one candidate's activation, each in
/// [0, 1]. `nbr` is absent when the memory has no in-set neighbor. No
/// component is ever dropped from the explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Components {
    /// Raw similarity, clamped.
    pub rel: f64,
    /// Recency decay.
    pub rec: f64,
    /// Access frequency, saturating.
    pub freq: f64,
    /// Importance including feedback nudge.
    pub imp: f64,
    /// Confidence, collapsed under contradiction.
    pub conf: f64,
    /// Scope/episode/goal affinity to the query context.
    pub ctx: f64,
    /// Provenance strength from evidence links.
    pub prov: f64,
    /// Classification-derived sensitivity; 1.0 when gating denied.
    pub risk: f64,
    /// Neighbor boost from co-activation edges into the candidate set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbr: Option<f64>,
}

/// One ranked entry of a retrieval explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub memory_id: String,
    pub activation: f64,
    pub components: Components,
    pub gating: GateDecision,
    pub rank: usize,
}

/// Append-only audit record of one ranking decision. Inserted once per
/// non-empty ranking call; never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalExplanation {
    pub id: String,
    pub organization_id: String,
    pub user_id: String,
    pub query_hash: String,
    pub retrieved_at: DateTime<Utc>,
    pub top_k: usize,
    pub results: Vec<RankedResult>,
}

/// Read filter for the explanation log. `organization_id` is mandatory —
/// tenant isolation is enforced, not optional.
#[derive(Debug, Clone)]
pub struct ExplanationFilter {
    pub organization_id: String,
    pub user_id: Option<String>,
    pub query_hash: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: usize,
}

impl ExplanationFilter {
    pub fn for_org(organization_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            user_id: None,
            query_hash: None,
            from: None,
            to: None,
            limit: 100,
        }
    }
}
