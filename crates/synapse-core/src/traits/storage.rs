use chrono::{DateTime, Utc};

use crate::config::GraphConfig;
use crate::errors::SynapseResult;
use crate::model::{
    ActivationState, CausalHypothesis, CoactivationEdge, ExplanationFilter, FeedbackSignal,
    HypothesisStatus, MemoryPair, RetrievalExplanation,
};

/// Outcome of one co-activation write: how many pairs were incremented,
/// how many fell inside the dedup window, and how many edges pruning
/// removed afterwards.
#[derive(Debug, Clone, Default)]
pub struct CoactivationReport {
    pub pairs_applied: usize,
    pub pairs_deduped: usize,
    pub edges_pruned: usize,
}

/// One batch of the nightly edge-decay sweep. `next_cursor` is `None` when
/// the tenant is exhausted.
#[derive(Debug, Clone)]
pub struct DecayBatch {
    pub edges_decayed: usize,
    pub edges_deleted: usize,
    pub next_cursor: Option<i64>,
}

/// Per-memory activation state rows. Every method is tenant-scoped.
pub trait IStateStorage: Send + Sync {
    fn get_state(&self, org: &str, memory_id: &str) -> SynapseResult<Option<ActivationState>>;

    fn get_states_bulk(&self, org: &str, memory_ids: &[String])
        -> SynapseResult<Vec<ActivationState>>;

    /// Load states for the given memories, lazily inserting a default row
    /// for each memory that has none yet. Returns one state per input ID.
    fn ensure_states(
        &self,
        org: &str,
        memory_ids: &[String],
        now: DateTime<Utc>,
    ) -> SynapseResult<Vec<ActivationState>>;

    /// Insert or replace a full state row — the memory-creation/curation
    /// path, where the caller supplies initial importance and metadata.
    fn upsert_state(&self, state: &ActivationState) -> SynapseResult<()>;

    /// Atomic per-row `access_count` increment + `last_accessed_at` bump.
    /// Lazily creates the row on first access.
    fn record_access(&self, org: &str, memory_id: &str, now: DateTime<Utc>) -> SynapseResult<()>;

    /// Increment the positive or negative feedback counter.
    fn record_feedback(
        &self,
        org: &str,
        memory_id: &str,
        signal: FeedbackSignal,
        now: DateTime<Utc>,
    ) -> SynapseResult<()>;

    fn set_contradicted(&self, org: &str, memory_id: &str, contradicted: bool)
        -> SynapseResult<()>;

    /// Memory-deletion cascade: remove the state row and incident edges.
    fn delete_state(&self, org: &str, memory_id: &str) -> SynapseResult<()>;
}

/// Co-activation edges. Writes are atomic per call; the top-N prune runs in
/// the same transaction as the increments that triggered it.
pub trait IEdgeStorage: Send + Sync {
    /// Apply one co-activation event: increment every pair (respecting the
    /// dedup window), recompute weights, then prune the primary's incident
    /// edges beyond `cfg.top_n`.
    fn apply_coactivation(
        &self,
        org: &str,
        primary_id: &str,
        pairs: &[MemoryPair],
        now: DateTime<Utc>,
        cfg: &GraphConfig,
    ) -> SynapseResult<CoactivationReport>;

    fn edges_for(&self, org: &str, memory_id: &str) -> SynapseResult<Vec<CoactivationEdge>>;

    /// Edges whose both endpoints are in `memory_ids` — the neighbor-boost
    /// input for one candidate set.
    fn edges_among(&self, org: &str, memory_ids: &[String])
        -> SynapseResult<Vec<CoactivationEdge>>;

    /// Decay one batch of stale edges for a tenant, resuming from a rowid
    /// cursor. Idempotent within a decay period via `last_decayed_at`.
    fn decay_stale_edges(
        &self,
        org: &str,
        now: DateTime<Utc>,
        cfg: &GraphConfig,
        cursor: i64,
        limit: usize,
    ) -> SynapseResult<DecayBatch>;
}

/// Append-only explanation log.
pub trait IExplanationStorage: Send + Sync {
    /// Single atomic insert of one full explanation.
    fn insert_explanation(&self, explanation: &RetrievalExplanation) -> SynapseResult<()>;

    fn read_explanations(
        &self,
        filter: &ExplanationFilter,
    ) -> SynapseResult<Vec<RetrievalExplanation>>;
}

/// Causal hypothesis rows.
pub trait ICausalStorage: Send + Sync {
    fn insert_hypothesis(&self, hypothesis: &CausalHypothesis) -> SynapseResult<()>;

    fn get_hypothesis(&self, org: &str, id: &str) -> SynapseResult<Option<CausalHypothesis>>;

    fn update_hypothesis(&self, hypothesis: &CausalHypothesis) -> SynapseResult<()>;

    fn list_by_status(
        &self,
        org: &str,
        status: HypothesisStatus,
        limit: usize,
    ) -> SynapseResult<Vec<CausalHypothesis>>;

    /// Status-guarded promotion of `proposed` hypotheses meeting the
    /// evidence and confidence thresholds. Returns the number promoted.
    fn promote_eligible(
        &self,
        org: &str,
        evidence_min: usize,
        confidence_min: f64,
        now: DateTime<Utc>,
    ) -> SynapseResult<usize>;
}

/// Tenant enumeration for per-tenant maintenance runs.
pub trait ITenantDirectory: Send + Sync {
    fn organizations(&self) -> SynapseResult<Vec<String>>;
}
