//! Domain model: activation state, co-activation edges, explanations,
//! causal hypotheses, and the query-side context types.

mod activation_state;
mod causal;
mod coactivation;
mod context;
mod explanation;
mod score;

pub use activation_state::ActivationState;
pub use causal::{CausalHypothesis, CausalRelation, HypothesisStatus};
pub use coactivation::{CoactivationEdge, MemoryPair};
pub use context::{
    Candidate, Classification, FeedbackSignal, GateDecision, GateInput, MemoryMetadata,
    QueryContext, Scope,
};
pub use explanation::{Components, ExplanationFilter, RankedResult, RetrievalExplanation};
pub use score::Score;
