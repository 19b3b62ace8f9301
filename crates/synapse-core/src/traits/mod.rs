//! Storage traits implemented by `synapse-storage` and consumed by the
//! scoring, graph, causal, and maintenance crates.

mod storage;

pub use storage::{
    CoactivationReport, DecayBatch, ICausalStorage, IEdgeStorage, IExplanationStorage,
    IStateStorage, ITenantDirectory,
};
