//! # synapse-core
//!
//! Foundation crate for the Synapse activation engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod model;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SynapseConfig;
pub use errors::{SynapseError, SynapseResult};
pub use model::{
    ActivationState, CausalHypothesis, Classification, CoactivationEdge, Components,
    QueryContext, RetrievalExplanation, Scope, Score,
};
