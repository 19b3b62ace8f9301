//! # synapse
//!
//! The engine facade. Owns the storage engine and configuration and
//! exposes the public operations: ranked retrieval with explanations,
//! co-activation and access recording, the causal ledger, and the
//! maintenance entry points.
//!
//! ```no_run
//! use synapse::Engine;
//! use synapse_core::SynapseConfig;
//!
//! let engine = Engine::open(std::path::Path::new("synapse.db"), SynapseConfig::default())?;
//! # Ok::<(), synapse_core::SynapseError>(())
//! ```

pub mod engine;

pub use engine::{Engine, RankedResponse};

pub use synapse_core as core;
pub use synapse_core::{SynapseConfig, SynapseError, SynapseResult};
