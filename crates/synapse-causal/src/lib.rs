//! # synapse-causal
//!
//! The causal hypothesis ledger: proposed cause/effect relationships
//! between events and episodes, with an evidence-driven lifecycle
//! (`proposed → active | contested → rejected`). Hypotheses are never
//! deleted; the status carries the outcome.

pub mod ledger;

pub use ledger::{CausalLedger, HypothesisDraft};
