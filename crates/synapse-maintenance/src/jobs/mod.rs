//! The background jobs: access/feedback recording, nightly edge decay,
//! and the causal promotion sweep.

pub mod access;
pub mod causal_sweep;
pub mod decay_refresh;
