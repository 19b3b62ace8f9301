//! # synapse-maintenance
//!
//! Background maintainers. All jobs run per tenant, are idempotent and
//! restartable, and check a cooperative time budget between batches so a
//! slow tenant cannot stall the whole maintenance cycle.

pub mod budget;
pub mod jobs;
pub mod scheduler;

pub use budget::JobBudget;
pub use jobs::access::AccessRecorder;
pub use jobs::causal_sweep::{CausalSweepJob, SweepReport};
pub use jobs::decay_refresh::{DecayCursor, DecayRefreshJob, DecayRunReport};
pub use scheduler::Scheduler;
