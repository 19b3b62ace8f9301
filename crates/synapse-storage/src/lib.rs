//! # synapse-storage
//!
//! SQLite persistence for the activation engine: a single write connection
//! plus a WAL read pool, versioned migrations, and tenant-scoped query
//! modules. Every statement filters by `organization_id`.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use synapse_core::errors::{StorageError, SynapseError};

/// Wrap a low-level SQLite failure into the storage error taxonomy.
pub(crate) fn to_storage_err(message: impl Into<String>) -> SynapseError {
    SynapseError::Storage(StorageError::SqliteError {
        message: message.into(),
    })
}
