//! Versioned schema migrations, tracked via `PRAGMA user_version`.

mod v001_state_tables;
mod v002_coactivation_tables;
mod v003_explanation_tables;
mod v004_causal_tables;

use rusqlite::Connection;

use synapse_core::errors::{StorageError, SynapseError, SynapseResult};

use crate::to_storage_err;

type Migration = fn(&Connection) -> SynapseResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_state_tables::migrate),
    (2, v002_coactivation_tables::migrate),
    (3, v003_explanation_tables::migrate),
    (4, v004_causal_tables::migrate),
];

/// Run all pending migrations on the given connection.
pub fn run_migrations(conn: &Connection) -> SynapseResult<()> {
    let current: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    for &(version, migrate) in MIGRATIONS {
        if version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            SynapseError::Storage(StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            })
        })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!(version, "applied migration");
    }
    Ok(())
}

/// The schema version this build expects.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map(|&(v, _)| v).unwrap_or(0)
}
