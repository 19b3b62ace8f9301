//! v001: activation_states.

use rusqlite::Connection;

use synapse_core::errors::SynapseResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SynapseResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS activation_states (
            organization_id   TEXT NOT NULL,
            memory_id         TEXT NOT NULL,
            base_importance   REAL NOT NULL DEFAULT 0.5,
            confidence        REAL NOT NULL DEFAULT 0.8,
            contradicted      INTEGER NOT NULL DEFAULT 0,
            risk_factor       REAL NOT NULL DEFAULT 0.0,
            access_count      INTEGER NOT NULL DEFAULT 0 CHECK (access_count >= 0),
            last_accessed_at  TEXT,
            created_at        TEXT NOT NULL,
            positive_feedback INTEGER NOT NULL DEFAULT 0,
            negative_feedback INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (organization_id, memory_id)
        );

        CREATE INDEX IF NOT EXISTS idx_states_org_accessed
            ON activation_states(organization_id, last_accessed_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
