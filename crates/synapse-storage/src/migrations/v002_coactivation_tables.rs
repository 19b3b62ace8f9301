//! v002: coactivation_edges. The CHECK enforces canonical orientation,
//! which also makes self-loops unrepresentable.

use rusqlite::Connection;

use synapse_core::errors::SynapseResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SynapseResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS coactivation_edges (
            organization_id     TEXT NOT NULL,
            memory_id_a         TEXT NOT NULL,
            memory_id_b         TEXT NOT NULL,
            coactivation_count  INTEGER NOT NULL DEFAULT 0 CHECK (coactivation_count >= 0),
            edge_weight         REAL NOT NULL DEFAULT 0.0,
            last_coactivated_at TEXT NOT NULL,
            last_decayed_at     TEXT,
            PRIMARY KEY (organization_id, memory_id_a, memory_id_b),
            CHECK (memory_id_a < memory_id_b)
        );

        CREATE INDEX IF NOT EXISTS idx_edges_org_a
            ON coactivation_edges(organization_id, memory_id_a);
        CREATE INDEX IF NOT EXISTS idx_edges_org_b
            ON coactivation_edges(organization_id, memory_id_b);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
