//! v003: retrieval_explanations — append-only, time-keyed.

use rusqlite::Connection;

use synapse_core::errors::SynapseResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SynapseResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS retrieval_explanations (
            id              TEXT PRIMARY KEY,
            organization_id TEXT NOT NULL,
            user_id         TEXT NOT NULL,
            query_hash      TEXT NOT NULL,
            retrieved_at    TEXT NOT NULL,
            top_k           INTEGER NOT NULL,
            results         TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expl_org_time
            ON retrieval_explanations(organization_id, retrieved_at);
        CREATE INDEX IF NOT EXISTS idx_expl_org_user
            ON retrieval_explanations(organization_id, user_id);
        CREATE INDEX IF NOT EXISTS idx_expl_org_hash
            ON retrieval_explanations(organization_id, query_hash);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
