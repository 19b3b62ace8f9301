//! v004: causal_hypotheses.

use rusqlite::Connection;

use synapse_core::errors::SynapseResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SynapseResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS causal_hypotheses (
            id                  TEXT PRIMARY KEY,
            organization_id     TEXT NOT NULL,
            episode_id          TEXT,
            from_event_id       TEXT,
            to_event_id         TEXT,
            relation            TEXT NOT NULL,
            confidence          REAL NOT NULL DEFAULT 0.5,
            evidence_memory_ids TEXT NOT NULL DEFAULT '[]',
            status              TEXT NOT NULL DEFAULT 'proposed',
            status_reason       TEXT,
            created_at          TEXT NOT NULL,
            updated_at          TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_hyp_org_status
            ON causal_hypotheses(organization_id, status);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
