//! Tenant enumeration for per-tenant maintenance runs.

use rusqlite::Connection;

use synapse_core::errors::SynapseResult;

use crate::to_storage_err;

/// Distinct organization IDs across all stores.
pub fn organizations(conn: &Connection) -> SynapseResult<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT organization_id FROM activation_states
             UNION
             SELECT organization_id FROM coactivation_edges
             UNION
             SELECT organization_id FROM causal_hypotheses
             ORDER BY 1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut orgs = Vec::new();
    for row in rows {
        orgs.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(orgs)
}
