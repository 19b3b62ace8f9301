//! Append-only explanation log. Insert and filtered read; no update or
//! delete paths exist.

use rusqlite::{params_from_iter, Connection};

use synapse_core::errors::SynapseResult;
use synapse_core::model::{ExplanationFilter, RetrievalExplanation};

use crate::to_storage_err;

use super::parse_ts;

/// Single atomic insert of one full explanation.
pub fn insert_explanation(
    conn: &Connection,
    explanation: &RetrievalExplanation,
) -> SynapseResult<()> {
    let results_json = serde_json::to_string(&explanation.results)
        .map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO retrieval_explanations
             (id, organization_id, user_id, query_hash, retrieved_at, top_k, results)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            explanation.id,
            explanation.organization_id,
            explanation.user_id,
            explanation.query_hash,
            explanation.retrieved_at.to_rfc3339(),
            explanation.top_k as i64,
            results_json,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Read explanations for audit/debugging, newest first.
pub fn read_explanations(
    conn: &Connection,
    filter: &ExplanationFilter,
) -> SynapseResult<Vec<RetrievalExplanation>> {
    use rusqlite::types::Value;

    let mut sql = String::from(
        "SELECT id, organization_id, user_id, query_hash, retrieved_at, top_k, results
         FROM retrieval_explanations
         WHERE organization_id = ?1",
    );
    let mut values: Vec<Value> = vec![Value::from(filter.organization_id.clone())];

    if let Some(user_id) = &filter.user_id {
        values.push(Value::from(user_id.clone()));
        sql.push_str(&format!(" AND user_id = ?{}", values.len()));
    }
    if let Some(query_hash) = &filter.query_hash {
        values.push(Value::from(query_hash.clone()));
        sql.push_str(&format!(" AND query_hash = ?{}", values.len()));
    }
    if let Some(from) = filter.from {
        values.push(Value::from(from.to_rfc3339()));
        sql.push_str(&format!(" AND retrieved_at >= ?{}", values.len()));
    }
    if let Some(to) = filter.to {
        values.push(Value::from(to.to_rfc3339()));
        sql.push_str(&format!(" AND retrieved_at < ?{}", values.len()));
    }
    values.push(Value::from(filter.limit as i64));
    sql.push_str(&format!(
        " ORDER BY retrieved_at DESC LIMIT ?{}",
        values.len()
    ));

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(values), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, String>(6)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut explanations = Vec::new();
    for row in rows {
        let (id, organization_id, user_id, query_hash, retrieved_at, top_k, results_json) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        explanations.push(RetrievalExplanation {
            id,
            organization_id,
            user_id,
            query_hash,
            retrieved_at: parse_ts(&retrieved_at)?,
            top_k: top_k.max(0) as usize,
            results: serde_json::from_str(&results_json)
                .map_err(|e| to_storage_err(format!("bad results payload: {e}")))?,
        });
    }
    Ok(explanations)
}
