//! Activation-state rows: lazy creation, atomic counter updates, feedback.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use synapse_core::model::{ActivationState, FeedbackSignal, Score};
use synapse_core::errors::SynapseResult;

use crate::to_storage_err;

use super::{parse_ts, parse_ts_opt};

fn state_from_row(row: &Row<'_>) -> rusqlite::Result<(ActivationState, Option<String>, String)> {
    Ok((
        ActivationState {
            organization_id: row.get(0)?,
            memory_id: row.get(1)?,
            base_importance: Score::new(row.get(2)?),
            confidence: Score::new(row.get(3)?),
            contradicted: row.get::<_, i64>(4)? != 0,
            risk_factor: Score::new(row.get(5)?),
            access_count: row.get::<_, i64>(6)?.max(0) as u64,
            // Timestamps are carried as raw strings and filled in by
            // finish_state; these are placeholders, never returned.
            last_accessed_at: None,
            created_at: DateTime::<Utc>::MIN_UTC,
            positive_feedback: row.get::<_, i64>(9)?.max(0) as u32,
            negative_feedback: row.get::<_, i64>(10)?.max(0) as u32,
        },
        row.get::<_, Option<String>>(7)?,
        row.get::<_, String>(8)?,
    ))
}

const SELECT_COLS: &str = "organization_id, memory_id, base_importance, confidence, \
     contradicted, risk_factor, access_count, last_accessed_at, created_at, \
     positive_feedback, negative_feedback";

fn finish_state(
    (mut state, last_accessed, created): (ActivationState, Option<String>, String),
) -> SynapseResult<ActivationState> {
    state.last_accessed_at = parse_ts_opt(last_accessed)?;
    state.created_at = parse_ts(&created)?;
    Ok(state)
}

/// Fetch one state row, if present.
pub fn get_state(
    conn: &Connection,
    org: &str,
    memory_id: &str,
) -> SynapseResult<Option<ActivationState>> {
    let raw = conn
        .query_row(
            &format!(
                "SELECT {SELECT_COLS} FROM activation_states
                 WHERE organization_id = ?1 AND memory_id = ?2"
            ),
            params![org, memory_id],
            state_from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(finish_state).transpose()
}

/// Fetch states for a set of memories. Missing rows are simply absent.
pub fn get_states_bulk(
    conn: &Connection,
    org: &str,
    memory_ids: &[String],
) -> SynapseResult<Vec<ActivationState>> {
    if memory_ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = (2..memory_ids.len() + 2)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT {SELECT_COLS} FROM activation_states
         WHERE organization_id = ?1 AND memory_id IN ({placeholders})"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut values: Vec<&str> = Vec::with_capacity(memory_ids.len() + 1);
    values.push(org);
    values.extend(memory_ids.iter().map(String::as_str));

    let rows = stmt
        .query_map(rusqlite::params_from_iter(values), state_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut states = Vec::new();
    for row in rows {
        states.push(finish_state(row.map_err(|e| to_storage_err(e.to_string()))?)?);
    }
    Ok(states)
}

/// Load states for the given memories, inserting a default row for each
/// memory that has none yet. Returns states in input order.
pub fn ensure_states(
    conn: &Connection,
    org: &str,
    memory_ids: &[String],
    now: DateTime<Utc>,
) -> SynapseResult<Vec<ActivationState>> {
    for memory_id in memory_ids {
        conn.execute(
            "INSERT OR IGNORE INTO activation_states (organization_id, memory_id, created_at)
             VALUES (?1, ?2, ?3)",
            params![org, memory_id, now.to_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    }

    let by_id: std::collections::HashMap<String, ActivationState> =
        get_states_bulk(conn, org, memory_ids)?
            .into_iter()
            .map(|s| (s.memory_id.clone(), s))
            .collect();

    // Cloning handles duplicate IDs in the input set.
    memory_ids
        .iter()
        .map(|id| {
            by_id.get(id).cloned().ok_or_else(|| {
                to_storage_err(format!("state row missing after ensure: {id}"))
            })
        })
        .collect()
}

/// Insert or replace a full state row. Counter updates must go through
/// [`record_access`]/[`record_feedback`] — this is the creation/curation
/// path, not a read-modify-write on counters.
pub fn upsert_state(conn: &Connection, state: &ActivationState) -> SynapseResult<()> {
    conn.execute(
        "INSERT INTO activation_states
             (organization_id, memory_id, base_importance, confidence, contradicted,
              risk_factor, access_count, last_accessed_at, created_at,
              positive_feedback, negative_feedback)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
         ON CONFLICT (organization_id, memory_id) DO UPDATE SET
             base_importance = excluded.base_importance,
             confidence = excluded.confidence,
             contradicted = excluded.contradicted,
             risk_factor = excluded.risk_factor",
        params![
            state.organization_id,
            state.memory_id,
            state.base_importance.value(),
            state.confidence.value(),
            state.contradicted as i64,
            state.risk_factor.value(),
            state.access_count as i64,
            state.last_accessed_at.map(|t| t.to_rfc3339()),
            state.created_at.to_rfc3339(),
            state.positive_feedback as i64,
            state.negative_feedback as i64,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Atomic access increment; lazily creates the row on first access.
pub fn record_access(
    conn: &Connection,
    org: &str,
    memory_id: &str,
    now: DateTime<Utc>,
) -> SynapseResult<()> {
    let updated = conn
        .execute(
            "UPDATE activation_states
             SET access_count = access_count + 1, last_accessed_at = ?3
             WHERE organization_id = ?1 AND memory_id = ?2",
            params![org, memory_id, now.to_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if updated == 0 {
        conn.execute(
            "INSERT INTO activation_states
                 (organization_id, memory_id, access_count, last_accessed_at, created_at)
             VALUES (?1, ?2, 1, ?3, ?3)",
            params![org, memory_id, now.to_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}

/// Record an explicit feedback signal. Lazily creates the row when needed.
pub fn record_feedback(
    conn: &Connection,
    org: &str,
    memory_id: &str,
    signal: FeedbackSignal,
    now: DateTime<Utc>,
) -> SynapseResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO activation_states (organization_id, memory_id, created_at)
         VALUES (?1, ?2, ?3)",
        params![org, memory_id, now.to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let column = match signal {
        FeedbackSignal::Positive => "positive_feedback",
        FeedbackSignal::Negative => "negative_feedback",
    };
    conn.execute(
        &format!(
            "UPDATE activation_states SET {column} = {column} + 1
             WHERE organization_id = ?1 AND memory_id = ?2"
        ),
        params![org, memory_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Flip the contradicted flag. Lazily creates the row when needed.
pub fn set_contradicted(
    conn: &Connection,
    org: &str,
    memory_id: &str,
    contradicted: bool,
    now: DateTime<Utc>,
) -> SynapseResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO activation_states (organization_id, memory_id, created_at)
         VALUES (?1, ?2, ?3)",
        params![org, memory_id, now.to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "UPDATE activation_states SET contradicted = ?3
         WHERE organization_id = ?1 AND memory_id = ?2",
        params![org, memory_id, contradicted as i64],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Memory-deletion cascade: drop the state row and every incident edge.
pub fn delete_state(conn: &Connection, org: &str, memory_id: &str) -> SynapseResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("delete_state begin: {e}")))?;

    tx.execute(
        "DELETE FROM activation_states WHERE organization_id = ?1 AND memory_id = ?2",
        params![org, memory_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    tx.execute(
        "DELETE FROM coactivation_edges
         WHERE organization_id = ?1 AND (memory_id_a = ?2 OR memory_id_b = ?2)",
        params![org, memory_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    tx.commit()
        .map_err(|e| to_storage_err(format!("delete_state commit: {e}")))?;
    Ok(())
}
