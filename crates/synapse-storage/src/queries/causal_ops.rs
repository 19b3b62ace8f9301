//! Causal hypothesis rows: insert, read, lifecycle update, sweep promotion.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use synapse_core::errors::{StorageError, SynapseError, SynapseResult};
use synapse_core::model::{CausalHypothesis, CausalRelation, HypothesisStatus, Score};

use crate::to_storage_err;

use super::parse_ts;

const SELECT_COLS: &str = "id, organization_id, episode_id, from_event_id, to_event_id, \
     relation, confidence, evidence_memory_ids, status, status_reason, created_at, updated_at";

fn hypothesis_from_row(row: &Row<'_>) -> rusqlite::Result<(CausalHypothesis, String, String)> {
    let relation_raw: String = row.get(5)?;
    let status_raw: String = row.get(8)?;
    let evidence_json: String = row.get(7)?;
    Ok((
        CausalHypothesis {
            id: row.get(0)?,
            organization_id: row.get(1)?,
            episode_id: row.get(2)?,
            from_event_id: row.get(3)?,
            to_event_id: row.get(4)?,
            relation: CausalRelation::parse(&relation_raw).unwrap_or(CausalRelation::Correlates),
            confidence: Score::new(row.get(6)?),
            evidence_memory_ids: serde_json::from_str(&evidence_json).unwrap_or_default(),
            status: HypothesisStatus::parse(&status_raw).unwrap_or(HypothesisStatus::Proposed),
            status_reason: row.get(9)?,
            created_at: DateTime::<Utc>::MIN_UTC,
            updated_at: DateTime::<Utc>::MIN_UTC,
        },
        row.get::<_, String>(10)?,
        row.get::<_, String>(11)?,
    ))
}

fn finish_hypothesis(
    (mut h, created, updated): (CausalHypothesis, String, String),
) -> SynapseResult<CausalHypothesis> {
    h.created_at = parse_ts(&created)?;
    h.updated_at = parse_ts(&updated)?;
    Ok(h)
}

pub fn insert_hypothesis(conn: &Connection, h: &CausalHypothesis) -> SynapseResult<()> {
    let evidence_json =
        serde_json::to_string(&h.evidence_memory_ids).map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO causal_hypotheses
             (id, organization_id, episode_id, from_event_id, to_event_id, relation,
              confidence, evidence_memory_ids, status, status_reason, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            h.id,
            h.organization_id,
            h.episode_id,
            h.from_event_id,
            h.to_event_id,
            h.relation.as_str(),
            h.confidence.value(),
            evidence_json,
            h.status.as_str(),
            h.status_reason,
            h.created_at.to_rfc3339(),
            h.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_hypothesis(
    conn: &Connection,
    org: &str,
    id: &str,
) -> SynapseResult<Option<CausalHypothesis>> {
    let raw = conn
        .query_row(
            &format!(
                "SELECT {SELECT_COLS} FROM causal_hypotheses
                 WHERE organization_id = ?1 AND id = ?2"
            ),
            params![org, id],
            hypothesis_from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(finish_hypothesis).transpose()
}

/// Full-row update of a hypothesis after a lifecycle transition.
pub fn update_hypothesis(conn: &Connection, h: &CausalHypothesis) -> SynapseResult<()> {
    let evidence_json =
        serde_json::to_string(&h.evidence_memory_ids).map_err(|e| to_storage_err(e.to_string()))?;
    let updated = conn
        .execute(
            "UPDATE causal_hypotheses
             SET relation = ?3, confidence = ?4, evidence_memory_ids = ?5,
                 status = ?6, status_reason = ?7, updated_at = ?8
             WHERE organization_id = ?1 AND id = ?2",
            params![
                h.organization_id,
                h.id,
                h.relation.as_str(),
                h.confidence.value(),
                evidence_json,
                h.status.as_str(),
                h.status_reason,
                h.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if updated == 0 {
        return Err(SynapseError::Storage(StorageError::NotFound {
            entity: "causal_hypothesis",
            key: h.id.clone(),
        }));
    }
    Ok(())
}

pub fn list_by_status(
    conn: &Connection,
    org: &str,
    status: HypothesisStatus,
    limit: usize,
) -> SynapseResult<Vec<CausalHypothesis>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SELECT_COLS} FROM causal_hypotheses
             WHERE organization_id = ?1 AND status = ?2
             ORDER BY updated_at DESC
             LIMIT ?3"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![org, status.as_str(), limit as i64], hypothesis_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut hypotheses = Vec::new();
    for row in rows {
        hypotheses.push(finish_hypothesis(
            row.map_err(|e| to_storage_err(e.to_string()))?,
        )?);
    }
    Ok(hypotheses)
}

/// Status-guarded promotion sweep: `proposed` rows meeting both thresholds
/// become `active`. Re-running is a no-op for already-promoted rows.
pub fn promote_eligible(
    conn: &Connection,
    org: &str,
    evidence_min: usize,
    confidence_min: f64,
    now: DateTime<Utc>,
) -> SynapseResult<usize> {
    let promoted = conn
        .execute(
            "UPDATE causal_hypotheses
             SET status = 'active', updated_at = ?4
             WHERE organization_id = ?1
               AND status = 'proposed'
               AND json_array_length(evidence_memory_ids) >= ?2
               AND confidence >= ?3",
            params![org, evidence_min as i64, confidence_min, now.to_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(promoted)
}
