//! Co-activation edges: dedup-windowed increments, weight recompute,
//! same-transaction top-N pruning, and the nightly decay sweep.

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use synapse_core::config::GraphConfig;
use synapse_core::errors::SynapseResult;
use synapse_core::model::{CoactivationEdge, MemoryPair};
use synapse_core::traits::{CoactivationReport, DecayBatch};

use crate::to_storage_err;

use super::{parse_ts, parse_ts_opt};

fn edge_from_row(row: &Row<'_>) -> rusqlite::Result<(CoactivationEdge, String, Option<String>)> {
    Ok((
        CoactivationEdge {
            organization_id: row.get(0)?,
            memory_id_a: row.get(1)?,
            memory_id_b: row.get(2)?,
            coactivation_count: row.get::<_, i64>(3)?.max(0) as u64,
            edge_weight: row.get(4)?,
            last_coactivated_at: DateTime::<Utc>::MIN_UTC,
            last_decayed_at: None,
        },
        row.get::<_, String>(5)?,
        row.get::<_, Option<String>>(6)?,
    ))
}

const SELECT_COLS: &str = "organization_id, memory_id_a, memory_id_b, coactivation_count, \
     edge_weight, last_coactivated_at, last_decayed_at";

fn finish_edge(
    (mut edge, coactivated, decayed): (CoactivationEdge, String, Option<String>),
) -> SynapseResult<CoactivationEdge> {
    edge.last_coactivated_at = parse_ts(&coactivated)?;
    edge.last_decayed_at = parse_ts_opt(decayed)?;
    Ok(edge)
}

/// Apply one co-activation event: increment each pair unless it falls in
/// the dedup window, recompute weights, then prune the primary's incident
/// edges beyond `top_n`. One transaction end to end, so a prune can never
/// race the increments it follows.
pub fn apply_coactivation(
    conn: &Connection,
    org: &str,
    primary_id: &str,
    pairs: &[MemoryPair],
    now: DateTime<Utc>,
    cfg: &GraphConfig,
) -> SynapseResult<CoactivationReport> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("apply_coactivation begin: {e}")))?;

    let mut report = CoactivationReport::default();
    let window = Duration::hours(cfg.dedup_window_hours);

    for pair in pairs {
        let existing: Option<(i64, String)> = tx
            .query_row(
                "SELECT coactivation_count, last_coactivated_at FROM coactivation_edges
                 WHERE organization_id = ?1 AND memory_id_a = ?2 AND memory_id_b = ?3",
                params![org, pair.a(), pair.b()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| to_storage_err(e.to_string()))?;

        match existing {
            None => {
                let weight = CoactivationEdge::weight_for(1, cfg.lambda);
                tx.execute(
                    "INSERT INTO coactivation_edges
                         (organization_id, memory_id_a, memory_id_b, coactivation_count,
                          edge_weight, last_coactivated_at)
                     VALUES (?1, ?2, ?3, 1, ?4, ?5)",
                    params![org, pair.a(), pair.b(), weight, now.to_rfc3339()],
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
                report.pairs_applied += 1;
            }
            Some((count, last)) => {
                let last = parse_ts(&last)?;
                if now - last < window {
                    // Burst of the same pair inside the window counts once.
                    report.pairs_deduped += 1;
                    continue;
                }
                let new_count = count.max(0) as u64 + 1;
                let weight = CoactivationEdge::weight_for(new_count, cfg.lambda);
                tx.execute(
                    "UPDATE coactivation_edges
                     SET coactivation_count = ?4, edge_weight = ?5, last_coactivated_at = ?6
                     WHERE organization_id = ?1 AND memory_id_a = ?2 AND memory_id_b = ?3",
                    params![
                        org,
                        pair.a(),
                        pair.b(),
                        new_count as i64,
                        weight,
                        now.to_rfc3339()
                    ],
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
                report.pairs_applied += 1;
            }
        }
    }

    report.edges_pruned = prune_incident(&tx, org, primary_id, cfg.top_n)?;

    tx.commit()
        .map_err(|e| to_storage_err(format!("apply_coactivation commit: {e}")))?;
    Ok(report)
}

/// Keep the `top_n` highest-weight edges incident to `memory_id`, delete
/// the rest. Ties resolve by pair IDs for reproducibility.
fn prune_incident(
    conn: &Connection,
    org: &str,
    memory_id: &str,
    top_n: usize,
) -> SynapseResult<usize> {
    let pruned = conn
        .execute(
            "DELETE FROM coactivation_edges
             WHERE organization_id = ?1
               AND (memory_id_a = ?2 OR memory_id_b = ?2)
               AND rowid NOT IN (
                   SELECT rowid FROM coactivation_edges
                   WHERE organization_id = ?1
                     AND (memory_id_a = ?2 OR memory_id_b = ?2)
                   ORDER BY edge_weight DESC, memory_id_a ASC, memory_id_b ASC
                   LIMIT ?3
               )",
            params![org, memory_id, top_n as i64],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(pruned)
}

/// All edges incident to one memory.
pub fn edges_for(
    conn: &Connection,
    org: &str,
    memory_id: &str,
) -> SynapseResult<Vec<CoactivationEdge>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SELECT_COLS} FROM coactivation_edges
             WHERE organization_id = ?1 AND (memory_id_a = ?2 OR memory_id_b = ?2)
             ORDER BY edge_weight DESC, memory_id_a ASC, memory_id_b ASC"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![org, memory_id], edge_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut edges = Vec::new();
    for row in rows {
        edges.push(finish_edge(row.map_err(|e| to_storage_err(e.to_string()))?)?);
    }
    Ok(edges)
}

/// Edges with both endpoints inside `memory_ids`.
pub fn edges_among(
    conn: &Connection,
    org: &str,
    memory_ids: &[String],
) -> SynapseResult<Vec<CoactivationEdge>> {
    if memory_ids.len() < 2 {
        return Ok(Vec::new());
    }
    let placeholders = (2..memory_ids.len() + 2)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT {SELECT_COLS} FROM coactivation_edges
         WHERE organization_id = ?1
           AND memory_id_a IN ({placeholders})
           AND memory_id_b IN ({placeholders})"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut values: Vec<&str> = Vec::with_capacity(memory_ids.len() + 1);
    values.push(org);
    values.extend(memory_ids.iter().map(String::as_str));

    let rows = stmt
        .query_map(rusqlite::params_from_iter(values), edge_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut edges = Vec::new();
    for row in rows {
        edges.push(finish_edge(row.map_err(|e| to_storage_err(e.to_string()))?)?);
    }
    Ok(edges)
}

/// Decay one batch of stale edges for a tenant. An edge decays only when
/// it has been idle past `stale_after_days` and was not already decayed in
/// the current period, so an aborted run can be retried safely.
pub fn decay_stale_edges(
    conn: &Connection,
    org: &str,
    now: DateTime<Utc>,
    cfg: &GraphConfig,
    cursor: i64,
    limit: usize,
) -> SynapseResult<DecayBatch> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("decay_stale_edges begin: {e}")))?;

    let mut rows: Vec<(i64, i64, String, Option<String>)> = Vec::new();
    {
        let mut stmt = tx
            .prepare(
                "SELECT rowid, coactivation_count, last_coactivated_at, last_decayed_at
                 FROM coactivation_edges
                 WHERE organization_id = ?1 AND rowid > ?2
                 ORDER BY rowid ASC
                 LIMIT ?3",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        let mapped = stmt
            .query_map(params![org, cursor, limit as i64], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .map_err(|e| to_storage_err(e.to_string()))?;
        for row in mapped {
            rows.push(row.map_err(|e| to_storage_err(e.to_string()))?);
        }
    }

    let stale_cutoff = now - Duration::days(cfg.stale_after_days);
    let period_cutoff = now - Duration::hours(cfg.decay_period_hours);
    let mut batch = DecayBatch {
        edges_decayed: 0,
        edges_deleted: 0,
        next_cursor: None,
    };

    let fetched = rows.len();
    let mut last_rowid = cursor;

    for (rowid, count, last_coactivated, last_decayed) in rows {
        last_rowid = rowid;

        if parse_ts(&last_coactivated)? > stale_cutoff {
            continue;
        }
        if let Some(decayed_at) = parse_ts_opt(last_decayed)? {
            if decayed_at > period_cutoff {
                continue; // Already decayed this period; retry is a no-op.
            }
        }

        let new_count = ((count.max(0) as f64) * cfg.decay_factor).floor() as u64;
        if new_count == 0 {
            tx.execute(
                "DELETE FROM coactivation_edges WHERE rowid = ?1",
                params![rowid],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            batch.edges_deleted += 1;
        } else {
            let weight = CoactivationEdge::weight_for(new_count, cfg.lambda);
            tx.execute(
                "UPDATE coactivation_edges
                 SET coactivation_count = ?2, edge_weight = ?3, last_decayed_at = ?4
                 WHERE rowid = ?1",
                params![rowid, new_count as i64, weight, now.to_rfc3339()],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            batch.edges_decayed += 1;
        }
    }

    tx.commit()
        .map_err(|e| to_storage_err(format!("decay_stale_edges commit: {e}")))?;

    if fetched == limit {
        batch.next_cursor = Some(last_rowid);
    }
    Ok(batch)
}
