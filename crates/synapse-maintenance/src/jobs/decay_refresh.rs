//! Nightly edge decay: stale edges lose count (and therefore weight), and
//! edges decayed to nothing are deleted. The graph bounds its own growth.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use synapse_core::config::{GraphConfig, MaintenanceConfig};
use synapse_core::errors::SynapseResult;
use synapse_core::traits::{IEdgeStorage, ITenantDirectory};

use crate::budget::JobBudget;

/// Resume point for an interrupted run: the tenant being processed and the
/// rowid reached within it.
#[derive(Debug, Clone)]
pub struct DecayCursor {
    pub organization_id: String,
    pub rowid: i64,
}

/// Outcome of one decay run. `resume` is set when the budget ran out.
#[derive(Debug, Clone, Default)]
pub struct DecayRunReport {
    pub tenants_processed: usize,
    pub edges_decayed: usize,
    pub edges_deleted: usize,
    pub resume: Option<DecayCursor>,
}

pub struct DecayRefreshJob<'a> {
    edges: &'a dyn IEdgeStorage,
    tenants: &'a dyn ITenantDirectory,
    graph_cfg: &'a GraphConfig,
    maintenance_cfg: &'a MaintenanceConfig,
}

impl<'a> DecayRefreshJob<'a> {
    pub fn new(
        edges: &'a dyn IEdgeStorage,
        tenants: &'a dyn ITenantDirectory,
        graph_cfg: &'a GraphConfig,
        maintenance_cfg: &'a MaintenanceConfig,
    ) -> Self {
        Self {
            edges,
            tenants,
            graph_cfg,
            maintenance_cfg,
        }
    }

    /// Run the decay sweep across all tenants, resuming from `resume` if a
    /// prior run was cut short. Idempotent: edges already decayed in the
    /// current period are skipped, so a retry never double-applies decay.
    pub fn run(
        &self,
        now: DateTime<Utc>,
        budget: &JobBudget,
        resume: Option<DecayCursor>,
    ) -> SynapseResult<DecayRunReport> {
        let organizations = self.tenants.organizations()?;
        let mut report = DecayRunReport::default();

        // Skip tenants already completed by the interrupted run.
        let start_index = match &resume {
            Some(cursor) => organizations
                .iter()
                .position(|org| *org == cursor.organization_id)
                .unwrap_or(0),
            None => 0,
        };

        for org in &organizations[start_index..] {
            let mut cursor = match &resume {
                Some(c) if c.organization_id == *org => c.rowid,
                _ => 0,
            };

            loop {
                if budget.expired() {
                    info!(org = %org, cursor, "decay budget exhausted, returning resume point");
                    report.resume = Some(DecayCursor {
                        organization_id: org.clone(),
                        rowid: cursor,
                    });
                    return Ok(report);
                }

                let batch = match self.edges.decay_stale_edges(
                    org,
                    now,
                    self.graph_cfg,
                    cursor,
                    self.maintenance_cfg.batch_size,
                ) {
                    Ok(batch) => batch,
                    Err(e) => {
                        // One tenant's failure must not abort the cycle.
                        warn!(org = %org, error = %e, "decay batch failed, moving to next tenant");
                        break;
                    }
                };

                report.edges_decayed += batch.edges_decayed;
                report.edges_deleted += batch.edges_deleted;
                debug!(
                    org = %org,
                    decayed = batch.edges_decayed,
                    deleted = batch.edges_deleted,
                    "decay batch complete"
                );

                match batch.next_cursor {
                    Some(next) => cursor = next,
                    None => break,
                }
            }
            report.tenants_processed += 1;
        }

        info!(
            tenants = report.tenants_processed,
            decayed = report.edges_decayed,
            deleted = report.edges_deleted,
            "decay refresh complete"
        );
        Ok(report)
    }
}
