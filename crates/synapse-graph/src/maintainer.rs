//! Co-activation edge updates driven by retrieval outcomes.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use synapse_core::config::GraphConfig;
use synapse_core::errors::SynapseResult;
use synapse_core::model::MemoryPair;
use synapse_core::traits::{CoactivationReport, IEdgeStorage};

/// Applies co-activation events to the edge store: filters self-loops,
/// canonicalizes pairs, and delegates the windowed increment + top-N prune
/// to a single storage transaction.
pub struct CoactivationMaintainer<'a> {
    edges: &'a dyn IEdgeStorage,
    config: &'a GraphConfig,
}

impl<'a> CoactivationMaintainer<'a> {
    pub fn new(edges: &'a dyn IEdgeStorage, config: &'a GraphConfig) -> Self {
        Self { edges, config }
    }

    /// Record that `primary_id` was used together with `coactivated_ids`
    /// in one interaction. The primary is dropped from its own set, and
    /// duplicate partners count once.
    pub fn record_coactivation(
        &self,
        org: &str,
        primary_id: &str,
        coactivated_ids: &[String],
        now: DateTime<Utc>,
    ) -> SynapseResult<CoactivationReport> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut pairs: Vec<MemoryPair> = Vec::new();

        for id in coactivated_ids {
            if id == primary_id || !seen.insert(id.as_str()) {
                continue;
            }
            // Self-loops are filtered above; MemoryPair enforces the
            // canonical orientation and rejects anything that slips past.
            pairs.push(MemoryPair::new(primary_id, id.as_str())?);
        }

        if pairs.is_empty() {
            return Ok(CoactivationReport::default());
        }

        let report = self
            .edges
            .apply_coactivation(org, primary_id, &pairs, now, self.config)?;

        debug!(
            org,
            primary_id,
            applied = report.pairs_applied,
            deduped = report.pairs_deduped,
            pruned = report.edges_pruned,
            "coactivation recorded"
        );
        Ok(report)
    }
}
