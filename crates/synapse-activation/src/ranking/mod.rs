//! RetrievalRanker: orchestrates the scorer over a candidate set, applies
//! gating, sorts deterministically, and assembles the explanation.

use std::collections::HashMap;

use tracing::debug;

use synapse_core::config::SynapseConfig;
use synapse_core::errors::{RankingError, SynapseError, SynapseResult};
use synapse_core::model::{Candidate, Components, QueryContext, RankedResult, RetrievalExplanation};
use synapse_core::traits::{IEdgeStorage, IStateStorage};

use crate::gating;
use crate::scorer::{self, ScorerInput};

/// Sentinel rank for gate-denied candidates pinned to the bottom.
pub const DENIED_RANK: usize = usize::MAX;

/// The outcome of one ranking call. The explanation is assembled but not
/// yet persisted — the log write is the caller's side-effect.
#[derive(Debug, Clone)]
pub struct RankingOutcome {
    /// Allowed results (up to `top_k`) followed by denied candidates pinned
    /// to the bottom with [`DENIED_RANK`].
    pub results: Vec<RankedResult>,
    /// Present whenever any candidate was scored.
    pub explanation: Option<RetrievalExplanation>,
}

impl RankingOutcome {
    fn empty() -> Self {
        Self {
            results: Vec::new(),
            explanation: None,
        }
    }
}

/// Scores, gates, and ranks candidate sets against tenant-resolved weights.
pub struct RetrievalRanker<'a> {
    states: &'a dyn IStateStorage,
    edges: &'a dyn IEdgeStorage,
    config: &'a SynapseConfig,
}

impl<'a> RetrievalRanker<'a> {
    pub fn new(
        states: &'a dyn IStateStorage,
        edges: &'a dyn IEdgeStorage,
        config: &'a SynapseConfig,
    ) -> Self {
        Self {
            states,
            edges,
            config,
        }
    }

    /// Score and rank a candidate set. An empty set is a no-op, not an
    /// error: empty results, no explanation, nothing logged.
    pub fn score_and_rank(
        &self,
        candidates: &[Candidate],
        query: &QueryContext,
    ) -> SynapseResult<RankingOutcome> {
        if candidates.is_empty() {
            debug!(org = %query.organization_id, "empty candidate set");
            return Ok(RankingOutcome::empty());
        }

        let org = &query.organization_id;
        let ids: Vec<String> = candidates.iter().map(|c| c.memory_id.clone()).collect();

        // Fails hard when the state store is unreachable.
        let states = self
            .states
            .ensure_states(org, &ids, query.now)
            .map_err(|e| {
                SynapseError::Ranking(RankingError::StateStoreUnreachable {
                    reason: e.to_string(),
                })
            })?;
        let state_by_id: HashMap<&str, _> = states
            .iter()
            .map(|s| (s.memory_id.as_str(), s))
            .collect();

        // Neighbor boost: max edge weight into the rest of the set.
        let in_set_edges = self.edges.edges_among(org, &ids)?;
        let mut neighbor_max: HashMap<&str, f64> = HashMap::new();
        for edge in &in_set_edges {
            for endpoint in [edge.memory_id_a.as_str(), edge.memory_id_b.as_str()] {
                let entry = neighbor_max.entry(endpoint).or_insert(0.0);
                if edge.edge_weight > *entry {
                    *entry = edge.edge_weight;
                }
            }
        }

        let weights = self.config.weights_for(org);
        let mut allowed: Vec<RankedResult> = Vec::new();
        let mut denied: Vec<RankedResult> = Vec::new();

        for candidate in candidates {
            let Some(&state) = state_by_id.get(candidate.memory_id.as_str()) else {
                // ensure_states returns one row per input; a miss here is a
                // storage bug, but ranking degrades to skipping the row.
                tracing::warn!(memory_id = %candidate.memory_id, "state missing after ensure");
                continue;
            };

            let gate = gating::decide(&candidate.gate, candidate.metadata.classification);

            let input = ScorerInput {
                state,
                metadata: &candidate.metadata,
                similarity: candidate.similarity,
                neighbor_weight: neighbor_max.get(candidate.memory_id.as_str()).copied(),
            };
            let mut components: Components =
                scorer::compute_components(&input, query, &self.config.activation);

            if !gate.allowed {
                components.risk = 1.0;
            }
            let activation = scorer::combine(&components, weights);

            let result = RankedResult {
                memory_id: candidate.memory_id.clone(),
                activation,
                components,
                gating: gate.clone(),
                rank: 0,
            };
            if gate.allowed {
                allowed.push(result);
            } else {
                denied.push(result);
            }
        }

        // Deterministic order: activation descending, memory ID ascending.
        allowed.sort_by(|a, b| {
            b.activation
                .partial_cmp(&a.activation)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.memory_id.cmp(&b.memory_id))
        });
        for (rank, result) in allowed.iter_mut().enumerate() {
            result.rank = rank;
        }

        denied.sort_by(|a, b| a.memory_id.cmp(&b.memory_id));
        for result in &mut denied {
            result.rank = DENIED_RANK;
        }

        let mut all = allowed;
        all.extend(denied);

        let explanation = (!all.is_empty()).then(|| RetrievalExplanation {
            id: uuid::Uuid::new_v4().to_string(),
            organization_id: org.clone(),
            user_id: query.user_id.clone(),
            query_hash: query.query_hash(),
            retrieved_at: query.now,
            top_k: query.top_k,
            results: all.clone(),
        });

        // Return the allowed head up to top_k, denied pinned after it.
        let mut results: Vec<RankedResult> = Vec::new();
        for result in all {
            if result.rank == DENIED_RANK {
                results.push(result);
            } else if result.rank < query.top_k {
                results.push(result);
            }
        }

        debug!(
            org = %query.organization_id,
            candidates = candidates.len(),
            returned = results.len(),
            "ranking complete"
        );

        Ok(RankingOutcome {
            results,
            explanation,
        })
    }
}
