//! Engine — wires StorageEngine + SynapseConfig into the public surface.

use std::path::Path;

use chrono::Utc;
use tracing::debug;

use synapse_activation::{ExplanationLog, RetrievalRanker};
use synapse_causal::CausalLedger;
use synapse_core::config::SynapseConfig;
use synapse_core::errors::SynapseResult;
use synapse_core::model::{
    Candidate, ExplanationFilter, FeedbackSignal, QueryContext, RankedResult,
    RetrievalExplanation,
};
use synapse_core::traits::{CoactivationReport, IExplanationStorage, IStateStorage};
use synapse_graph::CoactivationMaintainer;
use synapse_maintenance::{
    AccessRecorder, CausalSweepJob, DecayCursor, DecayRefreshJob, DecayRunReport, JobBudget,
    SweepReport,
};
use synapse_storage::StorageEngine;

/// A ranking response: the ranked results, the ID of the persisted
/// explanation (absent when the log degraded or nothing was scored), and
/// any degraded-mode warnings. Warnings never fail the call.
#[derive(Debug, Clone)]
pub struct RankedResponse {
    pub results: Vec<RankedResult>,
    pub explanation_id: Option<String>,
    pub warnings: Vec<String>,
}

/// The activation engine. Safe to share behind an `Arc` — the read path
/// runs on the pool's read connections and never blocks on writers.
pub struct Engine {
    storage: StorageEngine,
    config: SynapseConfig,
}

impl Engine {
    /// Open a file-backed engine.
    pub fn open(path: &Path, config: SynapseConfig) -> SynapseResult<Self> {
        Ok(Self {
            storage: StorageEngine::open(path)?,
            config,
        })
    }

    /// Open an in-memory engine (for testing).
    pub fn open_in_memory(config: SynapseConfig) -> SynapseResult<Self> {
        Ok(Self {
            storage: StorageEngine::open_in_memory()?,
            config,
        })
    }

    /// Score, gate, and rank a candidate set, then persist the explanation.
    /// A log failure degrades to a warning on the (successful) response; a
    /// state-store failure fails the call, since scores without state would
    /// be meaningless.
    pub fn score_and_rank(
        &self,
        candidates: &[Candidate],
        query: &QueryContext,
    ) -> SynapseResult<RankedResponse> {
        let ranker = RetrievalRanker::new(&self.storage, &self.storage, &self.config);
        let outcome = ranker.score_and_rank(candidates, query)?;

        let mut warnings = Vec::new();
        let mut explanation_id = None;

        if let Some(explanation) = &outcome.explanation {
            match ExplanationLog::new(&self.storage).append(explanation) {
                Ok(()) => explanation_id = Some(explanation.id.clone()),
                Err(e) => warnings.push(format!("explanation log degraded: {e}")),
            }
        }

        Ok(RankedResponse {
            results: outcome.results,
            explanation_id,
            warnings,
        })
    }

    /// Persist a pre-assembled explanation (normally done by
    /// [`Engine::score_and_rank`]). Returns the explanation ID.
    pub fn write_retrieval_explanation(
        &self,
        explanation: &RetrievalExplanation,
    ) -> SynapseResult<String> {
        ExplanationLog::new(&self.storage).append(explanation)?;
        Ok(explanation.id.clone())
    }

    /// Read explanations for audit/debugging.
    pub fn read_explanations(
        &self,
        filter: &ExplanationFilter,
    ) -> SynapseResult<Vec<RetrievalExplanation>> {
        self.storage.read_explanations(filter)
    }

    /// Record that a memory was accessed (typically after a retrieval was
    /// consumed).
    pub fn record_access(&self, org: &str, memory_id: &str) -> SynapseResult<()> {
        AccessRecorder::new(&self.storage, self.config.maintenance.write_retry_attempts)
            .record_access(org, memory_id, Utc::now())
    }

    /// Record that a set of memories was used together with `primary_id`.
    pub fn record_coactivation(
        &self,
        org: &str,
        primary_id: &str,
        coactivated_ids: &[String],
    ) -> SynapseResult<CoactivationReport> {
        CoactivationMaintainer::new(&self.storage, &self.config.graph).record_coactivation(
            org,
            primary_id,
            coactivated_ids,
            Utc::now(),
        )
    }

    /// Record an explicit feedback signal against a memory.
    pub fn record_feedback(
        &self,
        org: &str,
        memory_id: &str,
        signal: FeedbackSignal,
    ) -> SynapseResult<()> {
        AccessRecorder::new(&self.storage, self.config.maintenance.write_retry_attempts)
            .record_feedback(org, memory_id, signal, Utc::now())
    }

    /// Mark a memory as contradicted (or clear the flag).
    pub fn set_contradicted(
        &self,
        org: &str,
        memory_id: &str,
        contradicted: bool,
    ) -> SynapseResult<()> {
        self.storage.set_contradicted(org, memory_id, contradicted)
    }

    /// Handle on the causal hypothesis ledger.
    pub fn causal(&self) -> CausalLedger<'_> {
        CausalLedger::new(&self.storage)
    }

    /// Run the nightly edge-decay refresh under a time budget.
    pub fn run_decay_refresh(
        &self,
        budget: &JobBudget,
        resume: Option<DecayCursor>,
    ) -> SynapseResult<DecayRunReport> {
        debug!("starting decay refresh");
        DecayRefreshJob::new(
            &self.storage,
            &self.storage,
            &self.config.graph,
            &self.config.maintenance,
        )
        .run(Utc::now(), budget, resume)
    }

    /// Run the causal promotion sweep under a time budget.
    pub fn run_causal_sweep(
        &self,
        budget: &JobBudget,
        resume_org: Option<&str>,
    ) -> SynapseResult<SweepReport> {
        debug!("starting causal sweep");
        CausalSweepJob::new(&self.storage, &self.storage).run(Utc::now(), budget, resume_org)
    }

    pub fn storage(&self) -> &StorageEngine {
        &self.storage
    }

    pub fn config(&self) -> &SynapseConfig {
        &self.config
    }
}
