//! CRUD-with-lifecycle over causal hypotheses.

use chrono::{DateTime, Utc};
use tracing::debug;

use synapse_core::constants::{
    CAUSAL_ACTIVATION_CONFIDENCE_MIN, CAUSAL_ACTIVATION_EVIDENCE_MIN,
};
use synapse_core::errors::{CausalError, SynapseError, SynapseResult};
use synapse_core::model::{CausalHypothesis, CausalRelation, HypothesisStatus, Score};
use synapse_core::traits::ICausalStorage;

/// Confidence bump per evidence contribution.
const EVIDENCE_CONFIDENCE_BUMP: f64 = 0.1;

/// The fields a caller supplies when proposing a hypothesis.
#[derive(Debug, Clone)]
pub struct HypothesisDraft {
    pub relation: CausalRelation,
    pub evidence_memory_ids: Vec<String>,
    pub confidence: f64,
    pub episode_id: Option<String>,
    pub from_event_id: Option<String>,
    pub to_event_id: Option<String>,
}

/// The hypothesis ledger. Every transition goes through this API; there is
/// no reason-less path to `rejected`, so an unevaluated
/// `proposed → rejected` jump cannot happen.
pub struct CausalLedger<'a> {
    storage: &'a dyn ICausalStorage,
}

impl<'a> CausalLedger<'a> {
    pub fn new(storage: &'a dyn ICausalStorage) -> Self {
        Self { storage }
    }

    /// Create a new hypothesis in `proposed` status.
    pub fn propose(
        &self,
        org: &str,
        draft: HypothesisDraft,
        now: DateTime<Utc>,
    ) -> SynapseResult<CausalHypothesis> {
        let mut evidence = draft.evidence_memory_ids;
        evidence.sort();
        evidence.dedup();

        let hypothesis = CausalHypothesis {
            id: uuid::Uuid::new_v4().to_string(),
            organization_id: org.to_string(),
            episode_id: draft.episode_id,
            from_event_id: draft.from_event_id,
            to_event_id: draft.to_event_id,
            relation: draft.relation,
            confidence: Score::new(draft.confidence),
            evidence_memory_ids: evidence,
            status: HypothesisStatus::Proposed,
            status_reason: None,
            created_at: now,
            updated_at: now,
        };
        self.storage.insert_hypothesis(&hypothesis)?;
        debug!(org, id = %hypothesis.id, relation = hypothesis.relation.as_str(), "hypothesis proposed");
        Ok(hypothesis)
    }

    /// Append evidence (set semantics) and bump confidence. A `proposed`
    /// hypothesis that reaches the evidence and confidence thresholds is
    /// promoted to `active`.
    pub fn add_evidence(
        &self,
        org: &str,
        id: &str,
        memory_ids: &[String],
        now: DateTime<Utc>,
    ) -> SynapseResult<CausalHypothesis> {
        let mut hypothesis = self.load(org, id)?;
        if hypothesis.status == HypothesisStatus::Rejected {
            return Err(illegal(hypothesis.status, HypothesisStatus::Active));
        }

        let mut grew = false;
        for memory_id in memory_ids {
            if !hypothesis.evidence_memory_ids.contains(memory_id) {
                hypothesis.evidence_memory_ids.push(memory_id.clone());
                grew = true;
            }
        }
        if grew {
            hypothesis.confidence =
                Score::new(hypothesis.confidence.value() + EVIDENCE_CONFIDENCE_BUMP);
        }

        if hypothesis.status == HypothesisStatus::Proposed
            && hypothesis.evidence_memory_ids.len() >= CAUSAL_ACTIVATION_EVIDENCE_MIN
            && hypothesis.confidence.value() >= CAUSAL_ACTIVATION_CONFIDENCE_MIN
        {
            hypothesis.status = HypothesisStatus::Active;
            debug!(org, id, "hypothesis promoted to active");
        }

        hypothesis.updated_at = now;
        self.storage.update_hypothesis(&hypothesis)?;
        Ok(hypothesis)
    }

    /// Conflicting evidence: move to `contested`, recording the conflict.
    pub fn contest(
        &self,
        org: &str,
        id: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> SynapseResult<CausalHypothesis> {
        if reason.trim().is_empty() {
            return Err(SynapseError::Causal(CausalError::ReasonRequired {
                operation: "contest",
            }));
        }
        let mut hypothesis = self.load(org, id)?;
        if hypothesis.status == HypothesisStatus::Rejected {
            return Err(illegal(hypothesis.status, HypothesisStatus::Contested));
        }

        hypothesis.status = HypothesisStatus::Contested;
        hypothesis.status_reason = Some(reason.to_string());
        hypothesis.updated_at = now;
        self.storage.update_hypothesis(&hypothesis)?;
        debug!(org, id, "hypothesis contested");
        Ok(hypothesis)
    }

    /// Terminal rejection. The mandatory reason is the recorded evaluation,
    /// so rejecting a `proposed` hypothesis cannot skip the evaluation step.
    pub fn reject(
        &self,
        org: &str,
        id: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> SynapseResult<CausalHypothesis> {
        if reason.trim().is_empty() {
            return Err(SynapseError::Causal(CausalError::ReasonRequired {
                operation: "reject",
            }));
        }
        let mut hypothesis = self.load(org, id)?;
        if hypothesis.status == HypothesisStatus::Rejected {
            return Err(illegal(hypothesis.status, HypothesisStatus::Rejected));
        }

        hypothesis.status = HypothesisStatus::Rejected;
        hypothesis.status_reason = Some(reason.to_string());
        hypothesis.updated_at = now;
        self.storage.update_hypothesis(&hypothesis)?;
        debug!(org, id, "hypothesis rejected");
        Ok(hypothesis)
    }

    pub fn get(&self, org: &str, id: &str) -> SynapseResult<Option<CausalHypothesis>> {
        self.storage.get_hypothesis(org, id)
    }

    pub fn list_by_status(
        &self,
        org: &str,
        status: HypothesisStatus,
        limit: usize,
    ) -> SynapseResult<Vec<CausalHypothesis>> {
        self.storage.list_by_status(org, status, limit)
    }

    fn load(&self, org: &str, id: &str) -> SynapseResult<CausalHypothesis> {
        self.storage
            .get_hypothesis(org, id)?
            .ok_or_else(|| SynapseError::Causal(CausalError::NotFound { id: id.to_string() }))
    }
}

fn illegal(from: HypothesisStatus, to: HypothesisStatus) -> SynapseError {
    SynapseError::Causal(CausalError::IllegalTransition {
        from: from.as_str().to_string(),
        to: to.as_str().to_string(),
    })
}
