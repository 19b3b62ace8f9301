use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::score::Score;

/// Per-memory scoring state. Exactly one row per
/// (`organization_id`, `memory_id`); created lazily on first scoring or
/// access event, mutated only by maintainers or explicit feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationState {
    pub memory_id: String,
    pub organization_id: String,
    /// Baseline importance assigned at creation or by curation.
    pub base_importance: Score,
    /// How much the system trusts this memory's content.
    pub confidence: Score,
    /// Set when contradicting evidence was recorded against this memory.
    pub contradicted: bool,
    /// Intrinsic risk independent of classification (e.g. unverified source).
    pub risk_factor: Score,
    pub access_count: u64,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Explicit positive feedback signals recorded against this memory.
    pub positive_feedback: u32,
    /// Explicit negative feedback signals recorded against this memory.
    pub negative_feedback: u32,
}

impl ActivationState {
    /// The lazy-creation default: the row a memory gets the first time it is
    /// scored or accessed.
    pub fn new_default(
        organization_id: impl Into<String>,
        memory_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            memory_id: memory_id.into(),
            organization_id: organization_id.into(),
            base_importance: Score::new(Score::DEFAULT_IMPORTANCE),
            confidence: Score::new(Score::DEFAULT_CONFIDENCE),
            contradicted: false,
            risk_factor: Score::default(),
            access_count: 0,
            last_accessed_at: None,
            created_at: now,
            positive_feedback: 0,
            negative_feedback: 0,
        }
    }

    /// Age in whole days at `now`, measured from the most recent of
    /// `last_accessed_at` and `created_at`. A state that was never accessed
    /// ages from creation.
    pub fn age_days(&self, now: DateTime<Utc>) -> f64 {
        let reference = match self.last_accessed_at {
            Some(accessed) => accessed.max(self.created_at),
            None => self.created_at,
        };
        ((now - reference).num_seconds().max(0) as f64) / 86_400.0
    }
}

/// Identity equality: one state per (org, memory).
impl PartialEq for ActivationState {
    fn eq(&self, other: &Self) -> bool {
        self.organization_id == other.organization_id && self.memory_id == other.memory_id
    }
}
