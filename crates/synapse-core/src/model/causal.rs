use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::score::Score;

/// The causal relation a hypothesis asserts between two events/episodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CausalRelation {
    Causes,
    LeadsTo,
    Blocks,
    Resolves,
    Correlates,
}

impl CausalRelation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Causes => "causes",
            Self::LeadsTo => "leads_to",
            Self::Blocks => "blocks",
            Self::Resolves => "resolves",
            Self::Correlates => "correlates",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "causes" => Some(Self::Causes),
            "leads_to" => Some(Self::LeadsTo),
            "blocks" => Some(Self::Blocks),
            "resolves" => Some(Self::Resolves),
            "correlates" => Some(Self::Correlates),
            _ => None,
        }
    }
}

/// Hypothesis lifecycle. Created `Proposed`; evidence drives it to
/// `Active` or `Contested`; `Rejected` is terminal. Never deleted — the
/// status carries the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HypothesisStatus {
    Proposed,
    Active,
    Contested,
    Rejected,
}

impl HypothesisStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::Active => "active",
            Self::Contested => "contested",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "proposed" => Some(Self::Proposed),
            "active" => Some(Self::Active),
            "contested" => Some(Self::Contested),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// A recorded cause/effect hypothesis linking events or episodes, backed by
/// evidence memories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CausalHypothesis {
    pub id: String,
    pub organization_id: String,
    pub episode_id: Option<String>,
    pub from_event_id: Option<String>,
    pub to_event_id: Option<String>,
    pub relation: CausalRelation,
    pub confidence: Score,
    /// Evidence memory IDs, set semantics (no duplicates).
    pub evidence_memory_ids: Vec<String>,
    pub status: HypothesisStatus,
    /// Evaluation reason recorded on contest/reject.
    pub status_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
