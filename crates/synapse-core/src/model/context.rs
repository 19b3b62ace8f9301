use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Visibility scope of a memory or a query, ordered by breadth:
/// `Private < Project < Team < Organization`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Private,
    Project,
    Team,
    Organization,
}

impl Scope {
    /// Breadth rank; higher is broader.
    pub fn breadth(self) -> u8 {
        match self {
            Self::Private => 0,
            Self::Project => 1,
            Self::Team => 2,
            Self::Organization => 3,
        }
    }
}

/// Sensitivity classification, ordered `Public < Internal < Confidential <
/// Restricted`. Drives the `risk` component and policy gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Public,
    Internal,
    Confidential,
    Restricted,
}

impl Classification {
    /// Baseline risk contribution of this sensitivity level.
    pub fn sensitivity(self) -> f64 {
        match self {
            Self::Public => 0.1,
            Self::Internal => 0.3,
            Self::Confidential => 0.6,
            Self::Restricted => 0.9,
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Self::Public => 0,
            Self::Internal => 1,
            Self::Confidential => 2,
            Self::Restricted => 3,
        }
    }
}

/// Metadata the caller supplies for each candidate memory. The engine never
/// holds content — only the fields scoring and gating need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryMetadata {
    pub scope: Scope,
    pub episode_id: Option<String>,
    pub goal_id: Option<String>,
    pub classification: Classification,
    /// Independent evidence links/sources backing this memory.
    pub evidence_count: u32,
}

impl Default for MemoryMetadata {
    fn default() -> Self {
        Self {
            scope: Scope::Team,
            episode_id: None,
            goal_id: None,
            classification: Classification::Internal,
            evidence_count: 0,
        }
    }
}

/// Access decision input, per candidate. Either the policy owner hands the
/// engine a precomputed decision, or enough metadata to derive one
/// consistently — the engine invents no authorization logic of its own.
#[derive(Debug, Clone)]
pub enum GateInput {
    Precomputed { allowed: bool, reason: Option<String> },
    Policy { clearance: Classification },
}

/// The applied access decision, recorded in the explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl GateDecision {
    pub fn allowed() -> Self {
        Self { allowed: true, reason: None }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// One candidate handed to the ranker: the ID and similarity from the
/// vector backend, plus metadata and gating input from the caller.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub memory_id: String,
    /// Raw similarity from the upstream search; untrusted magnitude.
    pub similarity: f64,
    pub metadata: MemoryMetadata,
    pub gate: GateInput,
}

/// The query-side context for one retrieval call.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub organization_id: String,
    pub user_id: String,
    pub query_text: String,
    pub scope: Scope,
    pub episode_id: Option<String>,
    pub goal_id: Option<String>,
    pub top_k: usize,
    pub now: DateTime<Utc>,
}

impl QueryContext {
    /// blake3 hex digest of the query text, stored on explanation rows.
    pub fn query_hash(&self) -> String {
        blake3::hash(self.query_text.as_bytes()).to_hex().to_string()
    }
}

/// An explicit feedback signal against a memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSignal {
    Positive,
    Negative,
}
