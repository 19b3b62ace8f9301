use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::GraphError;

/// An unordered memory pair in canonical orientation: `a` is always the
/// lexicographically smaller ID. The constructor is the only way to build
/// one, so a self-loop or reversed pair cannot reach the write path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoryPair {
    a: String,
    b: String,
}

impl MemoryPair {
    /// Canonicalize two memory IDs into a pair. Self-loops are rejected.
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Result<Self, GraphError> {
        let x = x.into();
        let y = y.into();
        if x == y {
            return Err(GraphError::SelfLoop { memory_id: x });
        }
        if x < y {
            Ok(Self { a: x, b: y })
        } else {
            Ok(Self { a: y, b: x })
        }
    }

    pub fn a(&self) -> &str {
        &self.a
    }

    pub fn b(&self) -> &str {
        &self.b
    }
}

/// A weighted co-retrieval edge. Unique per unordered pair per org;
/// `edge_weight = 1 − exp(−λ · coactivation_count)`, strictly below 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoactivationEdge {
    pub organization_id: String,
    pub memory_id_a: String,
    pub memory_id_b: String,
    pub coactivation_count: u64,
    pub edge_weight: f64,
    pub last_coactivated_at: DateTime<Utc>,
    /// Guard for the nightly decay refresh: a retry within the same decay
    /// period is a no-op.
    pub last_decayed_at: Option<DateTime<Utc>>,
}

impl CoactivationEdge {
    /// The weight curve: `1 − exp(−λ·count)`. Monotonically increasing in
    /// count, asymptotic to 1, never reaching it.
    pub fn weight_for(count: u64, lambda: f64) -> f64 {
        1.0 - (-lambda * count as f64).exp()
    }

    /// Does this edge touch the given memory?
    pub fn touches(&self, memory_id: &str) -> bool {
        self.memory_id_a == memory_id || self.memory_id_b == memory_id
    }

    /// The other endpoint, if `memory_id` is one of the two.
    pub fn other(&self, memory_id: &str) -> Option<&str> {
        if self.memory_id_a == memory_id {
            Some(&self.memory_id_b)
        } else if self.memory_id_b == memory_id {
            Some(&self.memory_id_a)
        } else {
            None
        }
    }
}
