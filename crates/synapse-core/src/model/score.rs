use std::fmt;

use serde::{Deserialize, Serialize};

/// Score clamped to [0.0, 1.0]. Used for importance, confidence, risk, and
/// every per-component value the scorer produces.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    /// Default base importance for a lazily created state row.
    pub const DEFAULT_IMPORTANCE: f64 = 0.5;
    /// Default confidence for a lazily created state row.
    pub const DEFAULT_CONFIDENCE: f64 = 0.8;

    /// Create a new Score, clamping to [0.0, 1.0]. Out-of-range input is
    /// normalized, never an error — collaborators supply untrusted magnitudes.
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self(0.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Score> for f64 {
    fn from(s: Score) -> Self {
        s.0
    }
}
