// ============================================================
// Layer 3 — Prediction Types
// ============================================================
// The model scores a record with two class probabilities:
//   index 0 → stay
//   index 1 → resign
// A fixed calibration threshold on the resign probability turns
// that into a verdict. The comparison is inclusive: a probability
// equal to the threshold already counts as RESIGN.

use std::fmt;

use serde::Serialize;

use crate::domain::error::InferenceError;

/// Calibrated cutoff on P(resign), shipped with the trained model.
pub const DEFAULT_THRESHOLD: f64 = 0.027;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Resign,
    Stay,
}

impl Verdict {
    pub fn classify(probability: f64, threshold: f64) -> Self {
        if probability >= threshold {
            Verdict::Resign
        } else {
            Verdict::Stay
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Resign => "RESIGN",
            Verdict::Stay   => "STAY",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassProbabilities {
    pub stay:   f64,
    pub resign: f64,
}

impl ClassProbabilities {
    /// Read a `[stay, resign]` probability vector.
    pub fn from_slice(probs: &[f64]) -> Result<Self, InferenceError> {
        match probs {
            [stay, resign] => Ok(Self { stay: *stay, resign: *resign }),
            other => Err(InferenceError::ClassCount(other.len())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    /// P(resign) as reported by the model.
    pub probability: f64,
    pub verdict:     Verdict,
}

impl PredictionResult {
    pub fn new(probability: f64, threshold: f64) -> Self {
        Self { probability, verdict: Verdict::classify(probability, threshold) }
    }
}
