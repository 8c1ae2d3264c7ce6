// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only ever talks to a scorer through this
// trait. The burn classifier in Layer 5 implements it; tests swap
// in stubs that return fixed probabilities.

use crate::domain::error::InferenceError;
use crate::domain::feature_record::FeatureRecord;
use crate::domain::prediction::{ClassProbabilities, DEFAULT_THRESHOLD};

// ─── AttritionScorer ──────────────────────────────────────────────────────────
/// A loaded, immutable model that scores one record at a time.
///
/// Implementations:
///   - Classifier → burn MLP loaded from a model directory
pub trait AttritionScorer: Send + Sync {
    /// Probabilities for `[stay, resign]`.
    fn predict_proba(&self, record: &FeatureRecord) -> Result<ClassProbabilities, InferenceError>;

    /// The calibration cutoff that belongs with this model.
    fn decision_threshold(&self) -> f64 {
        DEFAULT_THRESHOLD
    }
}
