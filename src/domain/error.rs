// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
//   FieldError       — a widget rejected a raw input value
//   ValidationError  — the form is not ready for prediction
//   ModelLoadError   — the artifact cannot be used (fatal)
//   InferenceError   — scoring a record failed (surfaced as-is)

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::form::Field;

/// A raw value that a form widget refused to store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("'{raw}' is not a number for field '{field}'")]
    NotANumber { field: Field, raw: String },

    #[error("'{raw}' is not one of the options for field '{field}'")]
    NotAnOption { field: Field, raw: String },
}

/// Recoverable: the user fixes the form and submits again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("⚠️ Please fill all required fields before predicting.")]
    IncompleteForm { missing: Vec<Field> },
}

impl ValidationError {
    /// Fields that blocked the submission, in form order.
    pub fn missing(&self) -> &[Field] {
        match self {
            ValidationError::IncompleteForm { missing } => missing,
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model artifact not found at '{}'", path.display())]
    Missing { path: PathBuf },

    #[error("model artifact '{}' is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("unsupported model schema version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error(
        "model schema does not match the form's feature set \
         (missing: {missing:?}, unexpected: {unexpected:?})"
    )]
    SchemaMismatch {
        missing:    Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("invalid model schema: {0}")]
    InvalidSchema(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("feature '{0}' is not part of the record")]
    MissingFeature(String),

    #[error("feature '{name}' expects a {expected} value")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("encoded {found} inputs but the model expects {expected}")]
    InputWidth { found: usize, expected: usize },

    #[error("model returned {0} class probabilities, expected 2")]
    ClassCount(usize),

    #[error("model backend failure: {0}")]
    Backend(String),
}
