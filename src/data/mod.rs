// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a filled-in form and model-ready numbers:
//
//   FormState
//       │
//       ▼
//   validator       → gate: required choices, salary, remote work
//       │
//       ▼
//   FeatureRecord   → (domain) renamed, schema-exact row
//       │
//       ▼
//   encoder         → standardise numerics, one-hot categories
//       │
//       ▼
//   Vec<f32>        → handed to the burn model in Layer 5

/// Completeness checks that gate the model call
pub mod validator;

/// FeatureRecord → numeric input vector
pub mod encoder;
