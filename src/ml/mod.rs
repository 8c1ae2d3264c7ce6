// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code, apart
// from the recorder calls in infra/model_store.rs.
//
//   model.rs      — AttritionModel: encoded features → hidden
//                   ReLU layer → two logits (stay, resign)
//
//   classifier.rs — Classifier: a loaded model plus its schema,
//                   implementing the domain AttritionScorer trait
//
// Training is not part of this crate; the weights are produced
// elsewhere and only ever read here.

/// Attrition MLP architecture
pub mod model;

/// Loaded model + schema → AttritionScorer
pub mod classifier;
