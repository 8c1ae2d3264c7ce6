// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types describing the attrition form and the
// contract with the prediction model.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O, HTTP, or HTML
//   - Only plain Rust structs, enums, and traits
//
// What lives here:
//
//   form.rs           — the 17 form fields, their widgets and
//                       defaults, and the per-session FormState
//   feature_record.rs — the flat record handed to the model,
//                       named exactly as the model was trained
//   schema.rs         — the versioned feature schema shipped
//                       next to the model weights
//   prediction.rs     — class probabilities, threshold, verdict
//   traits.rs         — the AttritionScorer abstraction
//   error.rs          — the error taxonomy shared by all layers

pub mod error;
pub mod feature_record;
pub mod form;
pub mod prediction;
pub mod schema;
pub mod traits;
