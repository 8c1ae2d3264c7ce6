// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting plumbing around the model artifact:
//
//   model_store.rs — reading (and writing) a model directory:
//                    model_schema.json + burn CompactRecorder
//                    weights, validated against each other and
//                    against the form's feature set
//
//   model_cell.rs  — the process-wide, load-once handle that
//                    every session and request shares
//
// Reference: Burn Book §5 (Records and Checkpointing)

/// Model directory loading and saving
pub mod model_store;

/// Load-once shared model handle
pub mod model_cell;
