// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only:
//   - No model math or burn code here
//   - No HTML or printing here (that's Layer 1)
//   - No direct file formats for the artifact (that's Layer 6)

// One form submission → verdict
pub mod predict_use_case;

// Model load + HTTP form server startup
pub mod serve_use_case;
