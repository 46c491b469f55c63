// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (optimizing the classifier or classifying
// a citation).
//
// Rules for this layer:
//   - No prompt text or backend code here
//   - No UI or printing here (that's Layer 1)
//   - No direct file parsing (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The optimization workflow: load → restore → guard → optimize → persist
pub mod optimize_use_case;

// The inference workflow: restore → classify → inspect
pub mod classify_use_case;
