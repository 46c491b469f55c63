// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles all cross-cutting concerns that don't belong in
// any specific business layer:
//
//   program_store.rs — Persistence of the optimized program.
//                      Serialises the classifier's
//                      PredictorConfiguration to JSON and
//                      restores it at startup. A failed load
//                      is an error the caller catches, falling
//                      back to a fresh classifier.
//
//   metrics.rs       — Scoring and evaluation.
//                      The exact-match metric, tolerant batch
//                      evaluation, and a CSV logger that keeps
//                      a permanent record of optimization runs.
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//     (e.g. swap the JSON file for a blob store)
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Optimized-program saving and loading
pub mod program_store;

/// Exact-match metric, evaluation, and run metrics CSV
pub mod metrics;
