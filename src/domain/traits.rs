// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - CsvExampleSource implements ExampleSource
//   - A future ParquetSource could also implement ExampleSource
//   - The application layer only sees ExampleSource
//     and works with both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;

use crate::domain::example::{CitationExample, SampleMode};
use crate::domain::intent::CitationIntent;
use crate::domain::program::Demo;

// ─── ExampleSource ────────────────────────────────────────────────────────────
/// Any component that can materialise labelled citation examples.
///
/// Implementations:
///   - CsvExampleSource → loads from a CSV file
///   - (future) ParquetSource → loads from Parquet files
///
/// Loading never hard-fails: a missing file, missing columns, or
/// an empty source yields an empty Vec plus a logged diagnostic,
/// and the caller decides how to proceed with no usable data.
pub trait ExampleSource {
    /// Load examples according to the given sampling mode.
    /// `classes` is the fixed list of valid labels, consulted
    /// only by balanced mode.
    fn load(&self, classes: &[CitationIntent], mode: &SampleMode) -> Vec<CitationExample>;
}

// ─── ReasoningBackend ─────────────────────────────────────────────────────────
/// One fully assembled inference request: the inputs of a single
/// classification plus the classifier's current prompt state.
#[derive(Debug, Clone)]
pub struct PredictRequest<'a> {
    pub citation:     &'a str,
    pub section:      &'a str,
    pub instructions: &'a str,
    pub demos:        &'a [Demo],
}

/// The structured output of one inference call.
///
/// `intent` is optional by design: a backend that fails to produce
/// a usable label returns None rather than some sentinel string,
/// and the metric scores that as 0. Absence is a normal, typed
/// state — not a capability to probe for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentPrediction {
    /// The predicted label. Not validated against the six-value
    /// set — an out-of-set label passes through and simply never
    /// matches during scoring.
    pub intent: Option<String>,

    /// An optional reasoning trace explaining the label.
    pub reasoning: Option<String>,
}

/// The external reasoning collaborator behind the classifier.
///
/// Implementations:
///   - LexiconBackend → deterministic cue-phrase scorer (offline)
///   - (future) an HTTP-backed LLM client
///
/// A backend may fail (network/API errors); such failures propagate
/// to the immediate caller, which decides whether it can tolerate
/// aborting. This layer defines no retry or timeout policy.
pub trait ReasoningBackend: Send + Sync {
    /// Run one classification request.
    fn predict(&self, request: &PredictRequest<'_>) -> Result<IntentPrediction>;

    /// A short backend identifier for logs and reports.
    fn name(&self) -> &str;
}
