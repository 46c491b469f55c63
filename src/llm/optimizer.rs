// ============================================================
// Layer 5 — Prompt Optimizer Boundary
// ============================================================
// The capability boundary for the external optimization
// collaborator: anything that, given a classifier and labelled
// data, can search for a better prompt configuration.
//
// The internal search strategy is opaque to the rest of the
// pipeline. The orchestrator (Layer 2) only relies on this
// contract:
//   - Ok(classifier) → an improved (or equal) classifier
//   - Err(_)         → the search failed; the orchestrator
//                      falls back to the unoptimized classifier
//
// Implementations:
//   - BootstrapFewShot → the shipped demo-bootstrapping pass
//   - (future) an instruction-search optimizer

use anyhow::Result;

use crate::domain::example::CitationExample;
use crate::domain::traits::IntentPrediction;
use crate::llm::classifier::CitationClassifier;

/// The scoring metric handed to an optimizer: 1 for a correct
/// prediction, 0 for anything else. A plain fn pointer — the
/// metric is a pure function.
pub type MetricFn = fn(&CitationExample, &IntentPrediction) -> u32;

/// Bounds on how many demonstrations an optimizer may attach.
#[derive(Debug, Clone, Copy)]
pub struct DemoBudget {
    /// Demos bootstrapped from the classifier's own correct
    /// predictions on the trainset
    pub max_bootstrapped: usize,

    /// Manually labelled demos taken verbatim from the trainset;
    /// zero when none are supplied
    pub max_labeled: usize,
}

/// The external optimization collaborator.
pub trait PromptOptimizer {
    /// Search for an improved configuration of `classifier`,
    /// training on `trainset` and validating on `devset`.
    fn optimize(
        &self,
        classifier: &CitationClassifier,
        trainset:   &[CitationExample],
        devset:     &[CitationExample],
        metric:     MetricFn,
        budget:     &DemoBudget,
    ) -> Result<CitationClassifier>;

    /// A short optimizer identifier for logs.
    fn name(&self) -> &str;
}
