// ============================================================
// Layer 5 — Citation Classifier
// ============================================================
// The stateful intent predictor. It owns exactly one
// PredictorConfiguration and delegates every inference to the
// ReasoningBackend behind it.
//
// Responsibilities — and nothing more:
//   1. Assemble the structured request (inputs + prompt state)
//   2. Invoke the backend
//   3. Return the backend's output unchanged
//
// No retry, no caching, and no validation of the returned
// intent against the six-value set: an unexpected label passes
// through and simply never matches during scoring.
//
// The configuration is mutated only as whole-object
// replacement — by a successful optimization or by a restore
// from the program store.

use anyhow::Result;
use std::sync::Arc;

use crate::domain::program::{Demo, PredictorConfiguration};
use crate::domain::traits::{IntentPrediction, PredictRequest, ReasoningBackend};
use crate::llm::signature;

/// The LLM-backed citation intent classifier.
#[derive(Clone)]
pub struct CitationClassifier {
    config:  PredictorConfiguration,
    backend: Arc<dyn ReasoningBackend>,
}

impl CitationClassifier {
    /// A fresh, unoptimized classifier: default instructions,
    /// zero demonstrations.
    pub fn new(backend: Arc<dyn ReasoningBackend>) -> Self {
        Self {
            config: signature::default_configuration(),
            backend,
        }
    }

    /// A classifier carrying a previously learned configuration,
    /// e.g. one restored from the program store.
    pub fn with_configuration(
        backend: Arc<dyn ReasoningBackend>,
        config:  PredictorConfiguration,
    ) -> Self {
        Self { config, backend }
    }

    /// The current prompt configuration.
    pub fn configuration(&self) -> &PredictorConfiguration {
        &self.config
    }

    /// Replace the whole configuration. The only mutation the
    /// classifier supports.
    pub fn set_configuration(&mut self, config: PredictorConfiguration) {
        self.config = config;
    }

    /// Classify one citation excerpt.
    pub fn classify(&self, citation: &str, section: &str) -> Result<IntentPrediction> {
        let request = PredictRequest {
            citation,
            section,
            instructions: &self.config.instructions,
            demos:        &self.config.demos,
        };

        tracing::debug!(
            backend = self.backend.name(),
            demos = self.config.demos.len(),
            instruction_chars = self.config.instructions.len(),
            "dispatching classification request"
        );

        self.backend.predict(&request)
    }

    /// Read-only snapshot of the program for operator review.
    pub fn report(&self) -> ProgramReport {
        ProgramReport {
            backend:      self.backend.name().to_string(),
            instructions: self.config.instructions.clone(),
            demos:        self.config.demos.clone(),
        }
    }
}

/// What `inspect` shows: the current instructions and
/// demonstration list, plus which backend answers requests.
/// Purely informational — building a report has no effect on
/// pipeline state.
#[derive(Debug, Clone)]
pub struct ProgramReport {
    pub backend:      String,
    pub instructions: String,
    pub demos:        Vec<Demo>,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::CitationExample;

    /// A backend that always answers with a fixed prediction and
    /// records how many demos it was shown.
    struct FixedBackend {
        intent:    Option<String>,
        reasoning: Option<String>,
    }

    impl ReasoningBackend for FixedBackend {
        fn predict(&self, _request: &PredictRequest<'_>) -> Result<IntentPrediction> {
            Ok(IntentPrediction {
                intent:    self.intent.clone(),
                reasoning: self.reasoning.clone(),
            })
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_backend_output_passes_through_unchanged() {
        // Even a label outside the six-value set is returned as-is
        let backend = Arc::new(FixedBackend {
            intent:    Some("banana".to_string()),
            reasoning: None,
        });
        let classifier = CitationClassifier::new(backend);

        let prediction = classifier.classify("some citation", "Giriş").unwrap();
        assert_eq!(prediction.intent.as_deref(), Some("banana"));
        assert_eq!(prediction.reasoning, None);
    }

    #[test]
    fn test_fresh_classifier_reports_default_program() {
        let backend = Arc::new(FixedBackend { intent: None, reasoning: None });
        let report  = CitationClassifier::new(backend).report();

        assert_eq!(report.backend, "fixed");
        assert!(report.demos.is_empty());
        assert_eq!(report.instructions, signature::INSTRUCTIONS);
    }

    #[test]
    fn test_set_configuration_replaces_whole_object() {
        let backend        = Arc::new(FixedBackend { intent: None, reasoning: None });
        let mut classifier = CitationClassifier::new(backend);

        let example = CitationExample::new("c", "s", "basis");
        let config  = PredictorConfiguration::new("new instructions")
            .with_demos(vec![Demo::from_example(&example)]);
        classifier.set_configuration(config.clone());

        assert_eq!(classifier.configuration(), &config);
    }
}
