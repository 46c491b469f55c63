// ============================================================
// Layer 5 — BootstrapFewShot Optimizer
// ============================================================
// The shipped optimization collaborator. It performs one
// bootstrapping pass, not an instruction search:
//
//   Step 1: Run the current classifier over the trainset and
//           keep every example it labels correctly — together
//           with the reasoning trace that produced the label —
//           as a prompt demonstration, up to max_bootstrapped.
//   Step 2: Append up to max_labeled raw labelled examples
//           (no reasoning) from the trainset.
//   Step 3: Evaluate the candidate configuration against the
//           unoptimized baseline on the devset and keep
//           whichever scores higher (ties go to the candidate;
//           an empty devset accepts the candidate outright).
//
// A backend failure on a single trainset example is logged and
// skipped — bootstrapping works with whatever predictions it
// can get. The instructions are carried over unchanged.

use anyhow::Result;

use crate::domain::example::CitationExample;
use crate::domain::program::{Demo, PredictorConfiguration};
use crate::infra::metrics::evaluate;
use crate::llm::classifier::CitationClassifier;
use crate::llm::optimizer::{DemoBudget, MetricFn, PromptOptimizer};

/// Few-shot demo bootstrapping. Stateless.
pub struct BootstrapFewShot;

impl BootstrapFewShot {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BootstrapFewShot {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptOptimizer for BootstrapFewShot {
    fn optimize(
        &self,
        classifier: &CitationClassifier,
        trainset:   &[CitationExample],
        devset:     &[CitationExample],
        metric:     MetricFn,
        budget:     &DemoBudget,
    ) -> Result<CitationClassifier> {
        // ── Step 1: bootstrap demos from correct predictions ─────────────────
        let mut demos: Vec<Demo> = Vec::new();

        for example in trainset {
            if demos.len() >= budget.max_bootstrapped {
                break;
            }
            match classifier.classify(&example.citation, &example.section) {
                Ok(prediction) => {
                    if metric(example, &prediction) == 1 {
                        let mut demo = Demo::from_example(example);
                        if let Some(reasoning) = prediction.reasoning {
                            demo = demo.with_reasoning(reasoning);
                        }
                        demos.push(demo);
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping trainset example during bootstrapping: {:#}", e);
                }
            }
        }
        let bootstrapped = demos.len();

        // ── Step 2: append raw labelled demos ────────────────────────────────
        let mut labeled = 0usize;
        for example in trainset {
            if labeled >= budget.max_labeled {
                break;
            }
            let already_used = demos
                .iter()
                .any(|d| d.citation == example.citation && d.section == example.section);
            if already_used {
                continue;
            }
            demos.push(Demo::from_example(example));
            labeled += 1;
        }

        tracing::info!(
            "Bootstrapped {} demo(s), appended {} labelled demo(s) from {} training examples",
            bootstrapped,
            labeled,
            trainset.len()
        );

        // ── Step 3: keep the better of candidate and baseline ────────────────
        let mut candidate = classifier.clone();
        candidate.set_configuration(
            PredictorConfiguration::new(classifier.configuration().instructions.clone())
                .with_demos(demos),
        );

        if devset.is_empty() {
            tracing::info!("Devset is empty — accepting the bootstrapped candidate unvalidated");
            return Ok(candidate);
        }

        let baseline_score  = evaluate(classifier, devset, metric);
        let candidate_score = evaluate(&candidate, devset, metric);
        tracing::info!(
            "Devset accuracy: baseline {:.3} vs candidate {:.3}",
            baseline_score.accuracy(),
            candidate_score.accuracy()
        );

        if candidate_score.accuracy() >= baseline_score.accuracy() {
            Ok(candidate)
        } else {
            tracing::info!("Candidate underperformed the baseline — keeping the original configuration");
            Ok(classifier.clone())
        }
    }

    fn name(&self) -> &str {
        "bootstrap-few-shot"
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::{IntentPrediction, PredictRequest, ReasoningBackend};
    use crate::infra::metrics::exact_match_score;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Answers from a fixed citation → intent table; anything
    /// unknown gets no intent at all.
    struct TableBackend {
        answers: HashMap<String, String>,
    }

    impl TableBackend {
        fn new(pairs: &[(&str, &str)]) -> Arc<Self> {
            Arc::new(Self {
                answers: pairs
                    .iter()
                    .map(|(c, i)| (c.to_string(), i.to_string()))
                    .collect(),
            })
        }
    }

    impl ReasoningBackend for TableBackend {
        fn predict(&self, request: &PredictRequest<'_>) -> Result<IntentPrediction> {
            Ok(IntentPrediction {
                intent:    self.answers.get(request.citation).cloned(),
                reasoning: Some("table lookup".to_string()),
            })
        }

        fn name(&self) -> &str {
            "table"
        }
    }

    /// Correct on every example until demos appear in the prompt,
    /// then always wrong — a candidate that must be rejected.
    struct DemoAllergicBackend;

    impl ReasoningBackend for DemoAllergicBackend {
        fn predict(&self, request: &PredictRequest<'_>) -> Result<IntentPrediction> {
            let intent = if request.demos.is_empty() { "support" } else { "differ" };
            Ok(IntentPrediction {
                intent:    Some(intent.to_string()),
                reasoning: None,
            })
        }

        fn name(&self) -> &str {
            "demo-allergic"
        }
    }

    fn example(citation: &str, intent: &str) -> CitationExample {
        CitationExample::new(citation, "Bulgular", intent)
    }

    #[test]
    fn test_bootstraps_only_correct_predictions_up_to_budget() {
        let backend = TableBackend::new(&[
            ("a", "support"),
            ("b", "differ"),   // wrong label below → not bootstrapped
            ("c", "support"),
            ("d", "support"),
        ]);
        let classifier = CitationClassifier::new(backend);
        let trainset = vec![
            example("a", "support"),
            example("b", "support"),
            example("c", "support"),
            example("d", "support"),
        ];

        let budget    = DemoBudget { max_bootstrapped: 2, max_labeled: 0 };
        let optimized = BootstrapFewShot::new()
            .optimize(&classifier, &trainset, &[], exact_match_score, &budget)
            .unwrap();

        let demos = &optimized.configuration().demos;
        assert_eq!(demos.len(), 2);
        assert_eq!(demos[0].citation, "a");
        assert_eq!(demos[1].citation, "c");
        assert_eq!(demos[0].reasoning.as_deref(), Some("table lookup"));
    }

    #[test]
    fn test_labeled_demos_fill_in_without_duplicates() {
        let backend    = TableBackend::new(&[("a", "support")]);
        let classifier = CitationClassifier::new(backend);
        let trainset   = vec![example("a", "support"), example("b", "support")];

        let budget    = DemoBudget { max_bootstrapped: 6, max_labeled: 2 };
        let optimized = BootstrapFewShot::new()
            .optimize(&classifier, &trainset, &[], exact_match_score, &budget)
            .unwrap();

        let demos = &optimized.configuration().demos;
        // "a" was bootstrapped; only "b" qualifies as a labelled demo
        assert_eq!(demos.len(), 2);
        assert_eq!(demos[1].citation, "b");
        assert_eq!(demos[1].reasoning, None);
    }

    #[test]
    fn test_candidate_worse_on_devset_is_rejected() {
        let classifier = CitationClassifier::new(Arc::new(DemoAllergicBackend));
        let trainset   = vec![example("t1", "support"), example("t2", "support")];
        let devset     = vec![example("d1", "support"), example("d2", "support")];

        let budget    = DemoBudget { max_bootstrapped: 6, max_labeled: 0 };
        let optimized = BootstrapFewShot::new()
            .optimize(&classifier, &trainset, &devset, exact_match_score, &budget)
            .unwrap();

        // With demos attached the backend scores 0 on the devset,
        // so the original zero-demo configuration must survive.
        assert!(optimized.configuration().demos.is_empty());
    }

    #[test]
    fn test_empty_devset_accepts_candidate() {
        let classifier = CitationClassifier::new(Arc::new(DemoAllergicBackend));
        let trainset   = vec![example("t1", "support")];

        let budget    = DemoBudget { max_bootstrapped: 6, max_labeled: 0 };
        let optimized = BootstrapFewShot::new()
            .optimize(&classifier, &trainset, &[], exact_match_score, &budget)
            .unwrap();

        assert_eq!(optimized.configuration().demos.len(), 1);
    }
}
