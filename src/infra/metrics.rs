// ============================================================
// Layer 6 — Scoring Metric & Run Metrics
// ============================================================
// The correctness metric driving optimization, a tolerant
// batch evaluator, and a CSV logger for optimization runs.
//
// Metric contract:
//   exact string match on normalized labels (trim + lowercase),
//   scored as 0 or 1. No partial credit, no semantic
//   similarity. A malformed prediction — one with no intent at
//   all — scores 0 and never raises: a single bad model output
//   during batch optimization must not abort the run.
//
// Run metrics CSV:
//   one row per optimization run, appended so a record
//   accumulates across runs.
//
// Example CSV output:
//   trainset,devset,demos,dev_accuracy,optimized
//   120,40,6,0.825000,true
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use crate::domain::example::CitationExample;
use crate::domain::traits::IntentPrediction;
use crate::llm::classifier::CitationClassifier;
use crate::llm::optimizer::MetricFn;

/// Score one (example, prediction) pair: 1 on an exact match of
/// the normalized labels, 0 otherwise — including when the
/// prediction carries no intent at all.
pub fn exact_match_score(example: &CitationExample, prediction: &IntentPrediction) -> u32 {
    let Some(predicted) = prediction.intent.as_deref() else {
        return 0;
    };

    let ground_truth = example.citation_intent.trim().to_lowercase();
    let predicted    = predicted.trim().to_lowercase();

    u32::from(ground_truth == predicted)
}

/// The outcome of evaluating a classifier over a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationSummary {
    /// Examples scored 1
    pub correct: usize,

    /// Examples evaluated
    pub total: usize,
}

impl EvaluationSummary {
    /// Fraction correct in [0.0, 1.0]; 0.0 for an empty set.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Evaluate a classifier over a whole set.
///
/// A backend failure on one example is logged and scored 0 so
/// the batch always completes — mirroring the metric's own
/// tolerance of malformed predictions.
pub fn evaluate(
    classifier: &CitationClassifier,
    examples:   &[CitationExample],
    metric:     MetricFn,
) -> EvaluationSummary {
    let mut correct = 0usize;

    for example in examples {
        match classifier.classify(&example.citation, &example.section) {
            Ok(prediction) => correct += metric(example, &prediction) as usize,
            Err(e) => {
                tracing::warn!("Inference failed during evaluation, scoring 0: {:#}", e);
            }
        }
    }

    EvaluationSummary { correct, total: examples.len() }
}

/// One row of the run metrics CSV.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    /// Full trainset size handed to the orchestrator
    pub trainset: usize,

    /// Devset size used for validation
    pub devset: usize,

    /// Demonstrations in the final configuration
    pub demos: usize,

    /// Final classifier's devset accuracy
    pub dev_accuracy: f64,

    /// Whether optimization ran and succeeded
    pub optimized: bool,
}

/// Appends one row per optimization run to a CSV file.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("optimization_runs.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "trainset,devset,demos,dev_accuracy,optimized")?;
            tracing::debug!("Created run metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one run's metrics as a new CSV row.
    pub fn log(&self, m: &RunMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;

        writeln!(
            f,
            "{},{},{},{:.6},{}",
            m.trainset, m.devset, m.demos, m.dev_accuracy, m.optimized,
        )?;

        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::{PredictRequest, ReasoningBackend};
    use anyhow::bail;
    use std::sync::Arc;

    fn example(intent: &str) -> CitationExample {
        CitationExample::new("some citation text here", "Bulgular", intent)
    }

    fn predicted(intent: &str) -> IntentPrediction {
        IntentPrediction {
            intent:    Some(intent.to_string()),
            reasoning: None,
        }
    }

    #[test]
    fn test_match_is_case_and_whitespace_insensitive() {
        assert_eq!(exact_match_score(&example("Support"), &predicted(" support ")), 1);
        assert_eq!(exact_match_score(&example("  differ"), &predicted("DIFFER")), 1);
    }

    #[test]
    fn test_wrong_label_scores_zero() {
        assert_eq!(exact_match_score(&example("support"), &predicted("differ")), 0);
    }

    #[test]
    fn test_missing_intent_scores_zero_without_raising() {
        let prediction = IntentPrediction { intent: None, reasoning: None };
        assert_eq!(exact_match_score(&example("support"), &prediction), 0);
    }

    #[test]
    fn test_out_of_set_label_never_matches() {
        assert_eq!(exact_match_score(&example("support"), &predicted("supportive")), 0);
    }

    /// Always predicts `support`; errors on request when told to.
    struct SupportBackend {
        fail_on: Option<&'static str>,
    }

    impl ReasoningBackend for SupportBackend {
        fn predict(&self, request: &PredictRequest<'_>) -> Result<IntentPrediction> {
            if self.fail_on == Some(request.citation) {
                bail!("backend exploded");
            }
            Ok(predicted("support"))
        }

        fn name(&self) -> &str {
            "support-only"
        }
    }

    #[test]
    fn test_evaluate_counts_correct_predictions() {
        let classifier = CitationClassifier::new(Arc::new(SupportBackend { fail_on: None }));
        let set = vec![example("support"), example("differ"), example("support")];

        let summary = evaluate(&classifier, &set, exact_match_score);
        assert_eq!(summary, EvaluationSummary { correct: 2, total: 3 });
        assert!((summary.accuracy() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_survives_a_backend_failure() {
        let classifier = CitationClassifier::new(Arc::new(SupportBackend {
            fail_on: Some("some citation text here"),
        }));
        let set = vec![example("support")];

        // The one example errors out; it scores 0 and nothing panics
        let summary = evaluate(&classifier, &set, exact_match_score);
        assert_eq!(summary, EvaluationSummary { correct: 0, total: 1 });
    }

    #[test]
    fn test_empty_set_accuracy_is_zero() {
        assert_eq!(EvaluationSummary { correct: 0, total: 0 }.accuracy(), 0.0);
    }
}
