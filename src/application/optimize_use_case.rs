// ============================================================
// Layer 2 — OptimizeUseCase
// ============================================================
// Orchestrates the full optimization pipeline in order:
//
//   Step 1: Load the full trainset          (Layer 4 - data)
//   Step 2: Load the full devset            (Layer 4 - data)
//   Step 3: Load a balanced small sample    (Layer 4 - data)
//   Step 4: Restore a saved program, or     (Layer 6 - infra)
//           start from a fresh classifier
//   Step 5: Guard + optimize + fallback     (Layer 5 - llm)
//   Step 6: Persist the program on success  (Layer 6 - infra)
//   Step 7: Append a run metrics row        (Layer 6 - infra)
//
// Failure policy: optimization failure is never fatal. The
// guard skips statistically meaningless trainsets, a failing
// optimizer is logged in full and the unoptimized classifier
// survives, and even a failed save only costs persistence —
// the pipeline always ends holding the best classifier it has.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::data::{loader::CsvExampleSource, sampler::class_coverage};
use crate::domain::example::{CitationExample, SampleMode};
use crate::domain::intent::CitationIntent;
use crate::domain::traits::{ExampleSource, ReasoningBackend};
use crate::infra::metrics::{evaluate, exact_match_score, MetricsLogger, RunMetrics};
use crate::infra::program_store::ProgramStore;
use crate::llm::classifier::CitationClassifier;
use crate::llm::optimizer::{DemoBudget, PromptOptimizer};

/// Below this many training examples, optimization is skipped
/// outright — the search collaborator must not be invoked on
/// statistically meaningless data.
pub const MIN_TRAINSET_SIZE: usize = 3;

// ─── Pipeline Configuration ──────────────────────────────────────────────────
// All knobs for one pipeline run. Serialisable so a run's
// settings can be recorded alongside its outputs. The
// #[derive(Serialize, Deserialize)] macros from serde handle
// reading/writing this struct to JSON automatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub train_csv:              String,
    pub dev_csv:                String,
    pub program_path:           String,
    pub metrics_dir:            String,
    pub samples_per_class:      usize,
    pub seed:                   u64,
    pub max_bootstrapped_demos: usize,
    pub max_labeled_demos:      usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            train_csv:              "data/trainset.csv".to_string(),
            dev_csv:                "data/devset.csv".to_string(),
            program_path:           "checkpoints/optimized_citation_classifier.json".to_string(),
            metrics_dir:            "checkpoints".to_string(),
            samples_per_class:      2,
            seed:                   42,
            max_bootstrapped_demos: 6,
            max_labeled_demos:      0,
        }
    }
}

/// What a pipeline run ends with: the classifier to use for
/// inference (optimized, restored, or fresh — whichever won)
/// and how it got there.
pub struct OptimizeOutcome {
    pub classifier:    CitationClassifier,
    pub was_optimized: bool,
    pub trainset_size: usize,
    pub devset_size:   usize,
}

// ─── Guard + invoke + fallback ───────────────────────────────────────────────
/// Run the optimization step itself. Never returns Err:
///   - a trainset below MIN_TRAINSET_SIZE skips the optimizer
///     entirely and keeps the input classifier
///   - an optimizer failure is logged with its full error chain
///     and the input classifier survives
pub fn run_optimization(
    classifier: CitationClassifier,
    trainset:   &[CitationExample],
    devset:     &[CitationExample],
    optimizer:  &dyn PromptOptimizer,
    budget:     &DemoBudget,
) -> (CitationClassifier, bool) {
    if trainset.len() < MIN_TRAINSET_SIZE {
        tracing::warn!(
            "Trainset size ({}) is below the minimum of {} — skipping optimization, \
             the unoptimized classifier will be used",
            trainset.len(),
            MIN_TRAINSET_SIZE
        );
        return (classifier, false);
    }

    tracing::info!(
        "Starting '{}' optimization with {} training examples and {} validation examples",
        optimizer.name(),
        trainset.len(),
        devset.len()
    );

    match optimizer.optimize(&classifier, trainset, devset, exact_match_score, budget) {
        Ok(optimized) => {
            tracing::info!(
                "Optimization succeeded: {} demonstration(s) in the final program",
                optimized.configuration().demos.len()
            );
            (optimized, true)
        }
        Err(e) => {
            // Full chain, including any backtrace anyhow captured.
            tracing::error!("Optimization failed: {:?}", e);
            tracing::warn!("Falling back to the unoptimized classifier");
            (classifier, false)
        }
    }
}

// ─── OptimizeUseCase ─────────────────────────────────────────────────────────
// Owns the config and runs the full pipeline.
pub struct OptimizeUseCase {
    config: PipelineConfig,
}

impl OptimizeUseCase {
    /// Create a new OptimizeUseCase with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Execute the full optimization pipeline end to end.
    pub fn execute(
        &self,
        backend:   Arc<dyn ReasoningBackend>,
        optimizer: &dyn PromptOptimizer,
    ) -> Result<OptimizeOutcome> {
        let cfg = &self.config;

        // ── Step 1: Load the full trainset ───────────────────────────────────
        let trainset =
            CsvExampleSource::new(&cfg.train_csv).load(&CitationIntent::ALL, &SampleMode::Full);

        // ── Step 2: Load the full devset ─────────────────────────────────────
        let devset =
            CsvExampleSource::new(&cfg.dev_csv).load(&CitationIntent::ALL, &SampleMode::Full);

        // ── Step 3: Load the balanced small sample ───────────────────────────
        // The manual-demonstration pool. It feeds nothing while
        // max_labeled_demos is 0, but its per-class makeup is the
        // operator's view of label coverage, so it is always
        // drawn and logged.
        let balanced = CsvExampleSource::new(&cfg.train_csv).load(
            &CitationIntent::ALL,
            &SampleMode::Balanced {
                samples_per_class: cfg.samples_per_class,
                seed:              cfg.seed,
            },
        );
        for (class, count) in class_coverage(&balanced, &CitationIntent::ALL) {
            tracing::debug!("Balanced sample coverage: {} = {}", class, count);
        }
        tracing::info!(
            "Loaded {} train / {} dev / {} balanced examples",
            trainset.len(),
            devset.len(),
            balanced.len()
        );

        // ── Step 4: Restore a saved program, or start fresh ──────────────────
        // One active classifier instance either way — the restore
        // result decides only its starting configuration.
        let store      = ProgramStore::new(&cfg.program_path);
        let classifier = match store.load() {
            Ok(config) => {
                tracing::info!(
                    "Restored optimized program from '{}' ({} demos)",
                    cfg.program_path,
                    config.demos.len()
                );
                CitationClassifier::with_configuration(backend, config)
            }
            Err(e) => {
                tracing::warn!("Could not restore a saved program: {:#}", e);
                tracing::info!("Starting from the unoptimized configuration");
                CitationClassifier::new(backend)
            }
        };

        // ── Step 5: Guard + optimize + fallback ──────────────────────────────
        let budget = DemoBudget {
            max_bootstrapped: cfg.max_bootstrapped_demos,
            max_labeled:      cfg.max_labeled_demos,
        };
        let (classifier, was_optimized) =
            run_optimization(classifier, &trainset, &devset, optimizer, &budget);

        // ── Step 6: Persist the program on success ───────────────────────────
        // A failed save costs only persistence, never the run.
        if was_optimized {
            match store.save(classifier.configuration()) {
                Ok(()) => tracing::info!("Optimized program saved to '{}'", cfg.program_path),
                Err(e) => tracing::error!("Could not save the optimized program: {:#}", e),
            }
        }

        // ── Step 7: Append a run metrics row ─────────────────────────────────
        let dev_accuracy = if devset.is_empty() {
            0.0
        } else {
            evaluate(&classifier, &devset, exact_match_score).accuracy()
        };
        match MetricsLogger::new(&cfg.metrics_dir) {
            Ok(logger) => {
                let row = RunMetrics {
                    trainset:     trainset.len(),
                    devset:       devset.len(),
                    demos:        classifier.configuration().demos.len(),
                    dev_accuracy,
                    optimized:    was_optimized,
                };
                if let Err(e) = logger.log(&row) {
                    tracing::warn!("Could not append run metrics: {:#}", e);
                }
            }
            Err(e) => tracing::warn!("Could not open the run metrics log: {:#}", e),
        }

        Ok(OptimizeOutcome {
            classifier,
            was_optimized,
            trainset_size: trainset.len(),
            devset_size:   devset.len(),
        })
    }
}
