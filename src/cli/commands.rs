// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `run`, `classify`, `inspect`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, u64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::optimize_use_case::PipelineConfig;

/// The three top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: load data, restore, optimize,
    /// classify the demonstration example, and print the program
    Run(RunArgs),

    /// Classify a single citation with the saved program
    Classify(ClassifyArgs),

    /// Print the saved program's instructions and demonstrations
    Inspect(InspectArgs),
}

/// All arguments for the `run` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// CSV file with the labelled training examples
    #[arg(long, default_value = "data/trainset.csv")]
    pub train_csv: String,

    /// CSV file with the labelled validation examples
    #[arg(long, default_value = "data/devset.csv")]
    pub dev_csv: String,

    /// Where the optimized program is saved and restored from
    #[arg(long, default_value = "checkpoints/optimized_citation_classifier.json")]
    pub program_path: String,

    /// Directory for the optimization run metrics CSV
    #[arg(long, default_value = "checkpoints")]
    pub metrics_dir: String,

    /// Rows per class in the balanced small sample
    #[arg(long, default_value_t = 2)]
    pub samples_per_class: usize,

    /// Seed for the balanced sample draw — the same seed always
    /// reproduces the same subset
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Maximum demonstrations bootstrapped from the trainset
    #[arg(long, default_value_t = 6)]
    pub max_bootstrapped_demos: usize,

    /// Maximum manually-labelled demonstrations; 0 when none
    /// are supplied
    #[arg(long, default_value_t = 0)]
    pub max_labeled_demos: usize,
}

/// Convert CLI RunArgs into the application-layer PipelineConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<RunArgs> for PipelineConfig {
    fn from(a: RunArgs) -> Self {
        PipelineConfig {
            train_csv:              a.train_csv,
            dev_csv:                a.dev_csv,
            program_path:           a.program_path,
            metrics_dir:            a.metrics_dir,
            samples_per_class:      a.samples_per_class,
            seed:                   a.seed,
            max_bootstrapped_demos: a.max_bootstrapped_demos,
            max_labeled_demos:      a.max_labeled_demos,
        }
    }
}

/// All arguments for the `classify` command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// The citation excerpt to classify (Turkish)
    #[arg(long)]
    pub citation: String,

    /// The section title the citation appears under (Turkish)
    #[arg(long)]
    pub section: String,

    /// Where to restore the optimized program from
    #[arg(long, default_value = "checkpoints/optimized_citation_classifier.json")]
    pub program_path: String,
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Where to restore the optimized program from
    #[arg(long, default_value = "checkpoints/optimized_citation_classifier.json")]
    pub program_path: String,
}
