// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application);
// all printing happens here and nowhere else.
//
// Three commands are supported:
//   1. `run`      — full pipeline: optimize, classify the
//                   demonstration example, print the program
//   2. `classify` — classifies one citation with the saved program
//   3. `inspect`  — prints the saved program for review
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use commands::{ClassifyArgs, Commands, InspectArgs, RunArgs};

use crate::application::classify_use_case::{ClassifyUseCase, DEMO_CITATION, DEMO_SECTION};
use crate::application::optimize_use_case::OptimizeUseCase;
use crate::domain::traits::IntentPrediction;
use crate::llm::bootstrap::BootstrapFewShot;
use crate::llm::classifier::ProgramReport;
use crate::llm::lexicon::LexiconBackend;

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "citation-intent",
    version = "0.1.0",
    about = "Classify academic citations by rhetorical intent; optimize the classifier prompt with few-shot examples."
)]
pub struct Cli {
    /// The subcommand to run (run, classify, or inspect)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args)      => Self::run_pipeline(args),
            Commands::Classify(args) => Self::run_classify(args),
            Commands::Inspect(args)  => Self::run_inspect(args),
        }
    }

    /// Handles the `run` subcommand — the full pipeline:
    /// optimize (with restore and fallback), classify the
    /// built-in demonstration example, then print the program
    /// and the detail of that last inference call.
    fn run_pipeline(args: RunArgs) -> Result<()> {
        // The shipped collaborators. A network LLM backend or a
        // different optimizer would be constructed here instead.
        let backend   = Arc::new(LexiconBackend::new());
        let optimizer = BootstrapFewShot::new();

        let use_case = OptimizeUseCase::new(args.into());
        let outcome  = use_case.execute(backend, &optimizer)?;

        println!(
            "Loaded {} training and {} validation examples.",
            outcome.trainset_size, outcome.devset_size
        );
        if outcome.was_optimized {
            println!("Optimization ran and the program was saved.");
        } else {
            println!("Optimization was skipped or failed; using the best available program.");
        }

        // Hand the freshly optimized classifier straight to the
        // inference use case — no second restore from disk.
        let classify = ClassifyUseCase::from_classifier(outcome.classifier);

        println!("\n--- Program output ---");
        println!("Citation: {DEMO_CITATION}");
        println!("Section:  {DEMO_SECTION}");
        // An inference failure is reported here, never a crash —
        // there is no further fallback for a single request.
        match classify.classify(DEMO_CITATION, DEMO_SECTION) {
            Ok(prediction) => print_prediction(&prediction),
            Err(e) => println!("The classification request failed: {e:#}"),
        }

        let report = classify.report();
        println!("\n--- Optimized program ---");
        print_report(&report);

        println!("\n--- Last inference call ---");
        print_last_call(&report);
        Ok(())
    }

    /// Handles the `classify` subcommand.
    /// Restores the saved program (or falls back to a fresh one)
    /// and prints the predicted intent.
    fn run_classify(args: ClassifyArgs) -> Result<()> {
        let use_case =
            ClassifyUseCase::new(&args.program_path, Arc::new(LexiconBackend::new()));

        let prediction = use_case.classify(&args.citation, &args.section)?;
        print_prediction(&prediction);
        Ok(())
    }

    /// Handles the `inspect` subcommand.
    /// Read-only: prints the program without touching pipeline state.
    fn run_inspect(args: InspectArgs) -> Result<()> {
        let use_case =
            ClassifyUseCase::new(&args.program_path, Arc::new(LexiconBackend::new()));

        print_report(&use_case.report());
        Ok(())
    }
}

/// Print one prediction, spelling out absent fields rather than
/// hiding them.
fn print_prediction(prediction: &IntentPrediction) {
    match prediction.intent.as_deref() {
        Some(intent) => println!("Predicted intent: {intent}"),
        None         => println!("Predicted intent: N/A"),
    }
    match prediction.reasoning.as_deref() {
        Some(reasoning) => println!("Reasoning: {reasoning}"),
        None            => println!("No reasoning was produced."),
    }
}

/// Print the program report: instructions, then every demo with
/// its inputs and outputs. Absences are stated explicitly.
fn print_report(report: &ProgramReport) {
    println!("Backend: {}", report.backend);
    println!("\nInstructions:\n{}", report.instructions);

    if report.demos.is_empty() {
        println!("\nDemonstrations: none");
        return;
    }

    println!("\nDemonstrations: {}", report.demos.len());
    for (i, demo) in report.demos.iter().enumerate() {
        println!("--- Demo {} ---", i + 1);
        println!(" Inputs:");
        println!("  citation: {}", demo.citation);
        println!("  section: {}", demo.section);
        println!(" Outputs:");
        println!("  citation_intent: {}", demo.citation_intent);
        if let Some(reasoning) = &demo.reasoning {
            println!("  reasoning: {reasoning}");
        }
    }
}

/// Print the shape of the request the last inference call was
/// assembled from.
fn print_last_call(report: &ProgramReport) {
    println!("Backend: {}", report.backend);
    println!("Instruction characters: {}", report.instructions.len());
    println!("Demonstrations in prompt: {}", report.demos.len());
    println!("citation: {DEMO_CITATION}");
    println!("section: {DEMO_SECTION}");
}
