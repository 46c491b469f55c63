// ============================================================
// Layer 3 — Predictor Configuration
// ============================================================
// The learnable state of the classifier: a natural-language
// instruction block plus zero or more demonstration examples
// embedded into the prompt for in-context learning.
//
// Ownership rules:
//   - Owned exclusively by one CitationClassifier instance
//   - Mutated only as whole-object replacement — either by a
//     successful optimization or by a restore from disk
//   - Persisted as a single JSON blob (see infra/program_store)
//
// Reference: Rust Book §5 (Structs), serde documentation

use serde::{Deserialize, Serialize};

use crate::domain::example::CitationExample;

/// One demonstration embedded in the prompt: a labelled example,
/// optionally with the reasoning trace that produced the label
/// during bootstrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demo {
    pub citation:        String,
    pub section:         String,
    pub citation_intent: String,

    /// Reasoning captured when the demo was bootstrapped from a
    /// correct prediction; absent for manually labelled demos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl Demo {
    /// Build a demo from a labelled example, without reasoning.
    pub fn from_example(example: &CitationExample) -> Self {
        Self {
            citation:        example.citation.clone(),
            section:         example.section.clone(),
            citation_intent: example.citation_intent.clone(),
            reasoning:       None,
        }
    }

    /// Attach a reasoning trace (builder style).
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }
}

/// The full learnable configuration of the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictorConfiguration {
    /// The instruction block placed at the top of every prompt
    pub instructions: String,

    /// Demonstrations appended after the instructions
    #[serde(default)]
    pub demos: Vec<Demo>,
}

impl PredictorConfiguration {
    /// A configuration with the given instructions and no demos.
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            demos:        Vec::new(),
        }
    }

    /// Replace the demonstration list (builder style).
    pub fn with_demos(mut self, demos: Vec<Demo>) -> Self {
        self.demos = demos;
        self
    }
}
