// ============================================================
// Layer 3 — CitationExample Domain Type
// ============================================================
// Represents one labelled citation excerpt — the unit of
// supervision for optimization and evaluation.
//
// The label is kept as the raw string from the data source,
// NOT as a CitationIntent enum value. Full-mode loading must
// return every row as encountered, including rows whose label
// falls outside the six-value set; such labels simply never
// match during scoring.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// A labelled citation excerpt. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationExample {
    /// The citation sentence or excerpt (Turkish in the shipped dataset)
    pub citation: String,

    /// The title of the section the citation appears in
    pub section: String,

    /// The ground-truth intent label, exactly as found in the source
    pub citation_intent: String,
}

impl CitationExample {
    /// Create a new CitationExample.
    /// Uses impl Into<String> so callers can pass &str or String.
    pub fn new(
        citation:        impl Into<String>,
        section:         impl Into<String>,
        citation_intent: impl Into<String>,
    ) -> Self {
        Self {
            citation:        citation.into(),
            section:         section.into(),
            citation_intent: citation_intent.into(),
        }
    }
}

/// How an example source should be materialised into a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleMode {
    /// Every row, in source order, regardless of class distribution
    Full,

    /// A per-class-capped subset drawn without replacement.
    /// The same seed on the same source always reproduces
    /// the same subset.
    Balanced {
        samples_per_class: usize,
        seed:              u64,
    },
}
