// ============================================================
// Layer 3 — CitationIntent Domain Type
// ============================================================
// The closed enumeration of rhetorical citation intents.
// The category schema is inspired by the Web of Science
// citation classification (Clarivate).
//
// The enum is the *canonical* class list: balanced sampling
// iterates over it, and the prompt instructions enumerate it.
// Labels found in data files or returned by a reasoning
// backend stay plain strings — an out-of-set label is not an
// error anywhere, it simply never matches during scoring.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use serde::{Deserialize, Serialize};
use std::fmt;

/// The rhetorical purpose a citation serves in the citing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationIntent {
    /// General context or foundational work not directly built upon
    Background,

    /// The current study directly uses or adapts the cited methods/data
    Basis,

    /// The cited work is substantively analysed or critiqued
    Discuss,

    /// The cited results are consistent with and reinforce the current study
    Support,

    /// The cited results contrast with or contradict the current study
    Differ,

    /// Intent cannot be determined from the excerpt
    Other,
}

impl CitationIntent {
    /// Every valid class, in the order used for balanced sampling
    /// and for the prompt's category listing.
    pub const ALL: [CitationIntent; 6] = [
        CitationIntent::Background,
        CitationIntent::Basis,
        CitationIntent::Discuss,
        CitationIntent::Support,
        CitationIntent::Differ,
        CitationIntent::Other,
    ];

    /// The canonical lowercase label for this class —
    /// the exact string expected in data files and predictions.
    pub fn as_str(&self) -> &'static str {
        match self {
            CitationIntent::Background => "background",
            CitationIntent::Basis      => "basis",
            CitationIntent::Discuss    => "discuss",
            CitationIntent::Support    => "support",
            CitationIntent::Differ     => "differ",
            CitationIntent::Other      => "other",
        }
    }

    /// Parse a free-form label after trimming and case-folding.
    /// Returns None for anything outside the six-value set.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "background" => Some(CitationIntent::Background),
            "basis"      => Some(CitationIntent::Basis),
            "discuss"    => Some(CitationIntent::Discuss),
            "support"    => Some(CitationIntent::Support),
            "differ"     => Some(CitationIntent::Differ),
            "other"      => Some(CitationIntent::Other),
            _            => None,
        }
    }
}

impl fmt::Display for CitationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        assert_eq!(CitationIntent::parse("  Support "), Some(CitationIntent::Support));
        assert_eq!(CitationIntent::parse("BACKGROUND"), Some(CitationIntent::Background));
    }

    #[test]
    fn test_parse_rejects_unknown_labels() {
        assert_eq!(CitationIntent::parse("supportive"), None);
        assert_eq!(CitationIntent::parse(""), None);
    }

    #[test]
    fn test_round_trip_all_labels() {
        for intent in CitationIntent::ALL {
            assert_eq!(CitationIntent::parse(intent.as_str()), Some(intent));
        }
    }
}
