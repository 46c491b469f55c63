// ============================================================
// Layer 4 — Class-Balanced Sampler
// ============================================================
// Draws a per-class-capped subset of labelled examples so the
// few-shot demonstration pool stays representative across all
// six intent classes.
//
// Why balance at all?
//   Citation corpora are heavily skewed towards `background`.
//   Demonstrations drawn uniformly would teach the model to
//   answer `background` for everything.
//
// Sampling rules:
//   - A class with zero rows is skipped — no padding, no error
//   - A class with fewer rows than requested contributes all
//     of them: min(samples_per_class, available)
//   - Draws are without replacement
//   - Each class draws from a fresh StdRng seeded with the same
//     value, so one class's subset does not depend on how many
//     rows another class held, and a fixed seed is fully
//     reproducible
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom
// which is the standard unbiased shuffle algorithm.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::example::CitationExample;
use crate::domain::intent::CitationIntent;

/// Draw a class-balanced subset of `rows`.
///
/// # Arguments
/// * `rows`              - All available labelled examples
/// * `classes`           - The fixed class list to balance over
/// * `samples_per_class` - Upper bound of rows per class
/// * `seed`              - Deterministic RNG seed
///
/// # Returns
/// Per-class draws concatenated in class-list order. Empty when
/// no listed class has any rows.
pub fn balanced_subset(
    rows:              &[CitationExample],
    classes:           &[CitationIntent],
    samples_per_class: usize,
    seed:              u64,
) -> Vec<CitationExample> {
    let mut subset = Vec::new();

    for class in classes {
        // Membership is exact raw-label equality — normalisation
        // belongs to scoring, not to data curation.
        let mut indices: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.citation_intent == class.as_str())
            .map(|(i, _)| i)
            .collect();

        if indices.is_empty() {
            tracing::debug!("Class '{}' has no rows — skipped", class);
            continue;
        }

        // Fresh generator per class, same seed.
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let take = samples_per_class.min(indices.len());
        tracing::debug!(
            "Class '{}': drew {} of {} available rows",
            class,
            take,
            indices.len()
        );

        subset.extend(indices[..take].iter().map(|&i| rows[i].clone()));
    }

    subset
}

/// Per-class row counts for a set of examples, in class-list
/// order. Used for the operator-facing coverage log.
pub fn class_coverage(
    rows:    &[CitationExample],
    classes: &[CitationIntent],
) -> Vec<(CitationIntent, usize)> {
    classes
        .iter()
        .map(|class| {
            let count = rows
                .iter()
                .filter(|row| row.citation_intent == class.as_str())
                .count();
            (*class, count)
        })
        .collect()
}
