// ============================================================
// Layer 5 — Lexicon Reasoning Backend
// ============================================================
// The shipped ReasoningBackend: a deterministic cue-phrase
// scorer so the whole pipeline runs offline and reproducibly.
// A network LLM client would implement the same trait and drop
// in behind the classifier without touching any other layer.
//
// Scoring:
//   - a citation of fewer than 4 words is `other` outright
//     (too little semantic content for intent analysis)
//   - each matched cue phrase adds 2 to its class
//   - the section title adds 1 to the classes it typically
//     hosts (results sections host support/differ, method
//     sections host basis, and so on)
//   - highest total wins; all-zero scores fall back to `other`
//
// The demonstrations in the request are accepted but not
// consulted — in-context learning is meaningful to an LLM
// backend, not to a lexicon. The cue and section tables are
// distilled from the category definitions in the instruction
// block (llm/signature.rs).

use anyhow::Result;

use crate::domain::intent::CitationIntent;
use crate::domain::traits::{IntentPrediction, PredictRequest, ReasoningBackend};

/// Citations shorter than this many words are `other` outright.
const MIN_CITATION_WORDS: usize = 4;

/// Cue phrases per class, matched as substrings of the
/// lowercased citation text.
const CUES: [(CitationIntent, &[&str]); 5] = [
    (
        CitationIntent::Background,
        &[
            "literatürde",
            "alanyazında",
            "çalışmalar mevcuttur",
            "ilk olarak",
            "öne sürülmüştür",
            "bilinmektedir",
        ],
    ),
    (
        CitationIntent::Basis,
        &[
            "temel alınmıştır",
            "temel alınarak",
            "esas alınmıştır",
            "kullanılmıştır",
            "uyarlanmıştır",
            "yöntemi kullanılarak",
        ],
    ),
    (
        CitationIntent::Discuss,
        &[
            "ele alınmıştır",
            "incelenmiştir",
            "değerlendirilmiştir",
            "tartışılmıştır",
            "eleştirilmiştir",
            "detaylı olarak",
        ],
    ),
    (
        CitationIntent::Support,
        &[
            "benzer sonuç",
            "benzer bulgular",
            "tutarlıdır",
            "uyumludur",
            "desteklemektedir",
            "paralellik göstermektedir",
            "doğrulamaktadır",
        ],
    ),
    (
        CitationIntent::Differ,
        &[
            "farklı sonuç",
            "aksine",
            "tersine",
            "çelişmektedir",
            "farklılık göstermektedir",
        ],
    ),
];

/// Section-title fragments and the classes they make more
/// likely. A title may hit several rows ("Bulgular ve
/// Tartışma" boosts support, differ, and discuss).
const SECTION_PRIORS: [(&[&str], &[CitationIntent]); 4] = [
    (
        &["bulgular", "sonuç", "doğrulama"],
        &[CitationIntent::Support, CitationIntent::Differ],
    ),
    (
        &["yöntem", "materyal", "veri seti", "uygulama", "model tasarımı"],
        &[CitationIntent::Basis],
    ),
    (
        &["giriş", "literatür", "ilgili çalışmalar", "genel bilgiler"],
        &[CitationIntent::Background],
    ),
    (&["tartışma"], &[CitationIntent::Discuss]),
];

/// Deterministic cue-phrase classifier.
pub struct LexiconBackend;

impl LexiconBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LexiconBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ReasoningBackend for LexiconBackend {
    fn predict(&self, request: &PredictRequest<'_>) -> Result<IntentPrediction> {
        let citation = request.citation.to_lowercase();
        let section  = request.section.to_lowercase();

        if citation.split_whitespace().count() < MIN_CITATION_WORDS {
            return Ok(prediction(
                CitationIntent::Other,
                "the citation phrase is too short to carry a clear rhetorical intent".to_string(),
            ));
        }

        let mut scores: Vec<(CitationIntent, u32)> =
            CitationIntent::ALL.iter().map(|c| (*c, 0u32)).collect();
        let mut matched: Vec<(CitationIntent, &str)> = Vec::new();

        for (class, cues) in CUES {
            for &cue in cues {
                if citation.contains(cue) {
                    bump(&mut scores, class, 2);
                    matched.push((class, cue));
                }
            }
        }

        let mut section_note: Option<&[CitationIntent]> = None;
        for (fragments, classes) in SECTION_PRIORS {
            if fragments.iter().any(|f| section.contains(f)) {
                for class in classes {
                    bump(&mut scores, *class, 1);
                }
                section_note = Some(classes);
            }
        }

        // Highest total wins; ties resolve in class-list order.
        let (winner, best) = scores
            .iter()
            .copied()
            .fold((CitationIntent::Other, 0u32), |acc, cur| {
                if cur.1 > acc.1 {
                    cur
                } else {
                    acc
                }
            });

        if best == 0 {
            return Ok(prediction(
                CitationIntent::Other,
                "no rhetorical cue matched the citation text or its section".to_string(),
            ));
        }

        let mut reasons: Vec<String> = matched
            .iter()
            .filter(|(class, _)| *class == winner)
            .map(|(_, cue)| format!("cue '{cue}'"))
            .collect();
        if let Some(classes) = section_note {
            if classes.contains(&winner) {
                reasons.push(format!("section '{}' typically hosts this intent", request.section));
            }
        }
        if reasons.is_empty() {
            // The winner can ride on the section prior alone
            reasons.push(format!("section '{}' prior", request.section));
        }

        Ok(prediction(winner, reasons.join("; ")))
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

fn bump(scores: &mut [(CitationIntent, u32)], class: CitationIntent, amount: u32) {
    if let Some(entry) = scores.iter_mut().find(|(c, _)| *c == class) {
        entry.1 += amount;
    }
}

fn prediction(intent: CitationIntent, reasoning: String) -> IntentPrediction {
    IntentPrediction {
        intent:    Some(intent.as_str().to_string()),
        reasoning: Some(reasoning),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn classify(citation: &str, section: &str) -> IntentPrediction {
        let backend = LexiconBackend::new();
        backend
            .predict(&PredictRequest {
                citation,
                section,
                instructions: "",
                demos: &[],
            })
            .unwrap()
    }

    #[test]
    fn test_consistent_results_in_a_results_section_are_support() {
        let prediction = classify(
            "Yöntemimiz, literatürdeki yaklaşımlarla benzer sonuçlar üretmektedir (Çelik ve Aydın, 2022).",
            "Bulgular",
        );
        assert_eq!(prediction.intent.as_deref(), Some("support"));
        assert!(prediction.reasoning.unwrap().contains("benzer sonuç"));
    }

    #[test]
    fn test_reused_method_in_a_method_section_is_basis() {
        let prediction = classify(
            "Bu çalışmada, Demir ve ark. (2021) tarafından önerilen sinir ağı mimarisi temel alınmıştır.",
            "Yöntem",
        );
        assert_eq!(prediction.intent.as_deref(), Some("basis"));
    }

    #[test]
    fn test_contradicting_results_are_differ() {
        let prediction = classify(
            "Aksine, bulgularımız Kaya (2018) tarafından raporlanan sonuçlarla çelişmektedir.",
            "Bulgular",
        );
        assert_eq!(prediction.intent.as_deref(), Some("differ"));
    }

    #[test]
    fn test_short_citation_is_other() {
        let prediction = classify("Bkz. Yılmaz (2020).", "Giriş");
        assert_eq!(prediction.intent.as_deref(), Some("other"));
    }

    #[test]
    fn test_no_cue_and_no_section_prior_is_other() {
        let prediction = classify(
            "Bu cümle hiçbir anahtar ifade içermeyen nötr bir metindir.",
            "Ekler",
        );
        assert_eq!(prediction.intent.as_deref(), Some("other"));
    }
}
