// ============================================================
// Layer 5 — Classification Signature
// ============================================================
// The instruction block every fresh classifier starts from.
// An optimizer may rewrite the instructions wholesale; this is
// only the unoptimized starting point.
//
// The category schema follows the Web of Science citation
// classification (Clarivate). The corpus is Turkish academic
// text, so each category lists the Turkish section titles it
// typically appears under.

use crate::domain::program::PredictorConfiguration;

/// Field description shown for the citation input.
pub const CITATION_FIELD_DESC: &str = "Citation Context";

/// Field description shown for the section input.
pub const SECTION_FIELD_DESC: &str = "Citation Section Title";

/// Field description shown for the intent output.
pub const INTENT_FIELD_DESC: &str =
    "One of: 'background', 'basis', 'discuss', 'support', 'differ', 'other'";

/// The default instruction block.
pub const INSTRUCTIONS: &str = "\
You are an expert academic editor specializing in computer science and \
artificial intelligence. Classify each academic citation from Turkish \
research papers by its rhetorical intent. The citation excerpt and its \
section title are in Turkish.

Categories:

1. background — The cited work provides general context, historical \
information, or foundational studies that are not directly built upon. \
Typical sections: 'Giriş', 'Literatür Taraması', 'İlgili Çalışmalar', \
'Genel Bilgiler'.

2. basis — The current study directly reports using or adapting the \
cited work's methods, algorithms, datasets, software, or equipment. \
Typical sections: 'Yöntem', 'Materyal ve Metot', 'Model Tasarımı', \
'Veri Seti', 'Uygulama'.

3. discuss — The cited work is actively and substantively discussed, \
analysed, or critically evaluated, beyond a simple statement of similar \
or dissimilar results. Typical sections: 'Literatür Taraması', \
'Tartışma', 'Bulgular ve Tartışma', 'İlgili Çalışmalar'.

4. support — The cited work's results are compared with the current \
study's and presented as consistent with them, reinforcing the current \
study's findings. Typical sections: 'Bulgular', 'Sonuçlar', 'Tartışma', \
'Doğrulama'.

5. differ — The cited work's results are compared with the current \
study's and presented as contrasting or contradicting them. Typical \
sections: 'Bulgular', 'Sonuçlar', 'Tartışma'.

6. other — The intent cannot be confidently determined: very short \
citation phrases (3-4 words) without sufficient semantic content, \
incomplete references, or purely bibliographic mentions.

The section title is a strong contextual clue, but classify primarily \
from the semantic content and rhetorical function of the citation text \
itself. Answer with exactly one category label.";

/// The configuration a freshly constructed, unoptimized
/// classifier starts from: default instructions, zero demos.
pub fn default_configuration() -> PredictorConfiguration {
    PredictorConfiguration::new(INSTRUCTIONS)
}
