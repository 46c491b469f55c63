// ============================================================
// Layer 4 — CSV Example Loader
// ============================================================
// Loads labelled citation examples from a CSV file using the
// csv crate.
//
// Required columns:
//   citation_intent   — the ground-truth label
//   citation_context  — the excerpt (mapped to `citation`)
//   section           — the section title
//
// Error policy: loading NEVER hard-fails. A missing file, an
// unreadable file, missing columns, or an empty source yields
// an empty Vec plus a logged diagnostic. The caller treats an
// empty result as "no usable data" and proceeds — here that
// means the optimization guard skips the run. Individually
// malformed rows are skipped with a warning so one bad line
// cannot poison the whole set.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::data::sampler::balanced_subset;
use crate::domain::example::{CitationExample, SampleMode};
use crate::domain::intent::CitationIntent;
use crate::domain::traits::ExampleSource;

/// The three columns every source file must expose.
const REQUIRED_COLUMNS: [&str; 3] = ["citation_intent", "citation_context", "section"];

/// Loads labelled examples from a single CSV file.
/// Implements the ExampleSource trait from Layer 3.
pub struct CsvExampleSource {
    /// Path to the CSV file
    path: String,
}

impl CsvExampleSource {
    /// Create a new CsvExampleSource pointed at a file
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Read and validate the whole file.
    /// Returns Err only for conditions the public `load` maps to
    /// the empty-set fallback: missing file, unreadable content,
    /// missing columns.
    fn read_rows(&self) -> Result<Vec<CitationExample>> {
        let path = Path::new(&self.path);

        if !path.exists() {
            bail!("'{}' does not exist — check the file path", self.path);
        }

        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("cannot open '{}'", self.path))?;

        // Validate the header before touching any row so a wrong
        // export format is reported as one clear diagnostic.
        let headers = reader
            .headers()
            .with_context(|| format!("cannot read the header row of '{}'", self.path))?
            .clone();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .copied()
            .collect();
        if !missing.is_empty() {
            bail!(
                "'{}' is missing required column(s): {}",
                self.path,
                missing.join(", ")
            );
        }

        // Header indices — present after the check above.
        let idx = |name: &str| headers.iter().position(|h| h == name);
        let (Some(intent_idx), Some(citation_idx), Some(section_idx)) = (
            idx("citation_intent"),
            idx("citation_context"),
            idx("section"),
        ) else {
            bail!("'{}' header lookup failed after validation", self.path);
        };

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            match record {
                Ok(record) => rows.push(CitationExample::new(
                    record.get(citation_idx).unwrap_or_default(),
                    record.get(section_idx).unwrap_or_default(),
                    record.get(intent_idx).unwrap_or_default(),
                )),
                // Skip the bad row but keep the rest of the file
                Err(e) => {
                    tracing::warn!("Skipping row {} of '{}': {}", line + 2, self.path, e);
                }
            }
        }

        Ok(rows)
    }
}

impl ExampleSource for CsvExampleSource {
    fn load(&self, classes: &[CitationIntent], mode: &SampleMode) -> Vec<CitationExample> {
        // Any validation failure becomes an empty set plus a
        // diagnostic, never an abort.
        let rows = match self.read_rows() {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Cannot load examples: {:#}", e);
                return Vec::new();
            }
        };

        if rows.is_empty() {
            tracing::warn!("'{}' contains no data rows", self.path);
            return Vec::new();
        }

        match mode {
            SampleMode::Full => {
                tracing::info!("Loaded {} examples from '{}'", rows.len(), self.path);
                rows
            }
            SampleMode::Balanced { samples_per_class, seed } => {
                let subset = balanced_subset(&rows, classes, *samples_per_class, *seed);
                if subset.is_empty() {
                    tracing::warn!(
                        "No balanced subset could be drawn from '{}' (no listed class has rows)",
                        self.path
                    );
                } else {
                    tracing::info!(
                        "Drew a balanced subset of {} examples from '{}'",
                        subset.len(),
                        self.path
                    );
                }
                subset
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

    /// Write a throwaway CSV under the system temp directory.
    fn write_csv(content: &str) -> PathBuf {
        let n    = NEXT_FILE.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "citation_loader_test_{}_{}.csv",
            std::process::id(),
            n
        ));
        fs::write(&path, content).unwrap();
        path
    }

    fn load_full(path: &Path) -> Vec<CitationExample> {
        CsvExampleSource::new(path.to_str().unwrap())
            .load(&CitationIntent::ALL, &SampleMode::Full)
    }

    #[test]
    fn test_missing_file_yields_empty_set() {
        let source = CsvExampleSource::new("definitely/not/a/real/file.csv");
        assert!(source.load(&CitationIntent::ALL, &SampleMode::Full).is_empty());
    }

    #[test]
    fn test_missing_column_yields_empty_set() {
        // No `section` column
        let path = write_csv("citation_intent,citation_context\nbasis,some text\n");
        assert!(load_full(&path).is_empty());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_header_only_file_yields_empty_set() {
        let path = write_csv("citation_intent,citation_context,section\n");
        assert!(load_full(&path).is_empty());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_full_mode_returns_all_rows_in_order() {
        let path = write_csv(concat!(
            "citation_intent,citation_context,section\n",
            "basis,\"Bu çalışmada, önerilen mimari temel alınmıştır.\",Yöntem\n",
            "unlabelled,short text,Giriş\n",
        ));
        let rows = load_full(&path);
        assert_eq!(rows.len(), 2);
        // Quoted commas survive, columns map correctly
        assert_eq!(rows[0].citation, "Bu çalışmada, önerilen mimari temel alınmıştır.");
        assert_eq!(rows[0].section, "Yöntem");
        assert_eq!(rows[0].citation_intent, "basis");
        // Full mode keeps out-of-set labels as-is
        assert_eq!(rows[1].citation_intent, "unlabelled");
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_balanced_mode_is_deterministic_through_the_loader() {
        let mut content = String::from("citation_intent,citation_context,section\n");
        for i in 0..6 {
            content.push_str(&format!("support,citation {i},Bulgular\n"));
        }
        let path = write_csv(&content);

        let mode   = SampleMode::Balanced { samples_per_class: 2, seed: 42 };
        let source = CsvExampleSource::new(path.to_str().unwrap());
        let first  = source.load(&CitationIntent::ALL, &mode);
        let second = source.load(&CitationIntent::ALL, &mode);

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        fs::remove_file(path).ok();
    }
}
