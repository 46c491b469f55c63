// ============================================================
// Layer 6 — Program Store
// ============================================================
// Saves and restores the classifier's learned configuration.
//
// What gets saved:
//   One pretty-printed JSON file holding the whole
//   PredictorConfiguration (instructions + demonstrations).
//   It is written at most once per successful optimization and
//   read once at startup.
//
// Load semantics:
//   load() FAILS with a contextual error on a missing file or
//   corrupt/incompatible content. The caller catches it and
//   falls back to a freshly constructed classifier — a failed
//   restore must never abort the pipeline.
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json documentation

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::program::PredictorConfiguration;

/// Manages the single persisted program file.
pub struct ProgramStore {
    /// Full path of the JSON file
    path: PathBuf,
}

impl ProgramStore {
    /// Create a store for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Serialise the configuration, overwriting any existing file.
    /// Parent directories are created as needed.
    pub fn save(&self, config: &PredictorConfiguration) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("cannot create directory '{}'", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json)
            .with_context(|| format!("cannot write program to '{}'", self.path.display()))?;

        tracing::debug!("Saved optimized program to '{}'", self.path.display());
        Ok(())
    }

    /// Restore a previously saved configuration.
    pub fn load(&self) -> Result<PredictorConfiguration> {
        let json = fs::read_to_string(&self.path).with_context(|| {
            format!(
                "cannot read program from '{}' — has an optimization run been saved yet?",
                self.path.display()
            )
        })?;

        serde_json::from_str(&json).with_context(|| {
            format!("'{}' does not contain a valid program", self.path.display())
        })
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::CitationExample;
    use crate::domain::program::Demo;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

    fn temp_path() -> PathBuf {
        let n = NEXT_FILE.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "citation_store_test_{}_{}/program.json",
            std::process::id(),
            n
        ))
    }

    #[test]
    fn test_load_from_nonexistent_path_fails() {
        let store = ProgramStore::new(temp_path());
        assert!(store.load().is_err());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let path  = temp_path();
        let store = ProgramStore::new(&path);

        let config = PredictorConfiguration::new("classify the citation").with_demos(vec![
            Demo::from_example(&CitationExample::new("cite", "Bulgular", "support"))
                .with_reasoning("consistent results"),
        ]);
        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let path  = temp_path();
        let store = ProgramStore::new(&path);

        store.save(&PredictorConfiguration::new("first")).unwrap();
        store.save(&PredictorConfiguration::new("second")).unwrap();

        assert_eq!(store.load().unwrap().instructions, "second");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_corrupt_file_fails_to_load() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json at all {").unwrap();

        assert!(ProgramStore::new(&path).load().is_err());
        fs::remove_file(&path).ok();
    }
}
