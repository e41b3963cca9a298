//! locale-sync core
//!
//! Keeps a directory of `<lang>.json` localization files aligned with one
//! canonical language file. Existing translations are reused, new or missing
//! strings are machine translated through a [`Translator`], and obsolete keys
//! are dropped. This crate has no network or terminal dependencies; the
//! `locale-sync` binary supplies those.

pub mod config;
pub mod error;
pub mod loader;
pub mod placeholder;
pub mod reconcile;
pub mod scanner;
pub mod translator;
pub mod tree;
pub mod writer;

use std::path::{Path, PathBuf};

// Re-export commonly used types
pub use config::{FileConfig, LanguageRemap, RunConfig};
pub use error::{LoadError, SyncError};
pub use placeholder::{DEFAULT_SENTINEL, MaskedText, has_placeholders};
pub use reconcile::{LeafOutcome, ReconcileStats, Reconciler};
pub use translator::{CachingTranslator, InterpolationSafeTranslator, Translator};
pub use tree::{LocaleTree, count_leaves};

/// Progress hooks for a synchronization run.
///
/// Every method has an empty default so reporters only implement what they show.
pub trait SyncReporter {
    /// A target language is about to be reconciled. `index` is 1-based.
    fn language_started(&mut self, index: usize, total: usize, code: &str, leaves: usize) {
        let _ = (index, total, code, leaves);
    }

    /// One skeleton leaf was reused or translated.
    fn leaf_processed(&mut self, outcome: LeafOutcome) {
        let _ = outcome;
    }

    /// The reconciled file was written.
    fn language_finished(&mut self, code: &str, path: &Path, stats: &ReconcileStats) {
        let _ = (code, path, stats);
    }

    /// A recoverable problem, e.g. an unreadable target file.
    fn warning(&mut self, message: &str) {
        let _ = message;
    }
}

/// Reporter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl SyncReporter for NullReporter {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSummary {
    pub code: String,
    pub path: PathBuf,
    pub stats: ReconcileStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub languages: Vec<LanguageSummary>,
    pub cache_hits: usize,
}

impl SyncSummary {
    #[must_use]
    pub fn translated(&self) -> usize {
        self.languages.iter().map(|l| l.stats.translated).sum()
    }

    #[must_use]
    pub fn reused(&self) -> usize {
        self.languages.iter().map(|l| l.stats.reused).sum()
    }
}

/// Runs the scan → load → reconcile → write pipeline over a directory.
pub struct Synchronizer<T>
where
    T: Translator,
{
    config: RunConfig,
    backend: T,
}

impl<T> Synchronizer<T>
where
    T: Translator,
{
    /// Create a synchronizer with the run configuration and translation backend
    pub const fn new(config: RunConfig, backend: T) -> Self {
        Self { config, backend }
    }

    /// Synchronize every target language in the configured directory.
    ///
    /// Languages are processed one at a time in code order; each file is
    /// written as soon as it is reconciled.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: a missing directory, no language files,
    /// a missing or unparsable source file, a backend failure, or a failed write.
    pub fn run<R: SyncReporter>(&self, reporter: &mut R) -> Result<SyncSummary, SyncError> {
        self.config.validate()?;
        let codes = scanner::scan_language_codes(&self.config.directory)?;
        scanner::ensure_source_present(&codes, &self.config.source_language)?;
        let skeleton = loader::load_skeleton(&self.config)?;

        let targets: Vec<&str> = codes
            .iter()
            .map(String::as_str)
            .filter(|code| *code != self.config.source_language)
            .collect();
        log::info!(
            "synchronizing {} language(s) against {}",
            targets.len(),
            RunConfig::file_name(&self.config.source_language)
        );

        if self.config.cache_translations {
            let cached = CachingTranslator::new(&self.backend);
            let mut summary = self.sync_languages(&cached, &skeleton, &targets, reporter)?;
            summary.cache_hits = cached.hits();
            Ok(summary)
        } else {
            self.sync_languages(&self.backend, &skeleton, &targets, reporter)
        }
    }

    fn sync_languages<B, R>(
        &self,
        backend: B,
        skeleton: &LocaleTree,
        targets: &[&str],
        reporter: &mut R,
    ) -> Result<SyncSummary, SyncError>
    where
        B: Translator,
        R: SyncReporter,
    {
        let translator = InterpolationSafeTranslator::new(
            backend,
            &self.config.source_language,
            &self.config.remap,
            &self.config.sentinel,
        );
        let total_leaves = count_leaves(skeleton);
        let mut summary = SyncSummary::default();

        for (index, code) in targets.iter().enumerate() {
            reporter.language_started(index + 1, targets.len(), code, total_leaves);

            let (existing, warning) = loader::load_existing(&self.config, code);
            if let Some(message) = warning {
                reporter.warning(&message);
            }

            let (reconciled, stats) = Reconciler::new(&translator, code)
                .reconcile(&existing, skeleton, |outcome| reporter.leaf_processed(outcome))
                .map_err(|err| SyncError::Translation {
                    code: (*code).to_string(),
                    source: Box::new(err),
                })?;

            let path = writer::write_tree(&self.config, code, &reconciled)?;
            log::info!(
                "{code}: {} reused, {} translated, {} pruned",
                stats.reused,
                stats.translated,
                stats.pruned
            );
            reporter.language_finished(code, &path, &stats);
            summary.languages.push(LanguageSummary {
                code: (*code).to_string(),
                path,
                stats,
            });
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::fs;

    #[derive(Default)]
    struct UpperTranslator {
        calls: RefCell<usize>,
    }

    impl Translator for UpperTranslator {
        type Error = Infallible;

        fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String, Self::Error> {
            *self.calls.borrow_mut() += 1;
            Ok(text.to_uppercase())
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        started: Vec<(usize, usize, String, usize)>,
        leaves: usize,
        finished: Vec<String>,
        warnings: Vec<String>,
    }

    impl SyncReporter for RecordingReporter {
        fn language_started(&mut self, index: usize, total: usize, code: &str, leaves: usize) {
            self.started.push((index, total, code.to_string(), leaves));
        }

        fn leaf_processed(&mut self, _outcome: LeafOutcome) {
            self.leaves += 1;
        }

        fn language_finished(&mut self, code: &str, _path: &Path, _stats: &ReconcileStats) {
            self.finished.push(code.to_string());
        }

        fn warning(&mut self, message: &str) {
            self.warnings.push(message.to_string());
        }
    }

    fn temp_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "locale-sync-lib-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn reports_each_language_in_order() {
        let dir = temp_dir("report");
        fs::write(dir.join("en.json"), r#"{"a": "ok", "b": {"c": "ok", "d": "bye"}}"#).unwrap();
        fs::write(dir.join("fr.json"), r#"{"a": "d'accord"}"#).unwrap();
        fs::write(dir.join("de.json"), "oops").unwrap();

        let sync = Synchronizer::new(RunConfig::new(&dir, "en"), UpperTranslator::default());
        let mut reporter = RecordingReporter::default();
        let summary = sync.run(&mut reporter).unwrap();

        assert_eq!(
            reporter.started,
            vec![(1, 2, "de".to_string(), 3), (2, 2, "fr".to_string(), 3)]
        );
        assert_eq!(reporter.leaves, 6);
        assert_eq!(reporter.finished, vec!["de", "fr"]);
        assert_eq!(reporter.warnings.len(), 1);
        assert_eq!(summary.translated(), 5);
        assert_eq!(summary.reused(), 1);
    }

    #[test]
    fn cache_deduplicates_identical_leaves() {
        let dir = temp_dir("cache");
        fs::write(dir.join("en.json"), r#"{"a": "ok", "b": {"c": "ok"}}"#).unwrap();
        fs::write(dir.join("it.json"), "{}").unwrap();

        let backend = UpperTranslator::default();
        let summary = Synchronizer::new(RunConfig::new(&dir, "en"), &backend)
            .run(&mut NullReporter)
            .unwrap();
        assert_eq!(*backend.calls.borrow(), 1);
        assert_eq!(summary.cache_hits, 1);

        fs::write(dir.join("it.json"), "{}").unwrap();
        let uncached = UpperTranslator::default();
        let config = RunConfig {
            cache_translations: false,
            ..RunConfig::new(&dir, "en")
        };
        Synchronizer::new(config, &uncached)
            .run(&mut NullReporter)
            .unwrap();
        assert_eq!(*uncached.calls.borrow(), 2);
    }

    #[test]
    fn invalid_config_fails_before_touching_disk() {
        let config = RunConfig {
            sentinel: String::new(),
            ..RunConfig::new("does-not-matter", "en")
        };
        let err = Synchronizer::new(config, UpperTranslator::default())
            .run(&mut NullReporter)
            .unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }
}
