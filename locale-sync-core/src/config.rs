//! Run configuration.
//!
//! Everything a run needs is carried in [`RunConfig`] and handed to each stage
//! explicitly. An optional `locale-sync.toml` next to the language files can
//! supply the source language, sentinel and extra language remaps.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SyncError;
use crate::placeholder::DEFAULT_SENTINEL;

pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";
pub const CONFIG_FILE_NAME: &str = "locale-sync.toml";

/// Codes the translation backend does not accept, mapped to a close relative
/// it does.
const DEFAULT_REMAPS: &[(&str, &str)] = &[("sr", "hr")];

/// Target-language substitutions applied just before calling the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRemap {
    table: BTreeMap<String, String>,
}

impl Default for LanguageRemap {
    fn default() -> Self {
        Self {
            table: DEFAULT_REMAPS
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
        }
    }
}

impl LanguageRemap {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.table.insert(from.into(), to.into());
    }

    /// The code to send to the backend for `code`.
    #[must_use]
    pub fn resolve<'a>(&'a self, code: &'a str) -> &'a str {
        self.table.get(code).map_or(code, String::as_str)
    }

    /// Parse a `from=to` pair as given on the command line.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] when either side is missing.
    pub fn parse_pair(pair: &str) -> Result<(String, String), SyncError> {
        let (from, to) = pair
            .split_once('=')
            .map(|(f, t)| (f.trim(), t.trim()))
            .filter(|(f, t)| !f.is_empty() && !t.is_empty())
            .ok_or_else(|| SyncError::Config(format!("remap '{pair}' must look like from=to")))?;
        Ok((from.to_string(), to.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.table.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Shape of `locale-sync.toml`.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub source: Option<String>,
    pub sentinel: Option<String>,
    #[serde(default)]
    pub remap: BTreeMap<String, String>,
}

impl FileConfig {
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] for TOML syntax or schema errors.
    pub fn from_toml(text: &str) -> Result<Self, SyncError> {
        toml::from_str(text).map_err(|e| SyncError::Config(e.to_string()))
    }

    /// Read a config file. A missing file is only an error if `required`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is required but absent, or unreadable or invalid.
    pub fn load(path: &Path, required: bool) -> Result<Option<Self>, SyncError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                log::info!("Loaded config file: {}", path.display());
                Self::from_toml(&text).map(Some)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => Ok(None),
            Err(err) => Err(SyncError::Config(format!(
                "could not read {}: {err}",
                path.display()
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub directory: PathBuf,
    pub source_language: String,
    pub remap: LanguageRemap,
    pub sentinel: String,
    pub cache_translations: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            remap: LanguageRemap::default(),
            sentinel: DEFAULT_SENTINEL.to_string(),
            cache_translations: true,
        }
    }
}

impl RunConfig {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, source_language: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            source_language: source_language.into(),
            ..Self::default()
        }
    }

    /// Layer a config file on top. Values already chosen explicitly win over
    /// the file for the source language; remaps from the file are added.
    pub fn apply_file(&mut self, file: FileConfig, source_overridden: bool) {
        if let Some(source) = file.source
            && !source_overridden
        {
            self.source_language = source;
        }
        if let Some(sentinel) = file.sentinel {
            self.sentinel = sentinel;
        }
        for (from, to) in file.remap {
            self.remap.insert(from, to);
        }
    }

    /// # Errors
    ///
    /// Returns [`SyncError::Config`] for an empty source code or sentinel.
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.source_language.trim().is_empty() {
            return Err(SyncError::Config("source language must not be empty".into()));
        }
        if self.sentinel.is_empty() {
            return Err(SyncError::Config("sentinel must not be empty".into()));
        }
        if self.sentinel.contains('{') || self.sentinel.contains('}') {
            return Err(SyncError::Config("sentinel must not contain braces".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn file_name(code: &str) -> String {
        format!("{code}.json")
    }

    #[must_use]
    pub fn file_path(&self, code: &str) -> PathBuf {
        self.directory.join(Self::file_name(code))
    }

    #[must_use]
    pub fn default_config_path(&self) -> PathBuf {
        self.directory.join(CONFIG_FILE_NAME)
    }
}
