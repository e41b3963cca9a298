use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that stop a synchronization run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Directory {} not found", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("No json files found in directory {}", .0.display())]
    NoLanguageFiles(PathBuf),
    #[error("Missing source language file: {0}.json")]
    MissingSourceFile(String),
    #[error("Could not read source language json file {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not decode source language json file: {code}.json ({reason})")]
    SourceDecode { code: String, reason: String },
    #[error("Could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not serialize translation for {code}: {source}")]
    Serialize {
        code: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Translation into '{code}' failed: {source}")]
    Translation {
        code: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while loading a single language file.
///
/// For the source language these become [`SyncError`]s; for every other
/// language they are downgraded to a warning and an empty tree.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("top-level value in {} is not an object", .path.display())]
    NotAnObject { path: PathBuf },
}
