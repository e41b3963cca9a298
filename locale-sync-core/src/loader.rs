//! Loading language files into localization trees.

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::config::RunConfig;
use crate::error::{LoadError, SyncError};
use crate::tree::LocaleTree;

/// Parse a language file. The top-level value must be an object.
///
/// # Errors
///
/// Returns a [`LoadError`] describing why the file could not be used.
pub fn read_tree(path: &Path) -> Result<LocaleTree, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // A BOM would otherwise be a JSON syntax error.
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    match serde_json::from_str(content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(LoadError::NotAnObject {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load the canonical tree. Any failure is fatal.
///
/// # Errors
///
/// Returns [`SyncError::SourceUnreadable`] or [`SyncError::SourceDecode`].
pub fn load_skeleton(config: &RunConfig) -> Result<LocaleTree, SyncError> {
    let code = config.source_language.as_str();
    read_tree(&config.file_path(code)).map_err(|err| match err {
        LoadError::Io { path, source } => SyncError::SourceUnreadable { path, source },
        LoadError::Json { source, .. } => SyncError::SourceDecode {
            code: code.to_string(),
            reason: source.to_string(),
        },
        LoadError::NotAnObject { .. } => SyncError::SourceDecode {
            code: code.to_string(),
            reason: "top-level value is not an object".to_string(),
        },
    })
}

/// Load a target language's current translation.
///
/// Missing or broken files yield an empty tree plus the warning to show the
/// user, so the language is translated from scratch.
#[must_use]
pub fn load_existing(config: &RunConfig, code: &str) -> (LocaleTree, Option<String>) {
    match read_tree(&config.file_path(code)) {
        Ok(tree) => (tree, None),
        Err(err) => {
            log::info!("{err}");
            let warning = format!(
                "Could not decode json file: {}. Creating empty object",
                RunConfig::file_name(code)
            );
            (LocaleTree::new(), Some(warning))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "locale-sync-load-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn reads_objects_and_keeps_key_order() {
        let dir = temp_dir("order");
        fs::write(dir.join("en.json"), r#"{"zeta": "Z", "alpha": {"b": "B"}}"#).unwrap();
        let tree = read_tree(&dir.join("en.json")).unwrap();
        let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn byte_order_mark_is_tolerated() {
        let dir = temp_dir("bom");
        fs::write(dir.join("en.json"), "\u{feff}{\"a\": \"A\"}").unwrap();
        assert_eq!(read_tree(&dir.join("en.json")).unwrap().len(), 1);
    }

    #[test]
    fn broken_source_is_fatal() {
        let dir = temp_dir("broken-source");
        fs::write(dir.join("en.json"), "{ not json").unwrap();
        let config = RunConfig::new(&dir, "en");
        let err = load_skeleton(&config).unwrap_err();
        assert!(matches!(err, SyncError::SourceDecode { .. }));
        assert!(err.to_string().contains("en.json"));
    }

    #[test]
    fn array_source_is_fatal() {
        let dir = temp_dir("array-source");
        fs::write(dir.join("en.json"), "[]").unwrap();
        let config = RunConfig::new(&dir, "en");
        assert!(matches!(
            load_skeleton(&config),
            Err(SyncError::SourceDecode { .. })
        ));
    }

    #[test]
    fn broken_or_missing_target_becomes_empty() {
        let dir = temp_dir("broken-target");
        fs::write(dir.join("fr.json"), "{\"a\": ").unwrap();
        let config = RunConfig::new(&dir, "en");

        let (tree, warning) = load_existing(&config, "fr");
        assert!(tree.is_empty());
        assert_eq!(
            warning.as_deref(),
            Some("Could not decode json file: fr.json. Creating empty object")
        );

        let (tree, warning) = load_existing(&config, "de");
        assert!(tree.is_empty());
        assert!(warning.is_some());
    }
}
