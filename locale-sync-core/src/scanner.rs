use std::fs;
use std::path::Path;

use crate::error::SyncError;

/// Language codes for every `<code>.json` file in `dir`, sorted.
///
/// # Errors
///
/// Fails if the directory is missing or holds no JSON files.
pub fn scan_language_codes(dir: &Path) -> Result<Vec<String>, SyncError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(SyncError::DirectoryNotFound(dir.to_path_buf()));
        }
        Err(err) => return Err(SyncError::Io(err)),
    };

    let mut codes = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skipping unreadable entry in {}: {err}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json")
            && path.is_file()
            && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
        {
            codes.push(stem.to_string());
        }
    }

    if codes.is_empty() {
        return Err(SyncError::NoLanguageFiles(dir.to_path_buf()));
    }

    codes.sort();
    log::debug!("found {} language files in {}", codes.len(), dir.display());
    Ok(codes)
}

/// # Errors
///
/// Returns [`SyncError::MissingSourceFile`] if `source` is not among `codes`.
pub fn ensure_source_present(codes: &[String], source: &str) -> Result<(), SyncError> {
    if codes.iter().any(|code| code == source) {
        Ok(())
    } else {
        Err(SyncError::MissingSourceFile(source.to_string()))
    }
}
