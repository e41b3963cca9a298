use std::fs;
use std::path::PathBuf;

use crate::config::RunConfig;
use crate::error::SyncError;
use crate::tree::LocaleTree;

/// Two-space indented JSON with a trailing newline. Non-ASCII text is written
/// as is, not escaped.
///
/// # Errors
///
/// Returns [`SyncError::Serialize`] if the tree cannot be encoded.
pub fn render_tree(code: &str, tree: &LocaleTree) -> Result<String, SyncError> {
    let mut text = serde_json::to_string_pretty(tree).map_err(|source| SyncError::Serialize {
        code: code.to_string(),
        source,
    })?;
    text.push('\n');
    Ok(text)
}

/// Sibling file the rendered tree is written to before it replaces the target.
fn staging_path(config: &RunConfig, code: &str) -> PathBuf {
    config.directory.join(format!(".{code}.json.tmp"))
}

/// Replace `<dir>/<code>.json` with the tree.
///
/// The content is written to a hidden sibling file first and renamed over the
/// target, so a failed write never leaves a truncated language file behind.
///
/// # Errors
///
/// Returns an error if rendering, writing or the final rename fails.
pub fn write_tree(config: &RunConfig, code: &str, tree: &LocaleTree) -> Result<PathBuf, SyncError> {
    let path = config.file_path(code);
    let staging = staging_path(config, code);
    let text = render_tree(code, tree)?;

    let result = fs::write(&staging, text)
        .map_err(|source| SyncError::Write {
            path: staging.clone(),
            source,
        })
        .and_then(|()| {
            fs::rename(&staging, &path).map_err(|source| SyncError::Write {
                path: path.clone(),
                source,
            })
        });
    if result.is_err()
        && let Err(err) = fs::remove_file(&staging)
        && err.kind() != std::io::ErrorKind::NotFound
    {
        log::warn!("could not remove {}: {err}", staging.display());
    }
    result.map(|()| path)
}
