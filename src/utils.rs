// ABOUTME: Utility functions for the soapbox compiler
// ABOUTME: Path validation, traversal rejection, and encoded source reading

use crate::errors::{DeckError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Validate that a directory exists
pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DeckError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(DeckError::ValidationError(format!(
            "Path is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Resolve a relative asset path under the presentation root, rejecting
/// anything that escapes it. The check happens before any file read.
pub fn resolve_within_root(root: &Path, relative: &str) -> Result<PathBuf> {
    let root = fs::canonicalize(root)?;
    let candidate = root.join(relative);
    let resolved = fs::canonicalize(&candidate)
        .map_err(|_| DeckError::PathNotFoundError(candidate.clone()))?;
    if !resolved.starts_with(&root) {
        return Err(DeckError::PathTraversalError(resolved));
    }
    Ok(resolved)
}

/// Read a markdown source file, honoring the configured encoding label.
/// Unknown or absent labels read the file as UTF-8, lossily, so a stray byte
/// cannot abort a compile pass.
pub fn read_source(path: &Path, encoding: Option<&str>) -> Result<String> {
    let bytes = fs::read(path)?;
    match encoding.and_then(|label| encoding_rs::Encoding::for_label(label.as_bytes())) {
        Some(encoding) => {
            let (text, _, _) = encoding.decode(&bytes);
            Ok(text.into_owned())
        }
        None => Ok(String::from_utf8_lossy(&bytes).into_owned()),
    }
}
