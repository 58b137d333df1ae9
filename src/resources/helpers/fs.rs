//! Small filesystem wrappers that treat "already gone" as success.
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context as _, Result};

/// Create every missing ancestor directory of `path`.
///
/// # Errors
///
/// Fails if a directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("cannot create directory {}", parent.display()))
}

/// File contents as UTF-8, or `None` when there is no file.
///
/// # Errors
///
/// Fails on any other read error, including invalid UTF-8.
pub fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("cannot read {}", path.display())),
    }
}

/// Delete a file or symlink (dangling ones too). Returns whether anything
/// was deleted.
///
/// # Errors
///
/// Fails if the entry exists but cannot be deleted.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("cannot delete {}", path.display())),
    }
}

/// Delete a directory tree. Returns whether anything was deleted.
///
/// # Errors
///
/// Fails if the tree exists but cannot be deleted.
pub fn remove_dir_if_exists(path: &Path) -> Result<bool> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("cannot delete {}", path.display())),
    }
}
