//! Backups of pre-existing configuration files.
//!
//! A record is a plain copy stored at the original's path relative to home,
//! mirrored under the backup directory (`~/.config/git/config` is kept as
//! `<backup dir>/.config/git/config`).  It is written before the first time
//! setup overwrites the original, is never replaced by later runs, and is
//! deleted once teardown restores it.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::error::ResourceError;
use super::helpers::fs::ensure_parent_dir;
use super::{Applicable, Resource, ResourceChange, ResourceState};

/// Directory holding backup records for files under `home`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupStore {
    home: PathBuf,
    dir: PathBuf,
}

impl BackupStore {
    /// Store for originals under `home`, kept in `dir`.
    #[must_use]
    pub const fn new(home: PathBuf, dir: PathBuf) -> Self {
        Self { home, dir }
    }

    /// Root of the record tree.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the record for `original`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidState`] if `original` is not a file
    /// path below the home directory.
    pub fn record_path(&self, original: &Path) -> Result<PathBuf, ResourceError> {
        match original.strip_prefix(&self.home) {
            Ok(relative) if relative.file_name().is_some() => Ok(self.dir.join(relative)),
            _ => Err(ResourceError::InvalidState {
                resource: original.display().to_string(),
                reason: format!("not a file below {}", self.home.display()),
            }),
        }
    }

    /// Whether a record exists for `original`.
    #[must_use]
    pub fn has_record(&self, original: &Path) -> bool {
        self.record_path(original).is_ok_and(|p| p.is_file())
    }

    /// Copy `original` into the store.
    ///
    /// Returns `false` without touching anything when a record already
    /// exists or when `original` does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy fails.
    pub fn backup(&self, original: &Path) -> Result<bool> {
        let record = self.record_path(original)?;
        if record.exists() || !original.is_file() {
            return Ok(false);
        }
        ensure_parent_dir(&record)?;
        std::fs::copy(original, &record).with_context(|| {
            format!("back up {} to {}", original.display(), record.display())
        })?;
        Ok(true)
    }

    /// Copy the record for `original` back into place and delete it.
    ///
    /// Directories of the record tree, the backup directory included, are
    /// removed once empty.  Returns `false` when there is no record.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy or cleanup fails.
    pub fn restore(&self, original: &Path) -> Result<bool> {
        let record = self.record_path(original)?;
        if !record.is_file() {
            return Ok(false);
        }
        ensure_parent_dir(original)?;
        std::fs::copy(&record, original).with_context(|| {
            format!("restore {} from {}", original.display(), record.display())
        })?;
        std::fs::remove_file(&record)
            .with_context(|| format!("remove backup record: {}", record.display()))?;
        self.prune(&record);
        Ok(true)
    }

    /// Remove empty directories from `record`'s parent up to the store root.
    fn prune(&self, record: &Path) {
        let mut dir = record.parent();
        while let Some(d) = dir.filter(|d| d.starts_with(&self.dir)) {
            let empty = std::fs::read_dir(d).is_ok_and(|mut entries| entries.next().is_none());
            if !empty || std::fs::remove_dir(d).is_err() {
                break;
            }
            dir = d.parent();
        }
    }

    /// The subset of `originals` that have a record.
    #[must_use]
    pub fn records<'p>(&self, originals: impl IntoIterator<Item = &'p Path>) -> Vec<PathBuf> {
        originals
            .into_iter()
            .filter(|p| self.has_record(p))
            .map(Path::to_path_buf)
            .collect()
    }
}

/// A backup record waiting to be restored on teardown.
///
/// Present (`Correct`) while the record exists; removal restores it.
#[derive(Debug)]
pub struct BackupRestoreResource<'a> {
    /// Managed file the record belongs to.
    pub original: PathBuf,
    store: &'a BackupStore,
}

impl<'a> BackupRestoreResource<'a> {
    /// Restore target `original`, looked up in `store`.
    #[must_use]
    pub const fn new(original: PathBuf, store: &'a BackupStore) -> Self {
        Self { original, store }
    }
}

impl Applicable for BackupRestoreResource<'_> {
    fn description(&self) -> String {
        format!("backup of {}", self.original.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        if self.store.backup(&self.original)? {
            Ok(ResourceChange::Applied)
        } else {
            Ok(ResourceChange::AlreadyCorrect)
        }
    }

    fn remove(&self) -> Result<ResourceChange> {
        if self.store.restore(&self.original)? {
            Ok(ResourceChange::Applied)
        } else {
            Ok(ResourceChange::AlreadyCorrect)
        }
    }
}

impl Resource for BackupRestoreResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if self.store.has_record(&self.original) {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }
}
