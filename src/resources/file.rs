//! Static configuration files written with fixed content.
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use super::backup::BackupStore;
use super::helpers::fs::{ensure_parent_dir, read_if_exists, remove_file_if_exists};
use super::{Applicable, Resource, ResourceChange, ResourceState};

/// A file whose entire content is managed.
///
/// A differing pre-existing file is backed up before it is first replaced.
#[derive(Debug)]
pub struct ManagedFileResource<'a> {
    /// Absolute destination.
    pub path: PathBuf,
    /// Full file body.
    pub content: String,
    backups: &'a BackupStore,
}

impl<'a> ManagedFileResource<'a> {
    /// Manage `path` with `content`, saving originals into `backups`.
    #[must_use]
    pub const fn new(path: PathBuf, content: String, backups: &'a BackupStore) -> Self {
        Self {
            path,
            content,
            backups,
        }
    }
}

impl Applicable for ManagedFileResource<'_> {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        if let Some(existing) = read_if_exists(&self.path)?
            && existing != self.content
            && self.backups.backup(&self.path)?
        {
            tracing::debug!("backed up {}", self.path.display());
        }
        ensure_parent_dir(&self.path)?;
        std::fs::write(&self.path, &self.content)
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(ResourceChange::Applied)
    }

    /// Delete the file.  Only called while the content is still ours.
    fn remove(&self) -> Result<ResourceChange> {
        if remove_file_if_exists(&self.path)? {
            Ok(ResourceChange::Applied)
        } else {
            Ok(ResourceChange::AlreadyCorrect)
        }
    }
}

impl Resource for ManagedFileResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if self.path.is_dir() {
            return Ok(ResourceState::Invalid {
                reason: format!("{} is a directory", self.path.display()),
            });
        }
        match read_if_exists(&self.path)? {
            None => Ok(ResourceState::Missing),
            Some(existing) if existing == self.content => Ok(ResourceState::Correct),
            Some(_) => Ok(ResourceState::Incorrect {
                current: "content differs".to_string(),
            }),
        }
    }
}
