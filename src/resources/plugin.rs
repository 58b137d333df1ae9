//! Zsh plugins cloned into the Oh My Zsh custom plugin directory.
use std::path::{Path, PathBuf};

use anyhow::Result;
use git2::{FetchOptions, Repository, build::RepoBuilder};

use super::error::ResourceError;
use super::helpers::fs::{ensure_parent_dir, remove_dir_if_exists};
use super::{Applicable, Resource, ResourceChange, ResourceState};

/// A Zsh plugin checked out at `<custom>/plugins/<name>`.
#[derive(Debug, Clone)]
pub struct ZshPluginResource {
    /// Plugin name, also the checkout directory name.
    pub name: String,
    /// Git remote.
    pub url: String,
    /// Checkout directory.
    pub dir: PathBuf,
}

impl ZshPluginResource {
    /// Plugin `name` cloned from `url` into `dir`.
    #[must_use]
    pub const fn new(name: String, url: String, dir: PathBuf) -> Self {
        Self { name, url, dir }
    }
}

/// Whether `url` points at the local file system.
///
/// libgit2's local transport does not support shallow fetches.
fn is_local(url: &str) -> bool {
    url.starts_with("file://") || Path::new(url).is_absolute()
}

/// Clone `url` into `target`, shallowly for remote URLs.
///
/// # Errors
///
/// Returns [`ResourceError::Clone`] if libgit2 fails.
pub fn clone(url: &str, target: &Path) -> Result<Repository, ResourceError> {
    let mut fetch_options = FetchOptions::new();
    if !is_local(url) {
        fetch_options.depth(1);
    }
    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);
    builder
        .clone(url, target)
        .map_err(|source| ResourceError::Clone {
            url: url.to_string(),
            source,
        })
}

impl Applicable for ZshPluginResource {
    fn description(&self) -> String {
        format!("zsh plugin {}", self.name)
    }

    fn apply(&self) -> Result<ResourceChange> {
        ensure_parent_dir(&self.dir)?;
        clone(&self.url, &self.dir)?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        if remove_dir_if_exists(&self.dir)? {
            Ok(ResourceChange::Applied)
        } else {
            Ok(ResourceChange::AlreadyCorrect)
        }
    }
}

impl Resource for ZshPluginResource {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.dir.exists() {
            return Ok(ResourceState::Missing);
        }
        match Repository::open(&self.dir) {
            Ok(_) => Ok(ResourceState::Correct),
            Err(e) => Ok(ResourceState::Invalid {
                reason: format!("{} is not a git repository: {}", self.dir.display(), e.message()),
            }),
        }
    }
}
