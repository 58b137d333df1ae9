//! Homebrew itself, installed and removed with its upstream scripts.
use anyhow::{Context as _, Result};

use super::helpers::download::Downloader;
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// The Homebrew package manager.
#[derive(Debug)]
pub struct HomebrewResource<'a> {
    install_url: String,
    install_sha256: Option<String>,
    uninstall_url: String,
    executor: &'a dyn Executor,
    downloader: &'a dyn Downloader,
}

impl<'a> HomebrewResource<'a> {
    /// Homebrew installed and removed with the given upstream scripts.
    #[must_use]
    pub const fn new(
        install_url: String,
        install_sha256: Option<String>,
        uninstall_url: String,
        executor: &'a dyn Executor,
        downloader: &'a dyn Downloader,
    ) -> Self {
        Self {
            install_url,
            install_sha256,
            uninstall_url,
            executor,
            downloader,
        }
    }

    /// Download `url` and run it with `/bin/bash -c` non-interactively.
    fn run_script(&self, url: &str, sha256: Option<&str>) -> Result<()> {
        let script = self.downloader.fetch_verified(url, sha256)?;
        self.executor
            .run_with_env("/bin/bash", &["-c", &script], &[("NONINTERACTIVE", "1")])
            .with_context(|| format!("running {url}"))?;
        Ok(())
    }
}

impl Applicable for HomebrewResource<'_> {
    fn description(&self) -> String {
        "Homebrew".to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.run_script(&self.install_url, self.install_sha256.as_deref())?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        self.run_script(&self.uninstall_url, None)?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for HomebrewResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if self.executor.which("brew") {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }
}
