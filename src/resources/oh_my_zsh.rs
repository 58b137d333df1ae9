//! Oh My Zsh framework directory.
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use super::helpers::download::Downloader;
use super::helpers::fs::remove_dir_if_exists;
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// Oh My Zsh, installed by its unattended upstream installer.
#[derive(Debug)]
pub struct OhMyZshResource<'a> {
    /// Installation directory (`~/.oh-my-zsh` by default).
    pub dir: PathBuf,
    install_url: String,
    install_sha256: Option<String>,
    executor: &'a dyn Executor,
    downloader: &'a dyn Downloader,
}

impl<'a> OhMyZshResource<'a> {
    /// Oh My Zsh checked out at `dir`, installed from `install_url`.
    #[must_use]
    pub const fn new(
        dir: PathBuf,
        install_url: String,
        install_sha256: Option<String>,
        executor: &'a dyn Executor,
        downloader: &'a dyn Downloader,
    ) -> Self {
        Self {
            dir,
            install_url,
            install_sha256,
            executor,
            downloader,
        }
    }
}

impl Applicable for OhMyZshResource<'_> {
    fn description(&self) -> String {
        format!("Oh My Zsh ({})", self.dir.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        let script = self
            .downloader
            .fetch_verified(&self.install_url, self.install_sha256.as_deref())?;
        let dir = self.dir.to_string_lossy();
        // The installer must not touch the login shell or an existing .zshrc.
        self.executor
            .run_with_env(
                "sh",
                &["-c", &script, "", "--unattended"],
                &[
                    ("ZSH", dir.as_ref()),
                    ("RUNZSH", "no"),
                    ("CHSH", "no"),
                    ("KEEP_ZSHRC", "yes"),
                ],
            )
            .context("running Oh My Zsh installer")?;
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

impl Resource for OhMyZshResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if self.dir.is_dir() {
            Ok(ResourceState::Correct)
        } else if self.dir.exists() {
            Ok(ResourceState::Invalid {
                reason: format!("{} exists but is not a directory", self.dir.display()),
            })
        } else {
            Ok(ResourceState::Missing)
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::{MockDownloader, MockExecutor};

    fn resource<'a>(
        dir: PathBuf,
        executor: &'a MockExecutor,
        downloader: &'a MockDownloader,
    ) -> OhMyZshResource<'a> {
        OhMyZshResource::new(
            dir,
            "https://example.com/omz.sh".to_string(),
            None,
            executor,
            downloader,
        )
    }

    #[test]
    fn state_follows_directory() {
        let home = tempfile::tempdir().unwrap();
        let dir = home.path().join(".oh-my-zsh");
        let executor = MockExecutor::empty();
        let downloader = MockDownloader::serving("");
        let r = resource(dir.clone(), &executor, &downloader);
        assert_eq!(r.current_state().unwrap(), ResourceState::Missing);
        std::fs::create_dir(&dir).unwrap();
        assert_eq!(r.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn state_invalid_when_path_is_a_file() {
        let home = tempfile::tempdir().unwrap();
        let dir = home.path().join(".oh-my-zsh");
        std::fs::write(&dir, "").unwrap();
        let executor = MockExecutor::empty();
        let downloader = MockDownloader::serving("");
        let r = resource(dir, &executor, &downloader);
        assert!(matches!(
            r.current_state().unwrap(),
            ResourceState::Invalid { .. }
        ));
    }

    #[test]
    fn apply_runs_unattended_installer() {
        let home = tempfile::tempdir().unwrap();
        let dir = home.path().join(".oh-my-zsh");
        let executor = MockExecutor::ok("");
        let downloader = MockDownloader::serving("echo omz");
        let r = resource(dir.clone(), &executor, &downloader);
        assert_eq!(r.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(executor.calls(), vec!["sh -c echo omz  --unattended"]);
        let env = &executor.envs()[0];
        assert!(env.contains(&("RUNZSH".to_string(), "no".to_string())));
        assert!(env.contains(&("CHSH".to_string(), "no".to_string())));
        assert!(env.contains(&("KEEP_ZSHRC".to_string(), "yes".to_string())));
        assert!(env.contains(&("ZSH".to_string(), dir.to_string_lossy().to_string())));
    }

    #[test]
    fn remove_deletes_directory_and_tolerates_absence() {
        let home = tempfile::tempdir().unwrap();
        let dir = home.path().join(".oh-my-zsh");
        std::fs::create_dir_all(dir.join("custom/plugins")).unwrap();
        let executor = MockExecutor::empty();
        let downloader = MockDownloader::serving("");
        let r = resource(dir.clone(), &executor, &downloader);
        assert_eq!(r.remove().unwrap(), ResourceChange::Applied);
        assert!(!dir.exists());
        assert_eq!(r.remove().unwrap(), ResourceChange::AlreadyCorrect);
    }
}
