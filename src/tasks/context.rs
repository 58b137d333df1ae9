//! Shared state handed to every task.
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Config, Manifest};
use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::Platform;
use crate::resources::backup::BackupStore;
use crate::resources::helpers::download::Downloader;

/// Everything a task can see: the manifest, the machine, and the seams
/// tests replace.
pub struct Context {
    /// Manifest plus its origin.
    pub config: Arc<Config>,
    /// OS and Homebrew prefix.
    pub platform: Arc<Platform>,
    /// Output sink.
    pub log: Arc<dyn Log>,
    /// Report changes instead of making them.
    pub dry_run: bool,
    /// Root for managed files, backups and Oh My Zsh.
    pub home: PathBuf,
    /// Runs `brew`, `pyenv`, `pipx`, `chsh`.
    pub executor: Arc<dyn Executor>,
    /// Fetches installer scripts.
    pub downloader: Arc<dyn Downloader>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("manifest", &self.config.source)
            .field("platform", &self.platform)
            .field("dry_run", &self.dry_run)
            .field("home", &self.home)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Assemble a context.
    #[must_use]
    pub fn new(
        config: Arc<Config>,
        platform: Arc<Platform>,
        log: Arc<dyn Log>,
        dry_run: bool,
        home: PathBuf,
        executor: Arc<dyn Executor>,
        downloader: Arc<dyn Downloader>,
    ) -> Self {
        Self {
            config,
            platform,
            log,
            dry_run,
            home,
            executor,
            downloader,
        }
    }

    /// Shorthand for `config.manifest`.
    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.config.manifest
    }

    /// `$HOME/<oh_my_zsh.dir>`.
    #[must_use]
    pub fn oh_my_zsh_dir(&self) -> PathBuf {
        self.home.join(&self.manifest().oh_my_zsh.dir)
    }

    /// Where third-party plugins are cloned.
    #[must_use]
    pub fn plugins_dir(&self) -> PathBuf {
        self.oh_my_zsh_dir().join("custom").join("plugins")
    }

    /// Backups of files replaced by setup.
    #[must_use]
    pub fn backup_store(&self) -> BackupStore {
        BackupStore::new(
            self.home.clone(),
            self.home.join(&self.manifest().backup.dir),
        )
    }

    /// Same context, different log sink.
    #[must_use]
    pub fn with_log(&self, log: Arc<dyn Log>) -> Self {
        Self {
            log,
            config: Arc::clone(&self.config),
            platform: Arc::clone(&self.platform),
            executor: Arc::clone(&self.executor),
            downloader: Arc::clone(&self.downloader),
            home: self.home.clone(),
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tasks::test_helpers::{RecordingLog, empty_config, make_context};

    #[test]
    fn paths_are_rooted_at_home() {
        let ctx = make_context(empty_config(), PathBuf::from("/Users/test"));
        assert_eq!(ctx.oh_my_zsh_dir(), PathBuf::from("/Users/test/.oh-my-zsh"));
        assert_eq!(
            ctx.plugins_dir(),
            PathBuf::from("/Users/test/.oh-my-zsh/custom/plugins")
        );
        assert_eq!(
            ctx.backup_store().dir(),
            PathBuf::from("/Users/test/.macsetup_backup")
        );
    }

    #[test]
    fn swapped_log_receives_messages() {
        let mut ctx = make_context(empty_config(), PathBuf::from("/Users/test"));
        ctx.dry_run = true;
        let recorder = Arc::new(RecordingLog::default());

        let swapped = ctx.with_log(Arc::clone(&recorder) as Arc<dyn Log>);
        swapped.log.info("hello");

        assert!(swapped.dry_run);
        assert_eq!(swapped.home, ctx.home);
        assert!(recorder.contains("[info] hello"));
    }

    #[test]
    fn debug_output_shows_home_not_seams() {
        let ctx = make_context(empty_config(), PathBuf::from("/Users/test"));
        let debug = format!("{ctx:?}");
        assert!(debug.contains("/Users/test"));
        assert!(!debug.contains("executor"));
    }
}
