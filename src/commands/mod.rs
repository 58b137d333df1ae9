//! Top-level subcommands and the setup they share.
pub mod setup;
pub mod teardown;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::config::validation;
use crate::error::PlatformError;
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger, TaskStatus};
use crate::platform::Platform;
use crate::resources::helpers::download::HttpDownloader;
use crate::tasks::{self, Context, Task, graph};

/// Version string embedded at build time.
#[must_use]
pub fn version() -> &'static str {
    option_env!("MACSETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Resolve the home directory: `--home` / `MACSETUP_HOME`, then `$HOME`.
///
/// # Errors
///
/// Returns [`PlatformError::HomeNotSet`] if neither is available.
pub fn resolve_home(global: &GlobalOpts) -> Result<PathBuf, PlatformError> {
    if let Some(home) = &global.home {
        return Ok(home.clone());
    }
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .ok_or(PlatformError::HomeNotSet)
}

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates platform detection, home resolution, and manifest loading
/// so that each command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Detected platform.
    pub platform: Platform,
    /// Loaded manifest.
    pub config: Config,
    /// Home directory everything is installed under.
    pub home: PathBuf,
}

impl CommandSetup {
    /// Detect the platform, resolve the home directory, and load the manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform is unsupported, no home directory can
    /// be determined, or the manifest fails to load.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let platform = Platform::detect();
        if !platform.is_supported() {
            return Err(PlatformError::Unsupported {
                platform: std::env::consts::OS.to_string(),
            }
            .into());
        }
        if !platform.is_macos() {
            log.warn("not running on macOS; only Homebrew-on-Linux paths are available");
        }
        let home = resolve_home(global)?;
        log.debug(&format!("home: {}", home.display()));

        log.stage("Loading configuration");
        let config = Config::load(global.config.as_deref(), &home)
            .context("failed to load manifest")?;
        let manifest = &config.manifest;
        log.info(&format!("manifest: {}", config.source));
        log.debug(&format!("{} formulae", manifest.homebrew.packages.len()));
        log.debug(&format!("{} zsh plugins", manifest.oh_my_zsh.plugins.len()));
        log.debug(&format!("{} python versions", manifest.python.versions.len()));
        log.debug(&format!("{} pipx packages", manifest.pipx.packages.len()));
        log.debug(&format!("{} managed files", manifest.files.len()));

        let warnings = validation::validate(manifest);
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {} configuration warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!(
                    "  {} [{}]: {}",
                    warning.source, warning.item, warning.message
                ));
            }
        }

        Ok(Self {
            platform,
            config,
            home,
        })
    }

    /// Build the task context backed by the real system.
    ///
    /// Tools are looked up under the Homebrew prefix before `PATH`.
    #[must_use]
    pub fn into_context(self, dry_run: bool, log: Arc<dyn Log>) -> Context {
        let executor = SystemExecutor::with_search_paths(self.platform.tool_search_paths());
        Context::new(
            Arc::new(self.config),
            Arc::new(self.platform),
            log,
            dry_run,
            self.home,
            Arc::new(executor),
            Arc::new(HttpDownloader::new()),
        )
    }
}

/// What to do after a task fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Stop and mark every remaining task as not run.
    Abort,
    /// Keep going with the next task.
    Continue,
}

/// Order tasks by dependency, execute them, print the summary, and bail if
/// any task failed.
///
/// # Errors
///
/// Returns an error if the dependency graph has a cycle or one or more tasks
/// recorded a failure.
pub fn run_tasks(
    tasks: &[&dyn Task],
    ctx: &Context,
    log: &Logger,
    on_failure: OnFailure,
) -> Result<()> {
    let order = graph::execution_order(tasks)?;
    log.debug(&format!(
        "execution order: {}",
        order.iter().map(|t| t.name()).collect::<Vec<_>>().join(" → ")
    ));

    for (i, task) in order.iter().enumerate() {
        let status = tasks::execute(*task, ctx);
        if status == TaskStatus::Failed && on_failure == OnFailure::Abort {
            for rest in order.iter().skip(i + 1) {
                ctx.log.record_task(
                    rest.name(),
                    TaskStatus::Skipped,
                    Some("not run: earlier task failed"),
                );
            }
            break;
        }
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} task(s) failed");
    }
    Ok(())
}
