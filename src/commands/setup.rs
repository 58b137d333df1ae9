//! `macsetup setup`.
use std::sync::Arc;

use anyhow::Result;

use crate::cli::{GlobalOpts, SetupOpts};
use crate::logging::{Log, Logger};
use crate::tasks::{self, Task};

use super::{CommandSetup, OnFailure};

/// Run the setup command.
///
/// Tasks run in dependency order and the first failure stops the run.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or any task fails.
pub fn run(global: &GlobalOpts, opts: &SetupOpts, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("macsetup {}", super::version()));
    if global.dry_run {
        log.info("dry run: no changes will be made");
    }

    let setup = CommandSetup::init(global, log)?;
    let ctx = setup.into_context(global.dry_run, Arc::clone(log) as Arc<dyn Log>);

    let all_tasks = tasks::all_setup_tasks();
    let selected = select(&all_tasks, opts);
    if selected.is_empty() {
        anyhow::bail!("no task matches --only/--skip");
    }

    super::run_tasks(&selected, &ctx, log, OnFailure::Abort)
}

/// Apply the `--only` / `--skip` filters by case-insensitive name substring.
///
/// `--only` takes precedence when both are given.
#[must_use]
pub fn select<'a>(all_tasks: &'a [Box<dyn Task>], opts: &SetupOpts) -> Vec<&'a dyn Task> {
    let matches = |name: &str, patterns: &[String]| {
        patterns
            .iter()
            .any(|p| name.contains(&p.to_lowercase()))
    };
    all_tasks
        .iter()
        .filter(|t| {
            let name = t.name().to_lowercase();
            if !opts.only.is_empty() {
                return matches(&name, &opts.only);
            }
            !matches(&name, &opts.skip)
        })
        .map(AsRef::as_ref)
        .collect()
}
