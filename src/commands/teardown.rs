//! `macsetup teardown`.
use std::sync::Arc;

use anyhow::Result;

use crate::cli::{GlobalOpts, TeardownOpts};
use crate::logging::{Log, Logger};
use crate::tasks::{self, Task};

use super::{CommandSetup, OnFailure};

/// Run the teardown command.
///
/// Backups are restored first; every removal is best effort, so a task
/// failure does not stop the tasks after it.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or any task fails.
pub fn run(global: &GlobalOpts, _opts: &TeardownOpts, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("macsetup {}", super::version()));
    if global.dry_run {
        log.info("dry run: no changes will be made");
    }

    let setup = CommandSetup::init(global, log)?;
    let ctx = setup.into_context(global.dry_run, Arc::clone(log) as Arc<dyn Log>);

    let all_tasks = tasks::all_teardown_tasks();
    let refs: Vec<&dyn Task> = all_tasks.iter().map(AsRef::as_ref).collect();
    super::run_tasks(&refs, &ctx, log, OnFailure::Continue)
}
