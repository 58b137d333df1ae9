//! The login shell.
use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::shell::DefaultShellResource;

/// The default shell resource compared against `$SHELL`, if one is configured.
pub(super) fn default_shell(ctx: &Context) -> Option<DefaultShellResource<'_>> {
    ctx.manifest()
        .shell
        .default
        .as_ref()
        .map(|shell| DefaultShellResource::from_env(shell.clone(), ctx.executor.as_ref()))
}

/// Make the configured shell the login shell.
#[derive(Debug)]
pub struct SetDefaultShell;

impl Task for SetDefaultShell {
    fn name(&self) -> &'static str {
        "Set default shell"
    }

    super::task_deps![super::packages::InstallPackages];

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.manifest().shell.default.is_some()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let Some(resource) = default_shell(ctx) else {
            return Ok(TaskResult::Skipped("no default shell configured".to_string()));
        };
        process_resources(ctx, [resource], &ProcessOpts::apply_all("set"))
    }
}
