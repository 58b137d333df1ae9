//! Homebrew itself.
use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources, process_resources_remove};
use crate::resources::homebrew::HomebrewResource;

/// Build the Homebrew resource from the manifest.
pub(super) fn resource(ctx: &Context) -> HomebrewResource<'_> {
    let brew = &ctx.manifest().homebrew;
    HomebrewResource::new(
        brew.install_url.clone(),
        brew.install_sha256.clone(),
        brew.uninstall_url.clone(),
        ctx.executor.as_ref(),
        ctx.downloader.as_ref(),
    )
}

/// Install Homebrew with its upstream install script.
#[derive(Debug)]
pub struct InstallHomebrew;

impl Task for InstallHomebrew {
    fn name(&self) -> &'static str {
        "Install Homebrew"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_resources(ctx, [resource(ctx)], &ProcessOpts::apply_all("install"))
    }
}

/// Remove Homebrew itself.  Opt-in via `homebrew.uninstall`.
#[derive(Debug)]
pub struct UninstallHomebrew;

impl Task for UninstallHomebrew {
    fn name(&self) -> &'static str {
        "Uninstall Homebrew"
    }

    super::task_deps![super::packages::RemovePackages];

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.manifest().homebrew.uninstall
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_resources_remove(ctx, [resource(ctx)], "uninstall")
    }
}
