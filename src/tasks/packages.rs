//! Homebrew formulae.
use anyhow::Result;

use super::{
    Context, ProcessOpts, Task, TaskResult, process_resource_states,
    process_resource_states_remove,
};
use crate::resources::ResourceState;
use crate::resources::package::{BrewPackageResource, get_installed_formulae};

/// Pair every configured formula with its state.
///
/// Queries all installed formulae **once**.  Without a resolvable `brew`
/// every formula reads as missing.
pub(super) fn package_states(ctx: &Context) -> Result<Vec<(BrewPackageResource<'_>, ResourceState)>> {
    let packages = &ctx.manifest().homebrew.packages;
    let installed = if ctx.executor.which("brew") {
        ctx.log.debug(&format!(
            "batch-checking {} formulae with a single query",
            packages.len()
        ));
        get_installed_formulae(ctx.executor.as_ref())?
    } else {
        ctx.log.debug("brew not found, treating all formulae as missing");
        std::collections::HashSet::new()
    };
    Ok(packages
        .iter()
        .map(|name| {
            let resource = BrewPackageResource::new(name.clone(), ctx.executor.as_ref());
            let state = resource.state_from_installed(&installed);
            (resource, state)
        })
        .collect())
}

/// Install Homebrew formulae.
#[derive(Debug)]
pub struct InstallPackages;

impl Task for InstallPackages {
    fn name(&self) -> &'static str {
        "Install packages"
    }

    super::task_deps![super::homebrew::InstallHomebrew];

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest().homebrew.packages.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_resource_states(
            ctx,
            package_states(ctx)?,
            &ProcessOpts::apply_all("install"),
        )
    }
}

/// Uninstall Homebrew formulae.
#[derive(Debug)]
pub struct RemovePackages;

impl Task for RemovePackages {
    fn name(&self) -> &'static str {
        "Remove packages"
    }

    super::task_deps![
        super::pipx::RemovePipxPackages,
        super::python::RemovePythonVersions,
        super::oh_my_zsh::RemoveOhMyZsh,
    ];

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest().homebrew.packages.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if !ctx.executor.which("brew") {
            return Ok(TaskResult::Skipped("brew not found".to_string()));
        }
        Ok(process_resource_states_remove(
            ctx,
            package_states(ctx)?,
            "uninstall",
        ))
    }
}
