//! Python versions and the global selection under pyenv.
use anyhow::Result;

use super::{
    Context, ProcessOpts, Task, TaskResult, process_resource_states,
    process_resource_states_remove,
};
use crate::resources::{Resource as _, ResourceState};
use crate::resources::python::{PyenvGlobalResource, PythonVersionResource, get_installed_versions};

/// Pair every configured Python version with its state.
pub(super) fn version_states(
    ctx: &Context,
) -> Result<Vec<(PythonVersionResource<'_>, ResourceState)>> {
    let installed = if ctx.executor.which("pyenv") {
        get_installed_versions(ctx.executor.as_ref())?
    } else {
        ctx.log.debug("pyenv not found, treating all versions as missing");
        std::collections::HashSet::new()
    };
    Ok(ctx
        .manifest()
        .python
        .versions
        .iter()
        .map(|v| {
            let resource = PythonVersionResource::new(v.clone(), ctx.executor.as_ref());
            let state = resource.state_from_installed(&installed);
            (resource, state)
        })
        .collect())
}

/// The pyenv global resource, if one is configured.
pub(super) fn global(ctx: &Context) -> Option<PyenvGlobalResource<'_>> {
    ctx.manifest()
        .python
        .global
        .as_ref()
        .map(|v| PyenvGlobalResource::new(v.clone(), ctx.executor.as_ref()))
}

/// State of the pyenv global version, treating a missing `pyenv` as unset.
pub(super) fn global_state(ctx: &Context, resource: &PyenvGlobalResource<'_>) -> Result<ResourceState> {
    if ctx.executor.which("pyenv") {
        resource.current_state()
    } else {
        Ok(ResourceState::Missing)
    }
}

/// Install Python versions with pyenv.
#[derive(Debug)]
pub struct InstallPythonVersions;

impl Task for InstallPythonVersions {
    fn name(&self) -> &'static str {
        "Install Python versions"
    }

    super::task_deps![super::packages::InstallPackages];

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest().python.versions.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_resource_states(
            ctx,
            version_states(ctx)?,
            &ProcessOpts::apply_all("install"),
        )
    }
}

/// Select the pyenv global version.
#[derive(Debug)]
pub struct SetPythonGlobal;

impl Task for SetPythonGlobal {
    fn name(&self) -> &'static str {
        "Set pyenv global"
    }

    super::task_deps![InstallPythonVersions];

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.manifest().python.global.is_some()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let Some(resource) = global(ctx) else {
            return Ok(TaskResult::Skipped("no global version configured".to_string()));
        };
        let state = global_state(ctx, &resource)?;
        process_resource_states(ctx, [(resource, state)], &ProcessOpts::apply_all("set"))
    }
}

/// Uninstall Python versions.  The global selection is left as is.
#[derive(Debug)]
pub struct RemovePythonVersions;

impl Task for RemovePythonVersions {
    fn name(&self) -> &'static str {
        "Remove Python versions"
    }

    super::task_deps![super::pipx::RemovePipxPackages];

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest().python.versions.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if !ctx.executor.which("pyenv") {
            return Ok(TaskResult::Skipped("pyenv not found".to_string()));
        }
        Ok(process_resource_states_remove(
            ctx,
            version_states(ctx)?,
            "uninstall",
        ))
    }
}
