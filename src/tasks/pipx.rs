//! Tools installed with pipx.
use anyhow::Result;

use super::{
    Context, ProcessOpts, Task, TaskResult, process_resource_states,
    process_resource_states_remove,
};
use crate::resources::ResourceState;
use crate::resources::pipx::{PipxPackageResource, get_installed_pipx};

/// Pair every configured pipx package with its state.
pub(super) fn pipx_states(ctx: &Context) -> Result<Vec<(PipxPackageResource<'_>, ResourceState)>> {
    let installed = if ctx.executor.which("pipx") {
        get_installed_pipx(ctx.executor.as_ref())?
    } else {
        ctx.log.debug("pipx not found, treating all packages as missing");
        std::collections::HashSet::new()
    };
    Ok(ctx
        .manifest()
        .pipx
        .packages
        .iter()
        .map(|name| {
            let resource = PipxPackageResource::new(name.clone(), ctx.executor.as_ref());
            let state = resource.state_from_installed(&installed);
            (resource, state)
        })
        .collect())
}

/// Install command-line tools with pipx.
#[derive(Debug)]
pub struct InstallPipxPackages;

impl Task for InstallPipxPackages {
    fn name(&self) -> &'static str {
        "Install pipx packages"
    }

    super::task_deps![
        super::packages::InstallPackages,
        super::python::SetPythonGlobal,
    ];

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest().pipx.packages.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_resource_states(ctx, pipx_states(ctx)?, &ProcessOpts::apply_all("install"))
    }
}

/// Uninstall pipx-managed tools.
#[derive(Debug)]
pub struct RemovePipxPackages;

impl Task for RemovePipxPackages {
    fn name(&self) -> &'static str {
        "Remove pipx packages"
    }

    super::task_deps![super::files::RestoreBackups];

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest().pipx.packages.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if !ctx.executor.which("pipx") {
            return Ok(TaskResult::Skipped("pipx not found".to_string()));
        }
        Ok(process_resource_states_remove(
            ctx,
            pipx_states(ctx)?,
            "uninstall",
        ))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Manifest;
    use crate::resources::test_helpers::{MockDownloader, MockExecutor};
    use crate::tasks::test_helpers::{config_from, make_mock_context};

    fn manifest() -> Manifest {
        let mut manifest = Manifest::default();
        manifest.pipx.packages = vec!["poetry".to_string()];
        manifest
    }

    #[test]
    fn installs_poetry_when_missing() {
        let executor = Arc::new(
            MockExecutor::with_responses(vec![
                (true, "black 24.4.2\n".to_string()),
                (true, String::new()),
            ])
            .with_which(true),
        );
        let downloader = Arc::new(MockDownloader::failing());
        let (ctx, _log) = make_mock_context(config_from(manifest()), &executor, &downloader);

        InstallPipxPackages.run(&ctx).unwrap();

        assert_eq!(
            executor.calls(),
            vec!["pipx list --short", "pipx install poetry"]
        );
    }

    #[test]
    fn remove_is_noop_when_not_installed() {
        let executor = Arc::new(
            MockExecutor::with_responses(vec![(true, "black 24.4.2\n".to_string())])
                .with_which(true),
        );
        let downloader = Arc::new(MockDownloader::failing());
        let (ctx, _log) = make_mock_context(config_from(manifest()), &executor, &downloader);

        assert!(matches!(
            RemovePipxPackages.run(&ctx).unwrap(),
            TaskResult::Ok
        ));
        assert_eq!(executor.calls(), vec!["pipx list --short"]);
    }

    #[test]
    fn remove_skips_without_pipx() {
        let executor = Arc::new(MockExecutor::empty());
        let downloader = Arc::new(MockDownloader::failing());
        let (ctx, _log) = make_mock_context(config_from(manifest()), &executor, &downloader);

        assert!(matches!(
            RemovePipxPackages.run(&ctx).unwrap(),
            TaskResult::Skipped(ref r) if r == "pipx not found"
        ));
    }
}
