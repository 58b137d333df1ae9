//! Read-only presence checks run by the `test` command.
use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::resources::{Applicable, Resource, ResourceState};

/// Descriptions of every resource found missing, shared across check tasks.
#[derive(Debug, Default, Clone)]
pub struct MissingList(Arc<Mutex<Vec<String>>>);

impl MissingList {
    /// Record a missing resource.
    pub fn push(&self, item: String) {
        if let Ok(mut guard) = self.0.lock() {
            guard.push(item);
        }
    }

    /// Snapshot of the recorded items, in check order.
    #[must_use]
    pub fn items(&self) -> Vec<String> {
        self.0.lock().map_or_else(|_| Vec::new(), |g| g.clone())
    }
}

/// Query each resource's state individually.
fn with_states<R: Resource>(
    resources: impl IntoIterator<Item = R>,
) -> Result<Vec<(R, ResourceState)>> {
    resources
        .into_iter()
        .map(|r| {
            let state = r.current_state()?;
            Ok((r, state))
        })
        .collect()
}

/// Log pass/fail per resource and fail the task if anything is missing.
///
/// Anything other than [`ResourceState::Correct`] counts as missing.
fn report<R: Applicable>(
    ctx: &Context,
    missing: &MissingList,
    states: impl IntoIterator<Item = (R, ResourceState)>,
) -> Result<TaskResult> {
    let mut count = 0usize;
    for (resource, state) in states {
        let desc = resource.description();
        match state {
            ResourceState::Correct => ctx.log.info(&format!("present: {desc}")),
            ResourceState::Missing => {
                ctx.log.warn(&format!("missing: {desc}"));
                missing.push(desc);
                count += 1;
            }
            ResourceState::Incorrect { current } => {
                ctx.log.warn(&format!("missing: {desc} (currently {current})"));
                missing.push(desc);
                count += 1;
            }
            ResourceState::Invalid { reason } => {
                ctx.log.warn(&format!("missing: {desc} ({reason})"));
                missing.push(desc);
                count += 1;
            }
        }
    }
    if count > 0 {
        anyhow::bail!("{count} missing");
    }
    Ok(TaskResult::Ok)
}

macro_rules! check_task {
    ($(#[$doc:meta])* $ty:ident, $name:literal, |$ctx:ident| $applies:expr, |$c:ident, $m:ident| $body:expr) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $ty {
            missing: MissingList,
        }

        impl $ty {
            /// Create the check, recording into `missing`.
            #[must_use]
            pub const fn new(missing: MissingList) -> Self {
                Self { missing }
            }
        }

        impl Task for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn should_run(&self, $ctx: &Context) -> bool {
                $applies
            }

            fn run(&self, $c: &Context) -> Result<TaskResult> {
                let $m = &self.missing;
                $body
            }
        }
    };
}

check_task!(
    /// Check that `brew` resolves.
    CheckHomebrew,
    "Check Homebrew",
    |_ctx| true,
    |ctx, missing| report(ctx, missing, with_states([super::homebrew::resource(ctx)])?)
);

check_task!(
    /// Check that every formula is installed.
    CheckPackages,
    "Check packages",
    |ctx| !ctx.manifest().homebrew.packages.is_empty(),
    |ctx, missing| report(ctx, missing, super::packages::package_states(ctx)?)
);

check_task!(
    /// Check that Oh My Zsh is installed.
    CheckOhMyZsh,
    "Check Oh My Zsh",
    |_ctx| true,
    |ctx, missing| report(ctx, missing, with_states([super::oh_my_zsh::framework(ctx)])?)
);

check_task!(
    /// Check that every plugin is cloned.
    CheckZshPlugins,
    "Check Zsh plugins",
    |ctx| !ctx.manifest().oh_my_zsh.plugins.is_empty(),
    |ctx, missing| report(ctx, missing, with_states(super::oh_my_zsh::plugins(ctx))?)
);

check_task!(
    /// Check that every Python version is installed.
    CheckPythonVersions,
    "Check Python versions",
    |ctx| !ctx.manifest().python.versions.is_empty(),
    |ctx, missing| report(ctx, missing, super::python::version_states(ctx)?)
);

check_task!(
    /// Check the pyenv global version.
    CheckPythonGlobal,
    "Check pyenv global",
    |ctx| ctx.manifest().python.global.is_some(),
    |ctx, missing| {
        let Some(resource) = super::python::global(ctx) else {
            return Ok(TaskResult::Skipped("no global version configured".to_string()));
        };
        let state = super::python::global_state(ctx, &resource)?;
        report(ctx, missing, [(resource, state)])
    }
);

check_task!(
    /// Check that every pipx package is installed.
    CheckPipxPackages,
    "Check pipx packages",
    |ctx| !ctx.manifest().pipx.packages.is_empty(),
    |ctx, missing| report(ctx, missing, super::pipx::pipx_states(ctx)?)
);

check_task!(
    /// Check the login shell.
    CheckDefaultShell,
    "Check default shell",
    |ctx| ctx.manifest().shell.default.is_some(),
    |ctx, missing| report(ctx, missing, with_states(super::shell::default_shell(ctx))?)
);

check_task!(
    /// Check that every managed file has its declared content.
    CheckConfigFiles,
    "Check config files",
    |ctx| !ctx.manifest().files.is_empty(),
    |ctx, missing| {
        let store = ctx.backup_store();
        report(ctx, missing, with_states(super::files::managed_files(ctx, &store))?)
    }
);
