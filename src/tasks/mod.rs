//! Named, dependency-ordered tasks that orchestrate resource changes.
mod context;
pub mod files;
pub mod graph;
pub mod homebrew;
pub mod oh_my_zsh;
pub mod packages;
pub mod pipx;
mod processing;
pub mod python;
pub mod shell;
pub mod verify;

/// Declare a task's dependencies by type.
///
/// ```ignore
/// impl Task for InstallZshPlugins {
///     task_deps![super::oh_my_zsh::InstallOhMyZsh];
///     // ...
/// }
/// ```
///
/// `TypeId::of` is const, so the ids live in a `'static` slice.
macro_rules! task_deps {
    [$($dep:ty),+ $(,)?] => {
        fn dependencies(&self) -> &[std::any::TypeId] {
            const DEPS: &[std::any::TypeId] = &[$(std::any::TypeId::of::<$dep>()),+];
            DEPS
        }
    };
}

pub(crate) use task_deps;

pub use context::Context;
pub use processing::{
    ProcessOpts, TaskResult, TaskStats, process_resource_states, process_resource_states_remove,
    process_resources, process_resources_remove,
};

use std::any::TypeId;

use anyhow::Result;

use crate::logging::TaskStatus;
use verify::MissingList;

/// One step of a command, shown as a stage and a summary line.
///
/// Tasks are unit structs; their [`TypeId`] is what other tasks name in
/// [`dependencies`](Task::dependencies).
pub trait Task: Send + Sync + 'static {
    /// Stage header and summary label.
    fn name(&self) -> &str;

    /// Identity used for dependency matching.
    fn task_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Tasks that must run first when they are part of the same run.
    fn dependencies(&self) -> &[TypeId] {
        &[]
    }

    /// `false` when the manifest declares nothing for this task.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Do the work.
    ///
    /// # Errors
    ///
    /// Any error marks the task failed.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// Tasks of `macsetup setup`, in tie-break order.
#[must_use]
pub fn all_setup_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(homebrew::InstallHomebrew),
        Box::new(packages::InstallPackages),
        Box::new(oh_my_zsh::InstallOhMyZsh),
        Box::new(oh_my_zsh::InstallZshPlugins),
        Box::new(python::InstallPythonVersions),
        Box::new(python::SetPythonGlobal),
        Box::new(pipx::InstallPipxPackages),
        Box::new(files::WriteConfigFiles),
        Box::new(shell::SetDefaultShell),
    ]
}

/// Tasks of `macsetup teardown`: setup undone, newest layer first.
#[must_use]
pub fn all_teardown_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(files::RestoreBackups),
        Box::new(files::RemoveConfigFiles),
        Box::new(pipx::RemovePipxPackages),
        Box::new(python::RemovePythonVersions),
        Box::new(oh_my_zsh::RemoveZshPlugins),
        Box::new(oh_my_zsh::RemoveOhMyZsh),
        Box::new(packages::RemovePackages),
        Box::new(homebrew::UninstallHomebrew),
    ]
}

/// Read-only checks of `macsetup test`, all reporting into `missing`.
#[must_use]
pub fn all_test_tasks(missing: &MissingList) -> Vec<Box<dyn Task>> {
    vec![
        Box::new(verify::CheckHomebrew::new(missing.clone())),
        Box::new(verify::CheckPackages::new(missing.clone())),
        Box::new(verify::CheckOhMyZsh::new(missing.clone())),
        Box::new(verify::CheckZshPlugins::new(missing.clone())),
        Box::new(verify::CheckPythonVersions::new(missing.clone())),
        Box::new(verify::CheckPythonGlobal::new(missing.clone())),
        Box::new(verify::CheckPipxPackages::new(missing.clone())),
        Box::new(verify::CheckConfigFiles::new(missing.clone())),
        Box::new(verify::CheckDefaultShell::new(missing.clone())),
    ]
}

/// Run one task and record how it ended.
pub fn execute(task: &dyn Task, ctx: &Context) -> TaskStatus {
    let name = task.name();
    if !task.should_run(ctx) {
        ctx.log.debug(&format!("{name}: nothing declared"));
        ctx.log.record_task(name, TaskStatus::NotApplicable, None);
        return TaskStatus::NotApplicable;
    }

    ctx.log.stage(name);
    let (status, message) = match task.run(ctx) {
        Ok(TaskResult::Ok) => (TaskStatus::Ok, None),
        Ok(TaskResult::DryRun) => (TaskStatus::DryRun, None),
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            (TaskStatus::Skipped, Some(reason))
        }
        Err(e) => {
            let reason = format!("{e:#}");
            ctx.log.error(&format!("{name}: {reason}"));
            (TaskStatus::Failed, Some(reason))
        }
    };
    ctx.log.record_task(name, status, message.as_deref());
    status
}
