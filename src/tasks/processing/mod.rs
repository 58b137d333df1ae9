//! Drives a batch of resources toward their declared state and tallies what
//! happened.

mod apply;

use anyhow::Result;

use super::Context;
use crate::resources::{Resource, ResourceState};

/// How a task finished.
///
/// # Examples
///
/// ```
/// use macsetup_cli::tasks::TaskResult;
///
/// let result = TaskResult::Skipped("pyenv not installed".into());
/// assert!(matches!(result, TaskResult::Skipped(ref why) if why.starts_with("pyenv")));
/// ```
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Work was done, or there was none to do.
    Ok,
    /// The task could not run; the string says why.
    Skipped(String),
    /// Changes were only reported.
    DryRun,
}

/// Per-task tally of resources by outcome.
///
/// ```
/// use macsetup_cli::tasks::TaskStats;
///
/// let stats = TaskStats { changed: 1, already_ok: 4, skipped: 0 };
/// assert_eq!(stats.summary(false), "1 changed, 4 already ok");
/// assert_eq!(stats.summary(true), "1 would change, 4 already ok");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Resources modified (or that would be, in a dry run).
    pub changed: u32,
    /// Resources that needed nothing.
    pub already_ok: u32,
    /// Resources that were left alone.
    pub skipped: u32,
}

impl TaskStats {
    /// All counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// One-line summary; the skipped count only appears when non-zero.
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let changed = if dry_run { "would change" } else { "changed" };
        let mut line = format!(
            "{} {changed}, {} already ok",
            self.changed, self.already_ok
        );
        if self.skipped > 0 {
            line.push_str(&format!(", {} skipped", self.skipped));
        }
        line
    }

    /// Log the summary at info level and turn it into a [`TaskResult`].
    #[must_use]
    pub fn finish(self, ctx: &Context) -> TaskResult {
        ctx.log.info(&self.summary(ctx.dry_run));
        if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        }
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, rhs: Self) {
        self.changed += rhs.changed;
        self.already_ok += rhs.already_ok;
        self.skipped += rhs.skipped;
    }
}

/// Options for the apply loop.
///
/// Setup is fail-fast: any `Invalid` state or failed apply ends the task
/// with an error.
///
/// ```
/// use macsetup_cli::tasks::ProcessOpts;
///
/// assert_eq!(ProcessOpts::apply_all("clone").verb, "clone");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProcessOpts<'a> {
    /// Verb used in log lines ("install", "write", "set").
    pub verb: &'a str,
}

impl<'a> ProcessOpts<'a> {
    /// Bring every `Missing` or `Incorrect` resource into line.
    #[must_use]
    pub const fn apply_all(verb: &'a str) -> Self {
        Self { verb }
    }
}

/// Query each resource and apply the ones that are not yet correct.
///
/// # Errors
///
/// Fails on the first resource whose state cannot be read, whose state is
/// `Invalid`, or whose apply fails.
pub fn process_resources<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    opts: &ProcessOpts,
) -> Result<TaskResult> {
    process_resource_states(
        ctx,
        resources
            .into_iter()
            .map(|r| r.current_state().map(|state| (r, state)))
            .collect::<Result<Vec<_>>>()?,
        opts,
    )
}

/// Like [`process_resources`], for states already fetched in bulk
/// (`brew list`, `pyenv versions`, `pipx list`).
///
/// # Errors
///
/// Fails on the first `Invalid` state or failed apply.
pub fn process_resource_states<R: Resource>(
    ctx: &Context,
    resource_states: impl IntoIterator<Item = (R, ResourceState)>,
    opts: &ProcessOpts,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for (resource, state) in resource_states {
        stats += apply::process_single(ctx, &resource, state, opts)?;
    }
    Ok(stats.finish(ctx))
}

/// Remove each resource that is currently `Correct`; others are untouched.
///
/// # Errors
///
/// Fails only if a state query fails; removal itself is best effort.
pub fn process_resources_remove<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    verb: &str,
) -> Result<TaskResult> {
    let states = resources
        .into_iter()
        .map(|r| r.current_state().map(|state| (r, state)))
        .collect::<Result<Vec<_>>>()?;
    Ok(process_resource_states_remove(ctx, states, verb))
}

/// Removal over pre-fetched states.
#[must_use]
pub fn process_resource_states_remove<R: Resource>(
    ctx: &Context,
    resource_states: impl IntoIterator<Item = (R, ResourceState)>,
    verb: &str,
) -> TaskResult {
    let mut stats = TaskStats::new();
    for (resource, state) in resource_states {
        stats += apply::remove_single(ctx, &resource, &state, verb);
    }
    stats.finish(ctx)
}
