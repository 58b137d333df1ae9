//! Per-resource steps of the processing loop.

use anyhow::Result;

use super::{Context, ProcessOpts, TaskStats};
use crate::resources::{Resource, ResourceChange, ResourceState};

const CHANGED: TaskStats = TaskStats {
    changed: 1,
    already_ok: 0,
    skipped: 0,
};
const ALREADY_OK: TaskStats = TaskStats {
    changed: 0,
    already_ok: 1,
    skipped: 0,
};
const SKIPPED: TaskStats = TaskStats {
    changed: 0,
    already_ok: 0,
    skipped: 1,
};

/// Decide what to do with one resource in `state` and do it.
pub(super) fn process_single<R: Resource>(
    ctx: &Context,
    resource: &R,
    state: ResourceState,
    opts: &ProcessOpts,
) -> Result<TaskStats> {
    let desc = resource.description();
    let verb = opts.verb;

    let current = match state {
        ResourceState::Correct => {
            ctx.log.debug(&format!("ok: {desc}"));
            return Ok(ALREADY_OK);
        }
        ResourceState::Invalid { reason } => anyhow::bail!("cannot {verb} {desc}: {reason}"),
        ResourceState::Missing => None,
        ResourceState::Incorrect { current } => Some(current),
    };

    if ctx.dry_run {
        ctx.log.dry_run(&current.map_or_else(
            || format!("would {verb}: {desc}"),
            |current| format!("would {verb} {desc} (currently {current})"),
        ));
        return Ok(CHANGED);
    }
    apply_resource(ctx, resource, opts)
}

/// Call [`Applicable::apply`](crate::resources::Applicable::apply) and count
/// the outcome.
pub(super) fn apply_resource<R: Resource>(
    ctx: &Context,
    resource: &R,
    opts: &ProcessOpts,
) -> Result<TaskStats> {
    let desc = resource.description();
    let verb = opts.verb;
    match resource.apply() {
        Ok(ResourceChange::Applied) => {
            ctx.log.info(&format!("{verb}: {desc}"));
            Ok(CHANGED)
        }
        Ok(ResourceChange::AlreadyCorrect) => Ok(ALREADY_OK),
        Ok(ResourceChange::Skipped { reason }) => {
            anyhow::bail!("failed to {verb} {desc}: {reason}")
        }
        Err(e) => Err(e.context(format!("failed to {verb} {desc}"))),
    }
}

/// Remove one resource if it is in its installed state.
///
/// Anything else is left alone. Failures are warnings, never errors.
pub(super) fn remove_single<R: Resource>(
    ctx: &Context,
    resource: &R,
    current: &ResourceState,
    verb: &str,
) -> TaskStats {
    let desc = resource.description();
    if *current != ResourceState::Correct {
        ctx.log.debug(&format!("nothing to {verb}: {desc}"));
        return ALREADY_OK;
    }
    if ctx.dry_run {
        ctx.log.dry_run(&format!("would {verb}: {desc}"));
        return CHANGED;
    }
    let failure = match resource.remove() {
        Ok(ResourceChange::Applied) => {
            ctx.log.info(&format!("{verb}: {desc}"));
            return CHANGED;
        }
        Ok(ResourceChange::AlreadyCorrect) => return ALREADY_OK,
        Ok(ResourceChange::Skipped { reason }) => reason,
        Err(e) => format!("{e:#}"),
    };
    ctx.log
        .warn(&format!("failed to {verb} {desc} (best effort): {failure}"));
    SKIPPED
}
