//! Dependency ordering for task lists.

use std::any::TypeId;
use std::collections::{BTreeSet, HashMap};

use super::Task;
use crate::error::TaskError;

/// Order tasks so every task comes after the tasks it depends on.
///
/// Ties go to the task listed first, so a list that is already valid comes
/// back unchanged. Dependencies outside `tasks` (dropped by `--only` or
/// `--skip`) do not constrain anything.
///
/// # Errors
///
/// Returns [`TaskError::DependencyCycle`] listing the tasks that could not
/// be placed.
pub fn execution_order<'a>(tasks: &[&'a dyn Task]) -> Result<Vec<&'a dyn Task>, TaskError> {
    let index: HashMap<TypeId, usize> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| (task.task_id(), i))
        .collect();

    // waiting[i]: unplaced dependencies of task i.
    // unblocks[i]: tasks that depend on task i.
    let mut waiting = vec![0usize; tasks.len()];
    let mut unblocks: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
    for (i, task) in tasks.iter().enumerate() {
        for dep in task.dependencies().iter().filter_map(|d| index.get(d)) {
            if let (Some(n), Some(list)) = (waiting.get_mut(i), unblocks.get_mut(*dep)) {
                *n += 1;
                list.push(i);
            }
        }
    }

    let mut ready: BTreeSet<usize> = (0..tasks.len())
        .filter(|&i| waiting.get(i) == Some(&0))
        .collect();
    let mut order = Vec::with_capacity(tasks.len());
    while let Some(i) = ready.pop_first() {
        order.extend(tasks.get(i).copied());
        for &next in unblocks.get(i).into_iter().flatten() {
            if let Some(n) = waiting.get_mut(next) {
                *n -= 1;
                if *n == 0 {
                    ready.insert(next);
                }
            }
        }
    }

    if order.len() == tasks.len() {
        return Ok(order);
    }
    let stuck: Vec<&str> = tasks
        .iter()
        .zip(&waiting)
        .filter(|&(_, &n)| n > 0)
        .map(|(task, _)| task.name())
        .collect();
    Err(TaskError::DependencyCycle(stuck.join(", ")))
}
