//! Command-line tools installed with pipx.
use std::collections::HashSet;

use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// A pipx-managed package such as Poetry.
#[derive(Debug)]
pub struct PipxPackageResource<'a> {
    /// Package name.
    pub name: String,
    executor: &'a dyn Executor,
}

impl<'a> PipxPackageResource<'a> {
    /// Create a new pipx package resource.
    #[must_use]
    pub const fn new(name: String, executor: &'a dyn Executor) -> Self {
        Self { name, executor }
    }

    /// State against the set from [`get_installed_pipx`].
    #[must_use]
    pub fn state_from_installed(&self, installed: &HashSet<String>) -> ResourceState {
        if installed.contains(&self.name) {
            ResourceState::Correct
        } else {
            ResourceState::Missing
        }
    }
}

/// Query installed pipx packages.
///
/// `pipx list --short` prints one `name version` pair per line.
///
/// # Errors
///
/// Returns an error if `pipx` cannot be spawned.
pub fn get_installed_pipx(executor: &dyn Executor) -> Result<HashSet<String>> {
    let result = executor.run_unchecked("pipx", &["list", "--short"])?;
    if !result.success {
        return Ok(HashSet::new());
    }
    Ok(result
        .stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(String::from)
        .collect())
}

impl Applicable for PipxPackageResource<'_> {
    fn description(&self) -> String {
        format!("{} (pipx)", self.name)
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.executor.run("pipx", &["install", &self.name])?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        self.executor.run("pipx", &["uninstall", &self.name])?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for PipxPackageResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        Ok(self.state_from_installed(&get_installed_pipx(self.executor)?))
    }
}
