//! Python interpreters managed by pyenv.
use std::collections::HashSet;

use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// A Python version installed with `pyenv install`.
#[derive(Debug)]
pub struct PythonVersionResource<'a> {
    /// Version as pyenv names it (`3.12.4`).
    pub version: String,
    executor: &'a dyn Executor,
}

impl<'a> PythonVersionResource<'a> {
    /// Create a new version resource.
    #[must_use]
    pub const fn new(version: String, executor: &'a dyn Executor) -> Self {
        Self { version, executor }
    }

    /// State against the output of [`get_installed_versions`].
    #[must_use]
    pub fn state_from_installed(&self, installed: &HashSet<String>) -> ResourceState {
        if installed.contains(&self.version) {
            ResourceState::Correct
        } else {
            ResourceState::Missing
        }
    }
}

/// Query the versions pyenv knows about (`pyenv versions --bare`).
///
/// # Errors
///
/// Returns an error if `pyenv` cannot be spawned.
pub fn get_installed_versions(executor: &dyn Executor) -> Result<HashSet<String>> {
    let result = executor.run_unchecked("pyenv", &["versions", "--bare"])?;
    if !result.success {
        return Ok(HashSet::new());
    }
    Ok(result
        .stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

impl Applicable for PythonVersionResource<'_> {
    fn description(&self) -> String {
        format!("Python {}", self.version)
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.executor
            .run("pyenv", &["install", "-s", &self.version])?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        self.executor
            .run("pyenv", &["uninstall", "-f", &self.version])?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for PythonVersionResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        Ok(self.state_from_installed(&get_installed_versions(self.executor)?))
    }
}

/// The pyenv global version.  Left in place on teardown.
#[derive(Debug)]
pub struct PyenvGlobalResource<'a> {
    /// Version to select.
    pub version: String,
    executor: &'a dyn Executor,
}

impl<'a> PyenvGlobalResource<'a> {
    /// Select `version` with `pyenv global`.
    #[must_use]
    pub const fn new(version: String, executor: &'a dyn Executor) -> Self {
        Self { version, executor }
    }
}

impl Applicable for PyenvGlobalResource<'_> {
    fn description(&self) -> String {
        format!("pyenv global {}", self.version)
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.executor.run("pyenv", &["global", &self.version])?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for PyenvGlobalResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        let result = self.executor.run_unchecked("pyenv", &["global"])?;
        if !result.success {
            return Ok(ResourceState::Missing);
        }
        let current: Vec<&str> = result.stdout.split_whitespace().collect();
        if current.first() == Some(&self.version.as_str()) {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: current.join(" "),
            })
        }
    }
}
