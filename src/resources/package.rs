//! Homebrew formula resource.
use std::collections::HashSet;

use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// A Homebrew formula that can be checked, installed and uninstalled.
#[derive(Debug)]
pub struct BrewPackageResource<'a> {
    /// Formula name.
    pub name: String,
    executor: &'a dyn Executor,
}

impl<'a> BrewPackageResource<'a> {
    /// Create a new formula resource.
    #[must_use]
    pub const fn new(name: String, executor: &'a dyn Executor) -> Self {
        Self { name, executor }
    }

    /// Determine the resource state from a pre-fetched set of installed formulae.
    ///
    /// This avoids running a per-package query when used with
    /// [`get_installed_formulae`].
    #[must_use]
    pub fn state_from_installed(&self, installed: &HashSet<String>) -> ResourceState {
        if installed.contains(&self.name) {
            ResourceState::Correct
        } else {
            ResourceState::Missing
        }
    }
}

/// Query the full set of installed formula names.
///
/// Runs a single `brew list --formula -1` regardless of how many packages
/// need to be checked.  A failing `brew` yields an empty set so that every
/// package reads as missing.
///
/// # Errors
///
/// Returns an error if `brew` cannot be spawned.
pub fn get_installed_formulae(executor: &dyn Executor) -> Result<HashSet<String>> {
    let result = executor.run_unchecked("brew", &["list", "--formula", "-1"])?;
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

impl Applicable for BrewPackageResource<'_> {
    fn description(&self) -> String {
        format!("{} (brew)", self.name)
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.executor.run("brew", &["install", &self.name])?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        self.executor.run("brew", &["uninstall", &self.name])?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for BrewPackageResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        let result = self
            .executor
            .run_unchecked("brew", &["list", "--formula", &self.name])?;
        if result.success {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::MockExecutor;

    #[test]
    fn description_includes_manager() {
        let executor = MockExecutor::empty();
        let resource = BrewPackageResource::new("git".to_string(), &executor);
        assert_eq!(resource.description(), "git (brew)");
    }

    #[test]
    fn state_from_installed_correct() {
        let executor = MockExecutor::empty();
        let resource = BrewPackageResource::new("pyenv".to_string(), &executor);
        let installed: HashSet<String> = ["pyenv", "zsh"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(
            resource.state_from_installed(&installed),
            ResourceState::Correct
        );
        assert_eq!(executor.call_count(), 0, "bulk check must not run commands");
    }

    #[test]
    fn state_from_installed_missing() {
        let executor = MockExecutor::empty();
        let resource = BrewPackageResource::new("pipx".to_string(), &executor);
        assert_eq!(
            resource.state_from_installed(&HashSet::new()),
            ResourceState::Missing
        );
    }

    #[test]
    fn get_installed_parses_one_name_per_line() {
        let executor = MockExecutor::ok("git\npyenv\n\nzsh\n");
        let installed = get_installed_formulae(&executor).unwrap();
        assert_eq!(installed.len(), 3);
        assert!(installed.contains("pyenv"));
        assert_eq!(executor.calls(), vec!["brew list --formula -1"]);
    }

    #[test]
    fn get_installed_empty_on_failure() {
        let executor = MockExecutor::fail();
        assert!(get_installed_formulae(&executor).unwrap().is_empty());
    }

    #[test]
    fn current_state_follows_brew_list_exit_status() {
        let executor = MockExecutor::with_responses(vec![(true, "git".into()), (false, String::new())]);
        let resource = BrewPackageResource::new("git".to_string(), &executor);
        assert_eq!(resource.current_state().unwrap(), ResourceState::Correct);
        assert_eq!(resource.current_state().unwrap(), ResourceState::Missing);
    }

    #[test]
    fn apply_runs_brew_install() {
        let executor = MockExecutor::ok("");
        let resource = BrewPackageResource::new("tree".to_string(), &executor);
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(executor.calls(), vec!["brew install tree"]);
    }

    #[test]
    fn apply_propagates_failure() {
        let executor = MockExecutor::fail();
        let resource = BrewPackageResource::new("tree".to_string(), &executor);
        assert!(resource.apply().is_err());
    }

    #[test]
    fn remove_runs_brew_uninstall() {
        let executor = MockExecutor::ok("");
        let resource = BrewPackageResource::new("wget".to_string(), &executor);
        assert_eq!(resource.remove().unwrap(), ResourceChange::Applied);
        assert_eq!(executor.calls(), vec!["brew uninstall wget"]);
    }
}
