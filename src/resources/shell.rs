//! Default login shell.
use anyhow::Result;

use super::error::ResourceError;
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// The user's login shell, changed with `chsh -s`.
///
/// State is judged from the login shell seen at startup, so a change made
/// by this run only shows up in the next one.
#[derive(Debug)]
pub struct DefaultShellResource<'a> {
    /// Shell name from the manifest, e.g. `zsh`.
    wanted: String,
    /// `$SHELL` when the process started; empty if unset.
    login: String,
    executor: &'a dyn Executor,
}

impl<'a> DefaultShellResource<'a> {
    /// Compare `wanted` against an explicit `login` shell path.
    #[must_use]
    pub const fn new(wanted: String, login: String, executor: &'a dyn Executor) -> Self {
        Self {
            wanted,
            login,
            executor,
        }
    }

    /// Compare `wanted` against `$SHELL`.
    #[must_use]
    pub fn from_env(wanted: String, executor: &'a dyn Executor) -> Self {
        let login = std::env::var("SHELL").unwrap_or_default();
        Self::new(wanted, login, executor)
    }
}

impl Applicable for DefaultShellResource<'_> {
    fn description(&self) -> String {
        format!("default shell → {}", self.wanted)
    }

    fn apply(&self) -> Result<ResourceChange> {
        let Some(path) = self.executor.resolve(&self.wanted) else {
            return Err(ResourceError::NotFound {
                resource: self.wanted.clone(),
            }
            .into());
        };
        self.executor.run("chsh", &["-s", &path.to_string_lossy()])?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for DefaultShellResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        let matches = self
            .login
            .rsplit_once('/')
            .is_some_and(|(_, name)| name == self.wanted);
        Ok(match self.login.as_str() {
            _ if matches => ResourceState::Correct,
            "" => ResourceState::Missing,
            other => ResourceState::Incorrect {
                current: other.to_string(),
            },
        })
    }
}
