//! Machine state as checkable, reversible resources.
//!
//! Each resource can report its [`ResourceState`], move toward the declared
//! state with `apply`, and undo that with `remove`.
pub mod backup;
pub mod error;
pub mod file;
pub mod helpers;
pub mod homebrew;
pub mod oh_my_zsh;
pub mod package;
pub mod pipx;
pub mod plugin;
pub mod python;
pub mod shell;
#[cfg(test)]
pub mod test_helpers;

use anyhow::Result;

/// Something setup can install and teardown can take away.
///
/// Split from [`Resource`] so a task can list state in one bulk query and
/// still hand each item to the same apply path.
pub trait Applicable {
    /// Short label for log lines, e.g. `"jq (brew)"`.
    fn description(&self) -> String;

    /// Install or update.
    ///
    /// # Errors
    ///
    /// Fails when the underlying tool or filesystem operation fails.
    fn apply(&self) -> Result<ResourceChange>;

    /// Undo [`apply`](Self::apply).
    ///
    /// # Errors
    ///
    /// The default fails: the resource has no removal step.
    fn remove(&self) -> Result<ResourceChange> {
        anyhow::bail!("{} cannot be removed", self.description())
    }
}

/// Where a resource stands relative to the manifest.
///
/// ```
/// use macsetup_cli::resources::ResourceState;
///
/// let shell = ResourceState::Incorrect { current: "/bin/bash".into() };
/// assert_ne!(shell, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Absent.
    Missing,
    /// Present and as declared.
    Correct,
    /// Present, but different.
    Incorrect {
        /// What is there instead.
        current: String,
    },
    /// Cannot be managed, e.g. a directory sits where a file belongs.
    Invalid {
        /// Explanation shown to the user.
        reason: String,
    },
}

/// What an `apply` or `remove` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// The machine was modified.
    Applied,
    /// Nothing needed doing.
    AlreadyCorrect,
    /// Not done; `reason` says why.
    Skipped {
        /// Explanation shown to the user.
        reason: String,
    },
}

/// An [`Applicable`] that can read its own state.
pub trait Resource: Applicable {
    /// Inspect the machine.
    ///
    /// # Errors
    ///
    /// Fails when the state cannot be read at all (I/O error, tool crash).
    fn current_state(&self) -> Result<ResourceState>;
}
