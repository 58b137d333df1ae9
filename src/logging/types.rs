//! Task status bookkeeping and the [`Log`] seam used by tasks.

/// One line of the end-of-run summary.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Task name as shown in the stage header.
    pub name: String,
    /// How the task ended.
    pub status: TaskStatus,
    /// Skip reason or error text, if any.
    pub message: Option<String>,
}

/// How a task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Ran to completion.
    Ok,
    /// Nothing declared for it in the manifest.
    NotApplicable,
    /// Ran but chose not to act (tool absent), or never started after an
    /// earlier failure.
    Skipped,
    /// Previewed only.
    DryRun,
    /// Returned an error.
    Failed,
}

impl TaskStatus {
    /// Summary glyph and its ANSI colour.
    #[must_use]
    pub const fn glyph(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "\x1b[32m"),
            Self::NotApplicable => ("·", "\x1b[2m"),
            Self::Skipped => ("○", "\x1b[33m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }
}

/// Logging backend used by tasks and resources.
///
/// Production code passes a [`Logger`](super::Logger); unit tests pass an
/// in-memory recorder.
pub trait Log: Send + Sync {
    /// Section header, one per task.
    fn stage(&self, msg: &str);
    /// Normal progress output.
    fn info(&self, msg: &str);
    /// Detail that only reaches the console with `--verbose`.
    fn debug(&self, msg: &str);
    /// Something the user should look at.
    fn warn(&self, msg: &str);
    /// A failure.
    fn error(&self, msg: &str);
    /// A change that would be made without `--dry-run`.
    fn dry_run(&self, msg: &str);
    /// Record how a task ended.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
