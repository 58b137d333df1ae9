//! Process execution behind an injectable [`Executor`] trait.
use anyhow::{Context as _, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::resources::error::ResourceError;

/// Result of a command execution.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited with status 0.
    pub success: bool,
    /// Exit code; `None` when killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Abstraction over external process execution.
///
/// Resources hold a `&dyn Executor` so that unit tests can substitute a
/// scripted implementation and never spawn real package managers.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run a command and return its output. Fails if the command exits non-zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned or exits non-zero.
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run a command with extra environment variables. Fails on non-zero exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned or exits non-zero.
    fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<ExecResult>;

    /// Run a command, allowing failure (returns result without bailing).
    ///
    /// # Errors
    ///
    /// Returns an error only if the program cannot be spawned.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Check if a program is resolvable.
    fn which(&self, program: &str) -> bool {
        self.resolve(program).is_some()
    }

    /// Resolve a program name to an absolute path.
    fn resolve(&self, program: &str) -> Option<PathBuf>;
}

/// [`Executor`] that spawns real processes.
///
/// Programs are looked up in `search_paths` first and then in `PATH`, and
/// children inherit the same augmented `PATH`.  This lets tools installed
/// earlier in the same run (e.g. into the Homebrew prefix) be found without
/// re-sourcing a shell profile.
#[derive(Debug, Default, Clone)]
pub struct SystemExecutor {
    search_paths: Vec<PathBuf>,
}

impl SystemExecutor {
    /// Create an executor that only consults `PATH`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            search_paths: Vec::new(),
        }
    }

    /// Create an executor that consults `paths` before `PATH`.
    #[must_use]
    pub const fn with_search_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths: paths,
        }
    }

    /// The effective `PATH` value: search paths followed by the inherited `PATH`.
    fn path_var(&self) -> OsString {
        let inherited = std::env::var_os("PATH").unwrap_or_default();
        if self.search_paths.is_empty() {
            return inherited;
        }
        let combined = self
            .search_paths
            .iter()
            .cloned()
            .chain(std::env::split_paths(&inherited));
        std::env::join_paths(combined).unwrap_or(inherited)
    }

    fn command(&self, program: &str) -> Command {
        let resolved = self
            .resolve(program)
            .unwrap_or_else(|| PathBuf::from(program));
        let mut cmd = Command::new(resolved);
        if !self.search_paths.is_empty() {
            cmd.env("PATH", self.path_var());
        }
        cmd
    }
}

/// Execute a command and return the result, failing on non-zero exit.
fn execute_checked(mut cmd: Command, label: &str) -> Result<ExecResult> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to execute: {label}"))?;
    let result = ExecResult::from(output);
    if !result.success {
        return Err(ResourceError::ExecutionFailed {
            program: label.to_string(),
            exit_code: result.code.unwrap_or(-1),
            stderr: result.stderr.trim().to_string(),
        }
        .into());
    }
    Ok(result)
}

impl Executor for SystemExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let mut cmd = self.command(program);
        cmd.args(args);
        execute_checked(cmd, program)
    }

    fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<ExecResult> {
        let mut cmd = self.command(program);
        cmd.args(args);
        for (k, v) in env {
            cmd.env(k, v);
        }
        execute_checked(cmd, program)
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let output = self
            .command(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute: {program}"))?;
        Ok(ExecResult::from(output))
    }

    fn resolve(&self, program: &str) -> Option<PathBuf> {
        if program.contains(std::path::MAIN_SEPARATOR) {
            let path = Path::new(program);
            return path.is_file().then(|| path.to_path_buf());
        }
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        which::which_in(program, Some(self.path_var()), cwd).ok()
    }
}
