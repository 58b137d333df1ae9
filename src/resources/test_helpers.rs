//! Scripted stand-ins for the executor and downloader.
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::exec::{ExecResult, Executor};
use crate::resources::error::ResourceError;
use crate::resources::helpers::download::Downloader;

/// Lock and clone, treating a poisoned lock as empty.
fn snapshot<T: Clone + Default>(m: &Mutex<T>) -> T {
    m.lock().map(|g| g.clone()).unwrap_or_default()
}

/// Executor that answers from a FIFO script of `(success, stdout)` pairs.
///
/// Once the script runs out every command fails with stdout
/// `"unexpected call"`. Command lines are recorded as `"program arg…"`.
/// [`resolve`](Executor::resolve) finds every program under
/// `/opt/homebrew/bin` after [`with_which(true)`](Self::with_which), and
/// nothing otherwise.
#[derive(Debug, Default)]
pub struct MockExecutor {
    script: Mutex<VecDeque<(bool, String)>>,
    resolvable: bool,
    calls: Mutex<Vec<String>>,
    envs: Mutex<Vec<Vec<(String, String)>>>,
}

impl MockExecutor {
    /// One successful command printing `stdout`.
    #[must_use]
    pub fn ok(stdout: &str) -> Self {
        Self::with_responses(vec![(true, stdout.to_string())])
    }

    /// One failing command.
    #[must_use]
    pub fn fail() -> Self {
        Self::with_responses(vec![(false, String::new())])
    }

    /// No scripted answers.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Answers consumed in order.
    #[must_use]
    pub fn with_responses(responses: Vec<(bool, String)>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    /// Make every program resolvable (or not).
    #[must_use]
    pub const fn with_which(mut self, resolvable: bool) -> Self {
        self.resolvable = resolvable;
        self
    }

    /// How many commands ran.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    /// Every command line, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        snapshot(&self.calls)
    }

    /// Extra environment of each `run_with_env` call.
    #[must_use]
    pub fn envs(&self) -> Vec<Vec<(String, String)>> {
        snapshot(&self.envs)
    }

    fn answer(&self, program: &str, args: &[&str]) -> (bool, String) {
        if let Ok(mut calls) = self.calls.lock() {
            let line: Vec<&str> = std::iter::once(program).chain(args.iter().copied()).collect();
            calls.push(line.join(" "));
        }
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| (false, "unexpected call".to_string()))
    }

    fn checked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        match self.answer(program, args) {
            (true, stdout) => Ok(ExecResult {
                stdout,
                stderr: String::new(),
                success: true,
                code: Some(0),
            }),
            (false, _) => anyhow::bail!("mock command failed: {program}"),
        }
    }
}

impl Executor for MockExecutor {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.checked(program, args)
    }

    fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> anyhow::Result<ExecResult> {
        if let Ok(mut envs) = self.envs.lock() {
            envs.push(
                env.iter()
                    .map(|&(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            );
        }
        self.checked(program, args)
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        let (success, stdout) = self.answer(program, args);
        Ok(ExecResult {
            stdout,
            stderr: String::new(),
            success,
            code: Some(if success { 0 } else { 1 }),
        })
    }

    fn resolve(&self, program: &str) -> Option<PathBuf> {
        self.resolvable
            .then(|| PathBuf::from("/opt/homebrew/bin").join(program))
    }
}

/// Downloader returning one fixed body for any URL, or failing.
#[derive(Debug)]
pub struct MockDownloader {
    body: Option<String>,
    urls: Mutex<Vec<String>>,
}

impl MockDownloader {
    /// Serve `body` for every URL.
    #[must_use]
    pub fn serving(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
            urls: Mutex::default(),
        }
    }

    /// Fail every request.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            body: None,
            urls: Mutex::default(),
        }
    }

    /// URLs requested so far.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        snapshot(&self.urls)
    }
}

impl Downloader for MockDownloader {
    fn fetch(&self, url: &str) -> anyhow::Result<String> {
        if let Ok(mut urls) = self.urls.lock() {
            urls.push(url.to_string());
        }
        self.body.clone().ok_or_else(|| {
            ResourceError::Download {
                url: url.to_string(),
                reason: "mock download failure".to_string(),
            }
            .into()
        })
    }
}
