// Shared helpers for integration tests.
//
// Provides a temporary home directory with a manifest and a context builder
// so each integration test can run tasks in isolation without touching the
// real home directory.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use macsetup_cli::config::Config;
use macsetup_cli::exec::SystemExecutor;
use macsetup_cli::logging::{Log, TaskStatus};
use macsetup_cli::platform::Platform;
use macsetup_cli::resources::helpers::download::HttpDownloader;
use macsetup_cli::tasks::Context;

/// Manifest declaring two managed files and nothing else.
pub const FILES_MANIFEST: &str = r#"
[backup]
dir = ".backup"

[[files]]
path = ".zshrc"
content = "export ZSH=\"$HOME/.oh-my-zsh\"\n"

[[files]]
path = ".config/macsetup-test/env"
content = "PYENV_ROOT=$HOME/.pyenv\n"
"#;

/// Logger that keeps messages and task results in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<String>>,
    tasks: Mutex<Vec<(String, TaskStatus)>>,
}

impl MemoryLog {
    fn push(&self, line: String) {
        self.lines.lock().expect("log lines").push(line);
    }

    /// Whether any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .lock()
            .expect("log lines")
            .iter()
            .any(|l| l.contains(needle))
    }

    /// Recorded `(task name, status)` pairs.
    pub fn tasks(&self) -> Vec<(String, TaskStatus)> {
        self.tasks.lock().expect("log tasks").clone()
    }
}

impl Log for MemoryLog {
    fn stage(&self, msg: &str) {
        self.push(format!("==> {msg}"));
    }
    fn info(&self, msg: &str) {
        self.push(msg.to_string());
    }
    fn debug(&self, msg: &str) {
        self.push(msg.to_string());
    }
    fn warn(&self, msg: &str) {
        self.push(format!("WARN {msg}"));
    }
    fn error(&self, msg: &str) {
        self.push(format!("ERROR {msg}"));
    }
    fn dry_run(&self, msg: &str) {
        self.push(format!("[DRY RUN] {msg}"));
    }
    fn record_task(&self, name: &str, status: TaskStatus, _message: Option<&str>) {
        self.tasks
            .lock()
            .expect("log tasks")
            .push((name.to_string(), status));
    }
}

/// An isolated home directory backed by a [`tempfile::TempDir`].
pub struct TestHome {
    /// Temporary home directory.
    pub dir: tempfile::TempDir,
}

impl TestHome {
    /// Create an empty home directory.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp home"),
        }
    }

    /// Path to the home directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `rel` under the home directory.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write file");
        path
    }

    /// Read `rel` under the home directory, if it exists.
    pub fn read(&self, rel: &str) -> Option<String> {
        std::fs::read_to_string(self.dir.path().join(rel)).ok()
    }

    /// Write `manifest` into the home directory and load it.
    pub fn load(&self, manifest: &str) -> Config {
        let path = self.write("manifest.toml", manifest);
        Config::load(Some(path.as_path()), self.path()).expect("load manifest")
    }

    /// Build a context rooted at this home directory.
    pub fn context(&self, manifest: &str, dry_run: bool) -> (Context, Arc<MemoryLog>) {
        let log = Arc::new(MemoryLog::default());
        let platform = Platform::detect();
        let executor = SystemExecutor::with_search_paths(platform.tool_search_paths());
        let ctx = Context::new(
            Arc::new(self.load(manifest)),
            Arc::new(platform),
            Arc::clone(&log) as Arc<dyn Log>,
            dry_run,
            self.path().to_path_buf(),
            Arc::new(executor),
            Arc::new(HttpDownloader::new()),
        );
        (ctx, log)
    }
}
