//! The production [`Log`]: emits tracing events and keeps the task summary.
use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{Log, TaskEntry, TaskStatus};
use super::utils::log_file_path;

/// Logger for one command run.
///
/// Messages become `tracing` events, so the subscriber decides what reaches
/// the console and the log file (`~/.cache/macsetup/<command>.log` unless
/// `XDG_CACHE_HOME` says otherwise). Task outcomes are kept for
/// [`print_summary`](Self::print_summary).
#[derive(Debug)]
pub struct Logger {
    entries: Mutex<Vec<TaskEntry>>,
    file: Option<PathBuf>,
}

impl Logger {
    /// Logger for `command`; the file itself is opened by
    /// [`init_subscriber`](super::init_subscriber).
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            entries: Mutex::default(),
            file: log_file_path(command),
        }
    }

    /// Where the log file is written, if `HOME` is known.
    #[must_use]
    pub const fn file(&self) -> Option<&PathBuf> {
        self.file.as_ref()
    }

    /// Outcomes recorded so far, in order.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// How many tasks ended in [`TaskStatus::Failed`].
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.task_entries()
            .into_iter()
            .filter(|entry| entry.status == TaskStatus::Failed)
            .count()
    }

    /// Print one line per task, then the totals and the log file path.
    pub fn print_summary(&self) {
        let entries = self.task_entries();
        if entries.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");
        let mut tally = Tally::default();
        for entry in &entries {
            tally.add(entry.status);
            let (glyph, colour) = entry.status.glyph();
            let line = match &entry.message {
                Some(why) => format!("{colour}{glyph} {} ({why})\x1b[0m", entry.name),
                None => format!("{colour}{glyph} {}\x1b[0m", entry.name),
            };
            self.info(&line);
        }

        println!();
        self.info(&tally.to_string());
        if let Some(path) = &self.file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(str::to_string),
            });
        }
    }
}

/// Task counts per status.
#[derive(Debug, Default)]
struct Tally {
    ok: usize,
    not_applicable: usize,
    skipped: usize,
    dry_run: usize,
    failed: usize,
}

impl Tally {
    const fn add(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::Ok => self.ok += 1,
            TaskStatus::NotApplicable => self.not_applicable += 1,
            TaskStatus::Skipped => self.skipped += 1,
            TaskStatus::DryRun => self.dry_run += 1,
            TaskStatus::Failed => self.failed += 1,
        }
    }

    const fn total(&self) -> usize {
        self.ok + self.not_applicable + self.skipped + self.dry_run + self.failed
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tasks: \x1b[32m{} ok\x1b[0m, \x1b[2m{} n/a\x1b[0m, \x1b[33m{} skipped\x1b[0m, \x1b[37m{} dry-run\x1b[0m, \x1b[31m{} failed\x1b[0m",
            self.total(),
            self.ok,
            self.not_applicable,
            self.skipped,
            self.dry_run,
            self.failed
        )
    }
}
