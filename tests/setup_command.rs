#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `setup` command.
//!
//! These tests exercise the full task list produced by [`all_setup_tasks`],
//! the `--only`/`--skip` filters, dependency ordering, and an end-to-end
//! run of the config file task against a temporary home directory.

mod common;

use std::any::TypeId;
use std::collections::HashSet;

use macsetup_cli::cli::SetupOpts;
use macsetup_cli::commands::setup::select;
use macsetup_cli::logging::TaskStatus;
use macsetup_cli::tasks::{self, Task, files, graph};

use common::{FILES_MANIFEST, TestHome};

// ---------------------------------------------------------------------------
// Snapshot: full setup task list
// ---------------------------------------------------------------------------

/// Snapshot of all setup task names in their declared order.
#[test]
fn setup_task_names() {
    let all_tasks = tasks::all_setup_tasks();
    let task_names: Vec<&str> = all_tasks.iter().map(|t| t.name()).collect();
    insta::assert_snapshot!("setup_task_names", task_names.join("\n"));
}

/// Snapshot of the order the runner executes setup tasks in.
#[test]
fn setup_execution_order() {
    let all_tasks = tasks::all_setup_tasks();
    let refs: Vec<&dyn Task> = all_tasks.iter().map(AsRef::as_ref).collect();
    let order = graph::execution_order(&refs).unwrap();
    let names: Vec<&str> = order.iter().map(|t| t.name()).collect();
    insta::assert_snapshot!("setup_execution_order", names.join("\n"));
}

// ---------------------------------------------------------------------------
// Structural invariants
// ---------------------------------------------------------------------------

#[test]
fn setup_task_names_are_unique() {
    let tasks = tasks::all_setup_tasks();
    let mut seen: HashSet<&str> = HashSet::new();
    for task in &tasks {
        assert!(
            seen.insert(task.name()),
            "duplicate setup task name: '{}'",
            task.name()
        );
    }
}

#[test]
fn setup_task_type_ids_are_unique() {
    let tasks = tasks::all_setup_tasks();
    let ids: HashSet<TypeId> = tasks.iter().map(|t| t.task_id()).collect();
    assert_eq!(ids.len(), tasks.len());
}

#[test]
fn setup_task_dependencies_are_resolvable() {
    let tasks = tasks::all_setup_tasks();
    let present: HashSet<TypeId> = tasks.iter().map(|t| t.task_id()).collect();
    for task in &tasks {
        for dep in task.dependencies() {
            assert!(
                present.contains(dep),
                "task '{}' declares a dependency that is not in the setup task list",
                task.name()
            );
        }
    }
}

// ---------------------------------------------------------------------------
// --skip / --only filters
// ---------------------------------------------------------------------------

#[test]
fn only_filter_selects_matching_tasks() {
    let all_tasks = tasks::all_setup_tasks();
    let opts = SetupOpts {
        only: vec!["Pipx".to_string()],
        ..SetupOpts::default()
    };
    let names: Vec<&str> = select(&all_tasks, &opts).iter().map(|t| t.name()).collect();
    assert_eq!(names, ["Install pipx packages"]);
}

#[test]
fn skip_filter_with_no_match_returns_all_tasks() {
    let all_tasks = tasks::all_setup_tasks();
    let opts = SetupOpts {
        skip: vec!["zzznomatch".to_string()],
        ..SetupOpts::default()
    };
    assert_eq!(select(&all_tasks, &opts).len(), all_tasks.len());
}

/// Filtering out a dependency must not make ordering fail.
#[test]
fn filtered_list_still_orders() {
    let all_tasks = tasks::all_setup_tasks();
    let opts = SetupOpts {
        skip: vec!["homebrew".to_string(), "packages".to_string()],
        ..SetupOpts::default()
    };
    let selected = select(&all_tasks, &opts);
    let order = graph::execution_order(&selected).unwrap();
    assert_eq!(order.len(), selected.len());
}

// ---------------------------------------------------------------------------
// Config files end to end
// ---------------------------------------------------------------------------

#[test]
fn write_config_files_is_idempotent() {
    let home = TestHome::new();
    home.write(".zshrc", "# original\n");
    let (ctx, log) = home.context(FILES_MANIFEST, false);

    let first = tasks::execute(&files::WriteConfigFiles, &ctx);
    let second = tasks::execute(&files::WriteConfigFiles, &ctx);

    assert_eq!(first, TaskStatus::Ok);
    assert_eq!(second, TaskStatus::Ok);
    assert!(log.contains("2 changed, 0 already ok"));
    assert!(log.contains("0 changed, 2 already ok"));
    assert_eq!(
        home.read(".zshrc").as_deref(),
        Some("export ZSH=\"$HOME/.oh-my-zsh\"\n")
    );
    assert_eq!(
        home.read(".config/macsetup-test/env").as_deref(),
        Some("PYENV_ROOT=$HOME/.pyenv\n")
    );
    assert_eq!(home.read(".backup/.zshrc").as_deref(), Some("# original\n"));
}

#[test]
fn dry_run_writes_nothing() {
    let home = TestHome::new();
    let (ctx, log) = home.context(FILES_MANIFEST, true);

    let status = tasks::execute(&files::WriteConfigFiles, &ctx);

    assert_eq!(status, TaskStatus::DryRun);
    assert!(log.contains("[DRY RUN] would write:"));
    assert_eq!(home.read(".zshrc"), None);
    assert!(!home.path().join(".backup").exists());
}
