//! Idempotent macOS developer environment bootstrap.
//!
//! Installs and removes developer tooling (Homebrew and formulae, Oh My Zsh
//! and plugins, pyenv Python versions, pipx tools, the default shell) and a
//! handful of static configuration files, driven by a single TOML manifest.
//! Every resource is checked before it is touched, so `setup` can be re-run
//! safely and `teardown` tolerates resources that were never installed.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: load and validate the resource manifest
//! - **[`resources`]**: idempotent `check + apply + remove` primitives
//! - **[`tasks`]**: named, dependency-ordered groups of resources
//! - **[`commands`]**: top-level subcommand orchestration (`setup`, `teardown`, `test`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod resources;
pub mod tasks;
