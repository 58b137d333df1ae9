//! Typed errors for manifest loading, task ordering and platform checks.
//!
//! Commands turn these into [`anyhow::Error`] with `?`; resource failures
//! live in [`ResourceError`].

use thiserror::Error;

pub use crate::resources::error::ResourceError;

/// The manifest could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the file failed.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that was read.
        path: String,
        /// I/O error.
        source: std::io::Error,
    },

    /// The text is not a valid manifest.
    #[error("{path} is not a valid manifest: {source}")]
    Parse {
        /// File name, or `<bundled>`.
        path: String,
        /// TOML error with line and column.
        source: toml::de::Error,
    },
}

/// The task list cannot be ordered.
#[derive(Error, Debug)]
pub enum TaskError {
    /// Some tasks wait on each other.
    #[error("dependency cycle between tasks: {0}")]
    DependencyCycle(String),
}

/// The machine cannot run the installer.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Neither macOS nor Linux.
    #[error("unsupported platform: {platform}")]
    Unsupported {
        /// `std::env::consts::OS`.
        platform: String,
    },

    /// `$HOME` is unset or empty and `--home` was not given.
    #[error("HOME environment variable is not set; pass --home")]
    HomeNotSet,
}
