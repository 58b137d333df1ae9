//! Command-line arguments.
use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the environment installer.
#[derive(Parser, Debug)]
#[command(
    name = "macsetup",
    about = "Idempotent macOS developer environment bootstrap",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options every subcommand accepts.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Path to the resource manifest (defaults to the bundled manifest)
    #[arg(short, long, global = true, env = "MACSETUP_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    /// Override the home directory used for config files, backups and Oh My Zsh
    #[arg(long, global = true, env = "MACSETUP_HOME")]
    pub home: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install every declared resource that is not already present
    Setup(SetupOpts),
    /// Restore backed-up files and remove installed resources
    Teardown(TeardownOpts),
    /// Check that every declared resource is present
    Test(TestOpts),
    /// Print version information
    Version,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

impl Command {
    /// Short name used for the per-command log file.
    #[must_use]
    pub const fn log_name(&self) -> &'static str {
        match self {
            Self::Setup(_) => "setup",
            Self::Teardown(_) => "teardown",
            Self::Test(_) => "test",
            Self::Version => "version",
            Self::Completions { .. } => "completions",
        }
    }
}

/// Options for the `setup` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct SetupOpts {
    /// Skip specific tasks
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only specific tasks
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

/// Options for the `teardown` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct TeardownOpts {}

/// Options for the `test` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct TestOpts {}
