//! `macsetup` binary.
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory as _, Parser as _};

use macsetup_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();

    // Usage errors exit with 1 rather than clap's default of 2.
    let args = match cli::Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = i32::from(e.use_stderr());
            e.print().ok();
            std::process::exit(code);
        }
    };

    match args.command {
        cli::Command::Version => {
            println!("macsetup {}", commands::version());
            return Ok(());
        }
        cli::Command::Completions { shell } => {
            let mut cmd = cli::Cli::command();
            clap_complete::generate(shell, &mut cmd, "macsetup", &mut std::io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let command = args.command.log_name();
    logging::init_subscriber(args.verbose, command);
    let log = Arc::new(logging::Logger::new(command));

    match args.command {
        cli::Command::Setup(opts) => commands::setup::run(&args.global, &opts, &log),
        cli::Command::Teardown(opts) => commands::teardown::run(&args.global, &opts, &log),
        cli::Command::Test(opts) => commands::test::run(&args.global, &opts, &log),
        cli::Command::Version | cli::Command::Completions { .. } => Ok(()),
    }
}
