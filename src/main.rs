//! CLI entry point for qbt.

use std::process::ExitCode;

use clap::Parser;
use qbt_core::terminal;
use tracing::{debug, error};

mod app;
mod cli;
mod commands;
mod output;

use cli::Cli;

/// How the process ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    Failure,
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        match exit {
            ProcessExit::Success => ExitCode::SUCCESS,
            ProcessExit::Failure => ExitCode::FAILURE,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();
    terminal::init_tracing(terminal::default_log_level(cli.quiet, cli.verbose));
    debug!(?cli, "CLI arguments parsed");

    match app::command_dispatcher::run(&cli).await {
        Ok(exit) => exit.into(),
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}
