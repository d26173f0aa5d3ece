//! CLI command routing around one WebUI session.
//!
//! Builds the session, logs in (aborting the run if that fails), runs the
//! selected sub-command and always logs out afterwards. The `complete` path
//! never reports a failure.

use anyhow::Result;
use qbt_core::QbitSession;
use tracing::{debug, error, warn};

use crate::cli::{Cli, Command};
use crate::{ProcessExit, commands};

/// Runs one CLI invocation end to end.
pub(crate) async fn run(cli: &Cli) -> Result<ProcessExit> {
    let completing = matches!(cli.command, Command::Complete(_));
    let mut session = match QbitSession::new(cli.connection.to_config()) {
        Ok(session) => session,
        Err(error) if completing => {
            debug!(%error, "Completion session setup failed");
            return Ok(ProcessExit::Success);
        }
        Err(error) => return Err(error.into()),
    };

    if let Err(error) = session.login().await {
        if completing {
            debug!(%error, "Completion login failed");
            return Ok(ProcessExit::Success);
        }
        error!("{error}");
        error!("Could not connect to qBittorrent. Check the connection parameters.");
        return Ok(ProcessExit::Failure);
    }

    let outcome = dispatch(&mut session, &cli.command).await;

    if let Err(error) = session.logout().await {
        warn!(%error, "Logout failed");
    }
    outcome
}

async fn dispatch(session: &mut QbitSession, command: &Command) -> Result<ProcessExit> {
    let exit = match command {
        Command::List(args) => commands::run_list_command(session, args).await?,
        Command::Add(args) => commands::run_add_command(session, args).await,
        Command::Delete(args) => commands::run_delete_command(session, args).await,
        Command::Pause(args) => commands::run_pause_command(session, args).await,
        Command::Resume(args) => commands::run_resume_command(session, args).await,
        Command::Recheck(args) => commands::run_recheck_command(session, args).await,
        Command::Info(args) => commands::run_info_command(session, args).await?,
        Command::Trackers(args) => commands::run_trackers_command(session, args).await?,
        Command::Complete(args) => {
            commands::run_complete_command(session, &args.command).await;
            ProcessExit::Success
        }
    };
    Ok(exit)
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::ProcessExit;
    use crate::cli::Cli;
    use clap::Parser;

    /// Nothing listens on port 1, so login fails at the transport level.
    const DEAD_HOST: &str = "http://127.0.0.1:1/";

    #[tokio::test]
    async fn test_run_fails_when_login_fails() {
        let cli = Cli::parse_from(["qbt", "--host", DEAD_HOST, "pause", "abc"]);
        assert_eq!(run(&cli).await.unwrap(), ProcessExit::Failure);
    }

    #[tokio::test]
    async fn test_completion_swallows_login_failure() {
        let cli = Cli::parse_from(["qbt", "--host", DEAD_HOST, "complete", "delete"]);
        assert_eq!(run(&cli).await.unwrap(), ProcessExit::Success);
    }

    #[tokio::test]
    async fn test_completion_swallows_invalid_host() {
        let cli = Cli::parse_from(["qbt", "--host", "not a url", "complete", "delete"]);
        assert_eq!(run(&cli).await.unwrap(), ProcessExit::Success);
    }

    #[tokio::test]
    async fn test_run_reports_invalid_host_as_error() {
        let cli = Cli::parse_from(["qbt", "--host", "not a url", "list"]);
        assert!(run(&cli).await.is_err());
    }
}
