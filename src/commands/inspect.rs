//! `info` and `trackers` handlers.

use anyhow::Result;
use qbt_core::QbitSession;
use tracing::error;

use crate::ProcessExit;
use crate::cli::HashArgs;
use crate::output;

pub async fn run_info_command(session: &mut QbitSession, args: &HashArgs) -> Result<ProcessExit> {
    match session.get_torrent_properties(&args.hash).await {
        Ok(properties) => {
            println!("{}", output::render_json(&properties)?);
            Ok(ProcessExit::Success)
        }
        Err(error) => {
            error!("Failed to fetch torrent properties: {error}");
            Ok(ProcessExit::Failure)
        }
    }
}

pub async fn run_trackers_command(
    session: &mut QbitSession,
    args: &HashArgs,
) -> Result<ProcessExit> {
    match session.get_torrent_trackers(&args.hash).await {
        Ok(trackers) => {
            println!("{}", output::render_json(&trackers)?);
            Ok(ProcessExit::Success)
        }
        Err(error) => {
            error!("Failed to fetch torrent trackers: {error}");
            Ok(ProcessExit::Failure)
        }
    }
}
