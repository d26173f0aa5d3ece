//! `list` handler.

use anyhow::Result;
use qbt_core::QbitSession;
use tracing::error;

use crate::ProcessExit;
use crate::cli::ListArgs;
use crate::output;

pub async fn run_list_command(session: &mut QbitSession, args: &ListArgs) -> Result<ProcessExit> {
    let torrents = match session
        .list_torrents(args.filter.into(), args.sort.as_deref())
        .await
    {
        Ok(torrents) => torrents,
        Err(error) => {
            error!("Failed to list torrents: {error}");
            return Ok(ProcessExit::Failure);
        }
    };

    if args.details {
        for torrent in &torrents {
            println!("{}", output::render_json(torrent)?);
        }
    } else {
        print!("{}", output::render_table(&torrents));
    }
    Ok(ProcessExit::Success)
}
