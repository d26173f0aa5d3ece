//! `add` handler.

use qbt_core::{AddTorrentOptions, QbitSession};

use super::report;
use crate::ProcessExit;
use crate::cli::AddArgs;

pub async fn run_add_command(session: &mut QbitSession, args: &AddArgs) -> ProcessExit {
    let options = AddTorrentOptions {
        save_path: args.save_path.clone(),
        category: args.category.clone(),
        paused: args.paused,
    };
    let result = session.add_torrent(&args.source, &options).await;
    report(result, "Torrent added", "Failed to add torrent")
}
