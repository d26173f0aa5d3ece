//! Bulk handlers: `delete`, `pause`, `resume`, `recheck`.

use qbt_core::QbitSession;

use super::report;
use crate::ProcessExit;
use crate::cli::{DeleteArgs, HashesArgs};

pub async fn run_delete_command(session: &mut QbitSession, args: &DeleteArgs) -> ProcessExit {
    let result = session
        .delete_torrents(&args.hashes, args.delete_files)
        .await;
    report(result, "Torrents deleted", "Failed to delete torrents")
}

pub async fn run_pause_command(session: &mut QbitSession, args: &HashesArgs) -> ProcessExit {
    let result = session.pause_torrents(&args.hashes).await;
    report(result, "Torrents paused", "Failed to pause torrents")
}

pub async fn run_resume_command(session: &mut QbitSession, args: &HashesArgs) -> ProcessExit {
    let result = session.resume_torrents(&args.hashes).await;
    report(result, "Torrents resumed", "Failed to resume torrents")
}

pub async fn run_recheck_command(session: &mut QbitSession, args: &HashesArgs) -> ProcessExit {
    let result = session.recheck_torrents(&args.hashes).await;
    report(result, "Torrents queued for recheck", "Failed to start recheck")
}
