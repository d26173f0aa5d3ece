//! Hidden `complete` handler feeding shell completion scripts.

use qbt_core::QbitSession;

/// Sub-commands whose positional arguments are torrent hashes.
pub const MUTATING_COMMANDS: [&str; 4] = ["delete", "pause", "resume", "recheck"];

/// Prints `hash<TAB>name` lines when `command` takes hashes.
///
/// Errors are swallowed; a failure just prints nothing.
pub async fn run_complete_command(session: &mut QbitSession, command: &str) {
    if !MUTATING_COMMANDS.contains(&command) {
        return;
    }
    for entry in session.completion_entries().await {
        println!("{}\t{}", entry.hash, entry.name);
    }
}
