//! CLI command handlers, one per sub-command.
//!
//! Each handler issues exactly one session call, prints the outcome and maps
//! it to a [`ProcessExit`].

mod add;
mod complete;
mod inspect;
mod list;
mod manage;

pub use add::run_add_command;
pub use complete::run_complete_command;
pub use inspect::{run_info_command, run_trackers_command};
pub use list::run_list_command;
pub use manage::{
    run_delete_command, run_pause_command, run_recheck_command, run_resume_command,
};

use qbt_core::SessionError;
use tracing::error;

use crate::ProcessExit;

/// Prints `success` or logs `failure` with the error, and picks the exit code.
fn report(result: Result<(), SessionError>, success: &str, failure: &str) -> ProcessExit {
    match result {
        Ok(()) => {
            println!("{success}");
            ProcessExit::Success
        }
        Err(error) => {
            error!("{failure}: {error}");
            ProcessExit::Failure
        }
    }
}
