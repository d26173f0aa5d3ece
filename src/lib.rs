//! qBittorrent WebUI client library.
//!
//! Backs two binaries: `qbt`, which runs one WebUI command per invocation,
//! and `rutracker-magnet`, which scrapes a magnet link from a tracker topic
//! and submits it.
//!
//! # Architecture
//!
//! - [`session`] - authenticated WebUI session and its operations
//! - [`magnet`] - topic id parsing, magnet scraping, one-shot submission
//! - [`config`] - connection settings passed in at construction
//! - [`terminal`] - tracing subscriber setup for the binaries

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
mod http_client;
pub mod magnet;
pub mod session;
pub mod terminal;
mod user_agent;

// Re-export commonly used types
pub use config::{ConnectionConfig, TrackerConfig};
pub use http_client::ClientBuildError;
pub use magnet::{MagnetError, TopicId, TrackerClient, extract_magnet, parse_topic_id, submit_magnet};
pub use session::{
    AddTorrentOptions, CompletionEntry, QbitSession, SessionError, TorrentFilter, TorrentRecord,
    TorrentSource,
};
pub use user_agent::{BROWSER_ACCEPT_LANGUAGE, BROWSER_USER_AGENT};
