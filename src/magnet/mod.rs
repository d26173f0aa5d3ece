//! Magnet resolution for tracker topics.
//!
//! Turns a topic id or topic URL into a magnet link by scraping the topic
//! page, then hands the link to a one-shot WebUI add.

mod error;
mod scrape;
mod submit;
mod topic;
mod tracker;

pub use error::{MAGNET_NOT_FOUND_CAUSES, MagnetError};
pub use scrape::{MAGNET_MARKER, extract_magnet};
pub use submit::submit_magnet;
pub use topic::{TopicId, parse_topic_id};
pub use tracker::TrackerClient;
