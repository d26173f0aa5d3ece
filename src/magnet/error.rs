//! Error types for topic resolution and magnet scraping.

use thiserror::Error;

use crate::http_client::ClientBuildError;

/// Likely reasons a topic page carries no magnet link, shown to the user.
pub const MAGNET_NOT_FOUND_CAUSES: [&str; 3] = [
    "the tracker requires you to be logged in",
    "the topic was removed or never existed",
    "the tracker changed its page layout",
];

/// Errors raised while turning a topic reference into a magnet link.
#[derive(Debug, Error)]
pub enum MagnetError {
    /// The topic argument is neither an id nor a URL carrying one.
    #[error("cannot extract a topic id from {input:?}: {reason}")]
    InvalidTopic {
        /// The argument as given.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// The configured topic page URL does not parse.
    #[error("invalid tracker URL {url}: {source}")]
    InvalidTrackerUrl {
        /// The URL as configured.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client could not be constructed.
    #[error(transparent)]
    ClientBuild(#[from] ClientBuildError),

    /// The topic page could not be fetched or read.
    #[error("could not fetch {url}: {source}")]
    Fetch {
        /// Topic page URL.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The tracker answered with an error status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// Topic page URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The page was fetched but holds no magnet link.
    #[error("no magnet link found on {url}")]
    MagnetNotFound {
        /// Topic page URL.
        url: String,
    },
}

impl MagnetError {
    /// Creates an invalid-topic error.
    pub fn invalid_topic(input: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidTopic {
            input: input.into(),
            reason,
        }
    }

    /// True when the page was reachable but scraping came up empty.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MagnetNotFound { .. })
    }
}
