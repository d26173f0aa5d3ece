//! Error types for WebUI session operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::http_client::ClientBuildError;

/// Errors returned by [`QbitSession`](super::QbitSession) operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The configured WebUI address is not a valid absolute URL.
    #[error("invalid WebUI address {url}: {source}")]
    InvalidBaseUrl {
        /// The address as configured.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client could not be constructed.
    #[error(transparent)]
    ClientBuild(#[from] ClientBuildError),

    /// Transport failure: connection refused, DNS, TLS or timeout.
    #[error("could not reach qBittorrent at {url}: {source}")]
    Connection {
        /// The endpoint that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The WebUI did not answer the login with `Ok.`.
    #[error("authentication rejected: {message}")]
    AuthRejected {
        /// Body returned by the WebUI (usually `Fails.`).
        message: String,
    },

    /// The WebUI answered with a non-success status.
    #[error("qBittorrent rejected {url} (HTTP {status}): {message}")]
    Rejected {
        /// The endpoint that rejected the request.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// Response body as returned by the WebUI.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("malformed response from {url}: {source}")]
    Decode {
        /// The endpoint whose body was malformed.
        url: String,
        /// The underlying decode error.
        #[source]
        source: reqwest::Error,
    },

    /// The torrent source is neither a magnet link nor an existing file.
    #[error(
        "invalid torrent source {input:?}: expected a magnet link or a path to a .torrent file"
    )]
    InvalidSource {
        /// The rejected source string.
        input: String,
    },

    /// A bulk operation was called with no hashes.
    #[error("no torrent hashes given")]
    NoHashes,

    /// The local .torrent file could not be read.
    #[error("could not read torrent file {path}: {source}")]
    TorrentFile {
        /// Path of the descriptor file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    /// Creates a transport error for `url`.
    pub fn connection(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Connection {
            url: url.into(),
            source,
        }
    }

    /// Creates a remote rejection error.
    pub fn rejected(url: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            url: url.into(),
            status,
            message: message.into(),
        }
    }

    /// Creates a decode error.
    pub fn decode(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Creates an invalid-source error.
    pub fn invalid_source(input: impl Into<String>) -> Self {
        Self::InvalidSource {
            input: input.into(),
        }
    }

    /// True when the daemon could not be reached at all.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// True when the credentials were refused.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthRejected { .. })
    }

    /// True when the request was refused locally, before any network call.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidSource { .. } | Self::NoHashes | Self::TorrentFile { .. }
        )
    }
}
