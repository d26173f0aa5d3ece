//! Torrent-level types exchanged with the WebUI.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SessionError;

/// Scheme prefix that marks a torrent source as a magnet link.
pub const MAGNET_PREFIX: &str = "magnet:";

/// Separator the WebUI expects between hashes in bulk operations.
pub const HASH_SEPARATOR: &str = "|";

/// Server-side filter for the torrent list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TorrentFilter {
    #[default]
    All,
    Downloading,
    Seeding,
    Completed,
    Paused,
    Active,
    Inactive,
    Resumed,
    Stalled,
    StalledUploading,
    StalledDownloading,
}

impl TorrentFilter {
    /// Every filter, in the order the WebUI documents them.
    pub const ALL: [Self; 11] = [
        Self::All,
        Self::Downloading,
        Self::Seeding,
        Self::Completed,
        Self::Paused,
        Self::Active,
        Self::Inactive,
        Self::Resumed,
        Self::Stalled,
        Self::StalledUploading,
        Self::StalledDownloading,
    ];

    /// Value sent as the `filter` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Downloading => "downloading",
            Self::Seeding => "seeding",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Resumed => "resumed",
            Self::Stalled => "stalled",
            Self::StalledUploading => "stalled_uploading",
            Self::StalledDownloading => "stalled_downloading",
        }
    }
}

impl fmt::Display for TorrentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TorrentFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str() == value)
            .ok_or_else(|| format!("unknown torrent filter '{value}'"))
    }
}

/// One torrent as reported by `/api/v2/torrents/info`.
///
/// Fields the table view needs are typed; everything else the daemon sends is
/// kept in `extra` so the detailed view can dump the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorrentRecord {
    pub hash: String,
    pub name: String,
    /// Total selected size in bytes.
    #[serde(default)]
    pub size: i64,
    /// Fraction done, 0.0 to 1.0.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub state: String,
    /// Download speed in bytes per second.
    #[serde(default, rename = "dlspeed")]
    pub download_speed: i64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Hash/name pair printed for shell completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEntry {
    pub hash: String,
    pub name: String,
}

impl From<TorrentRecord> for CompletionEntry {
    fn from(record: TorrentRecord) -> Self {
        Self {
            hash: record.hash,
            name: record.name,
        }
    }
}

/// Where a new torrent comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TorrentSource {
    /// A magnet link, submitted as the `urls` form field.
    Magnet(String),
    /// A local .torrent file, uploaded as the `torrents` multipart part.
    File(PathBuf),
}

impl TorrentSource {
    /// Classifies a user-supplied source string.
    ///
    /// Anything starting with `magnet:` is a magnet link; otherwise the string
    /// must name an existing file.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidSource`] for any other value.
    pub fn classify(input: &str) -> Result<Self, SessionError> {
        if input.starts_with(MAGNET_PREFIX) {
            return Ok(Self::Magnet(input.to_string()));
        }
        let path = Path::new(input);
        if !input.is_empty() && path.exists() {
            return Ok(Self::File(path.to_path_buf()));
        }
        Err(SessionError::invalid_source(input))
    }
}

/// Optional parameters of an add request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddTorrentOptions {
    /// Download folder on the daemon host.
    pub save_path: Option<String>,
    /// Category to file the torrent under.
    pub category: Option<String>,
    /// Add without starting.
    pub paused: bool,
}

impl AddTorrentOptions {
    /// Text form fields shared by both add shapes, in request order.
    pub(crate) fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(save_path) = self.save_path.as_deref().filter(|p| !p.is_empty()) {
            fields.push(("savepath", save_path.to_string()));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            fields.push(("category", category.to_string()));
        }
        if self.paused {
            fields.push(("paused", "true".to_string()));
        }
        fields
    }
}

/// Joins hashes the way bulk WebUI endpoints expect them.
pub(crate) fn join_hashes<S: AsRef<str>>(hashes: &[S]) -> String {
    hashes
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(HASH_SEPARATOR)
}
