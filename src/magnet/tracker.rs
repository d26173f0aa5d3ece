//! Topic page fetching with a browser-like request profile.

use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use super::{MagnetError, TopicId, extract_magnet};
use crate::config::TrackerConfig;
use crate::http_client::build_http_client;
use crate::user_agent::{self, BROWSER_USER_AGENT};

/// Fetches tracker topic pages and pulls the magnet link out of them.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    client: Client,
    config: TrackerConfig,
}

impl TrackerClient {
    /// Creates a tracker client for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`MagnetError::ClientBuild`] when the HTTP client cannot be built.
    pub fn new(config: TrackerConfig) -> Result<Self, MagnetError> {
        let client = build_http_client("tracker", BROWSER_USER_AGENT, None)?;
        Ok(Self { client, config })
    }

    /// Topic page URL for `topic`.
    ///
    /// # Errors
    ///
    /// Returns [`MagnetError::InvalidTrackerUrl`] when the configured page URL
    /// does not parse.
    pub fn topic_url(&self, topic: TopicId) -> Result<Url, MagnetError> {
        Url::parse_with_params(&self.config.topic_page_url, &[("t", topic.to_string())]).map_err(
            |source| MagnetError::InvalidTrackerUrl {
                url: self.config.topic_page_url.clone(),
                source,
            },
        )
    }

    /// Downloads the topic page and returns its magnet link.
    ///
    /// # Errors
    ///
    /// [`MagnetError::Fetch`] on transport failure, [`MagnetError::HttpStatus`]
    /// for a non-2xx answer and [`MagnetError::MagnetNotFound`] when the page
    /// holds no magnet link.
    #[instrument(skip(self), fields(topic = %topic))]
    pub async fn fetch_magnet(&self, topic: TopicId) -> Result<String, MagnetError> {
        let url = self.topic_url(topic)?;
        debug!(%url, "Fetching topic page");

        let response = self
            .client
            .get(url.clone())
            .headers(user_agent::browser_headers())
            .send()
            .await
            .map_err(|source| MagnetError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MagnetError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|source| MagnetError::Fetch {
            url: url.to_string(),
            source,
        })?;
        debug!(bytes = html.len(), "Topic page received");

        let magnet = extract_magnet(&html).ok_or_else(|| MagnetError::MagnetNotFound {
            url: url.to_string(),
        })?;
        info!("Magnet link found");
        Ok(magnet)
    }
}
