//! Authenticated session against the qBittorrent WebUI API (v2).
//!
//! A [`QbitSession`] owns one cookie-carrying HTTP client. Login happens
//! lazily: every operation first makes sure the session is authenticated,
//! trying exactly once, and fails with the login error if that attempt fails.
//!
//! # Example
//!
//! ```no_run
//! use qbt_core::{ConnectionConfig, QbitSession, TorrentFilter};
//!
//! # async fn example() -> Result<(), qbt_core::SessionError> {
//! let mut session = QbitSession::new(ConnectionConfig::default())?;
//! for torrent in session.list_torrents(TorrentFilter::Downloading, None).await? {
//!     println!("{} {}", torrent.hash, torrent.name);
//! }
//! session.logout().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod torrent;

pub use error::SessionError;
pub use torrent::{
    AddTorrentOptions, CompletionEntry, HASH_SEPARATOR, MAGNET_PREFIX, TorrentFilter,
    TorrentRecord, TorrentSource,
};

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::ConnectionConfig;
use crate::http_client::build_http_client;
use crate::user_agent;

use torrent::join_hashes;

/// Body the WebUI returns for a successful login.
pub const LOGIN_OK: &str = "Ok.";

const LOGIN_PATH: &str = "api/v2/auth/login";
const LOGOUT_PATH: &str = "api/v2/auth/logout";
const INFO_PATH: &str = "api/v2/torrents/info";
const ADD_PATH: &str = "api/v2/torrents/add";
const DELETE_PATH: &str = "api/v2/torrents/delete";
const PAUSE_PATH: &str = "api/v2/torrents/pause";
const RESUME_PATH: &str = "api/v2/torrents/resume";
const RECHECK_PATH: &str = "api/v2/torrents/recheck";
const PROPERTIES_PATH: &str = "api/v2/torrents/properties";
const TRACKERS_PATH: &str = "api/v2/torrents/trackers";

/// Session client for one qBittorrent WebUI.
pub struct QbitSession {
    config: ConnectionConfig,
    base_url: Url,
    client: Client,
    authenticated: bool,
}

impl std::fmt::Debug for QbitSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QbitSession")
            .field("config", &self.config)
            .field("authenticated", &self.authenticated)
            .finish_non_exhaustive()
    }
}

impl QbitSession {
    /// Creates an unauthenticated session for `config`.
    ///
    /// No request is made until the first operation.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidBaseUrl`] when the address does not parse
    /// and [`SessionError::ClientBuild`] when the HTTP client cannot be built.
    pub fn new(config: ConnectionConfig) -> Result<Self, SessionError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let jar = Arc::new(Jar::default());
        let client = build_http_client("webui", &user_agent::default_user_agent(), Some(jar))?;
        Ok(Self {
            config,
            base_url,
            client,
            authenticated: false,
        })
    }

    /// Whether the last login succeeded and no logout happened since.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The connection settings this session was built from.
    #[must_use]
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Posts the credentials to the login endpoint.
    ///
    /// # Errors
    ///
    /// [`SessionError::Connection`] when the WebUI cannot be reached and
    /// [`SessionError::AuthRejected`] when the body is anything but `Ok.`.
    #[instrument(skip(self), fields(url = %self.base_url, username = %self.config.username))]
    pub async fn login(&mut self) -> Result<(), SessionError> {
        let url = self.endpoint(LOGIN_PATH)?;
        let credentials = [
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
        ];
        let request = self.client.post(url.clone()).form(&credentials);
        let response = send(&url, request).await?;
        let body = response
            .text()
            .await
            .map_err(|error| SessionError::decode(url.as_str(), error))?;

        if body == LOGIN_OK {
            self.authenticated = true;
            info!("Logged in to qBittorrent");
            Ok(())
        } else {
            self.authenticated = false;
            warn!(response = %body, "qBittorrent rejected the login");
            Err(SessionError::AuthRejected { message: body })
        }
    }

    async fn ensure_authenticated(&mut self) -> Result<(), SessionError> {
        if self.authenticated {
            return Ok(());
        }
        self.login().await
    }

    /// Lists torrents matching `filter`, optionally sorted by a record field.
    ///
    /// # Errors
    ///
    /// Returns the login error, a transport error, a rejection, or a decode
    /// error when the body is not a JSON array of records.
    #[instrument(skip(self))]
    pub async fn list_torrents(
        &mut self,
        filter: TorrentFilter,
        sort: Option<&str>,
    ) -> Result<Vec<TorrentRecord>, SessionError> {
        self.ensure_authenticated().await?;
        let mut params = vec![("filter", filter.as_str())];
        if let Some(sort) = sort.filter(|s| !s.is_empty()) {
            params.push(("sort", sort));
        }
        let torrents: Vec<TorrentRecord> = self.get_json(INFO_PATH, &params).await?;
        debug!(count = torrents.len(), "Listed torrents");
        Ok(torrents)
    }

    /// Adds a torrent from a magnet link or a local .torrent path.
    ///
    /// The source is validated before anything is sent; an unknown source
    /// never reaches the network.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidSource`] for a source that is neither a magnet
    /// link nor an existing file, otherwise as [`add_source`](Self::add_source).
    pub async fn add_torrent(
        &mut self,
        source: &str,
        options: &AddTorrentOptions,
    ) -> Result<(), SessionError> {
        let source = TorrentSource::classify(source)?;
        self.add_source(&source, options).await
    }

    /// Adds an already classified torrent source.
    ///
    /// Magnets go out as a urlencoded form with `urls`; files go out as a
    /// multipart form with a `torrents` part.
    ///
    /// # Errors
    ///
    /// [`SessionError::TorrentFile`] when a local file cannot be read, the login
    /// error, a transport error, or [`SessionError::Rejected`] for a non-200
    /// answer.
    #[instrument(skip(self, options), fields(paused = options.paused))]
    pub async fn add_source(
        &mut self,
        source: &TorrentSource,
        options: &AddTorrentOptions,
    ) -> Result<(), SessionError> {
        let fields = options.form_fields();
        let payload = match source {
            TorrentSource::Magnet(magnet) => AddPayload::Urls(magnet.clone()),
            TorrentSource::File(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|error| SessionError::TorrentFile {
                        path: path.clone(),
                        source: error,
                    })?;
                let file_name = path.file_name().map_or_else(
                    || "upload.torrent".to_string(),
                    |name| name.to_string_lossy().into_owned(),
                );
                AddPayload::Upload(Part::bytes(bytes).file_name(file_name))
            }
        };

        self.ensure_authenticated().await?;
        let url = self.endpoint(ADD_PATH)?;
        let request = match payload {
            AddPayload::Urls(magnet) => {
                let mut form = vec![("urls", magnet)];
                form.extend(fields);
                self.client.post(url.clone()).form(&form)
            }
            AddPayload::Upload(part) => {
                let form = fields
                    .into_iter()
                    .fold(Form::new().part("torrents", part), |form, (key, value)| {
                        form.text(key, value)
                    });
                self.client.post(url.clone()).multipart(form)
            }
        };

        let response = send(&url, request).await?;
        expect_ok(&url, response).await?;
        info!("Torrent added");
        Ok(())
    }

    /// Deletes torrents, optionally with their downloaded data.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoHashes`] for an empty hash list, otherwise the login,
    /// transport or rejection error.
    #[instrument(skip(self))]
    pub async fn delete_torrents<S: AsRef<str> + std::fmt::Debug>(
        &mut self,
        hashes: &[S],
        delete_files: bool,
    ) -> Result<(), SessionError> {
        let delete_files = if delete_files { "true" } else { "false" };
        self.post_hashes(DELETE_PATH, hashes, &[("deleteFiles", delete_files)])
            .await
    }

    /// Pauses torrents.
    ///
    /// # Errors
    ///
    /// Same as [`delete_torrents`](Self::delete_torrents).
    #[instrument(skip(self))]
    pub async fn pause_torrents<S: AsRef<str> + std::fmt::Debug>(
        &mut self,
        hashes: &[S],
    ) -> Result<(), SessionError> {
        self.post_hashes(PAUSE_PATH, hashes, &[]).await
    }

    /// Resumes torrents.
    ///
    /// # Errors
    ///
    /// Same as [`delete_torrents`](Self::delete_torrents).
    #[instrument(skip(self))]
    pub async fn resume_torrents<S: AsRef<str> + std::fmt::Debug>(
        &mut self,
        hashes: &[S],
    ) -> Result<(), SessionError> {
        self.post_hashes(RESUME_PATH, hashes, &[]).await
    }

    /// Queues torrents for a hash recheck.
    ///
    /// # Errors
    ///
    /// Same as [`delete_torrents`](Self::delete_torrents).
    #[instrument(skip(self))]
    pub async fn recheck_torrents<S: AsRef<str> + std::fmt::Debug>(
        &mut self,
        hashes: &[S],
    ) -> Result<(), SessionError> {
        self.post_hashes(RECHECK_PATH, hashes, &[]).await
    }

    /// Generic properties of one torrent, as the daemon returns them.
    ///
    /// # Errors
    ///
    /// Login, transport, rejection (404 for an unknown hash) or decode error.
    #[instrument(skip(self))]
    pub async fn get_torrent_properties(
        &mut self,
        hash: &str,
    ) -> Result<serde_json::Value, SessionError> {
        self.ensure_authenticated().await?;
        self.get_json(PROPERTIES_PATH, &[("hash", hash)]).await
    }

    /// Trackers of one torrent, as the daemon returns them.
    ///
    /// # Errors
    ///
    /// Same as [`get_torrent_properties`](Self::get_torrent_properties).
    #[instrument(skip(self))]
    pub async fn get_torrent_trackers(
        &mut self,
        hash: &str,
    ) -> Result<Vec<serde_json::Value>, SessionError> {
        self.ensure_authenticated().await?;
        self.get_json(TRACKERS_PATH, &[("hash", hash)]).await
    }

    /// Hash/name pairs for shell completion.
    ///
    /// Never fails: any error yields an empty list.
    pub async fn completion_entries(&mut self) -> Vec<CompletionEntry> {
        match self.list_torrents(TorrentFilter::All, None).await {
            Ok(torrents) => torrents.into_iter().map(CompletionEntry::from).collect(),
            Err(error) => {
                debug!(%error, "Completion listing failed");
                Vec::new()
            }
        }
    }

    /// Ends the WebUI session.
    ///
    /// The authenticated flag is cleared whatever the outcome. Without an
    /// active login this is a no-op.
    ///
    /// # Errors
    ///
    /// Transport error or rejection of the logout request.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        if !self.authenticated {
            debug!("No active login; skipping logout");
            return Ok(());
        }
        let url = self.endpoint(LOGOUT_PATH)?;
        let result = send(&url, self.client.post(url.clone())).await;
        self.authenticated = false;
        expect_ok(&url, result?).await?;
        info!("Logged out of qBittorrent");
        Ok(())
    }

    async fn post_hashes<S: AsRef<str>>(
        &mut self,
        path: &str,
        hashes: &[S],
        extra: &[(&str, &str)],
    ) -> Result<(), SessionError> {
        if hashes.is_empty() {
            return Err(SessionError::NoHashes);
        }
        self.ensure_authenticated().await?;
        let url = self.endpoint(path)?;
        let joined = join_hashes(hashes);
        let mut form = vec![("hashes", joined.as_str())];
        form.extend_from_slice(extra);
        let response = send(&url, self.client.post(url.clone()).form(&form)).await?;
        expect_ok(&url, response).await?;
        debug!(count = hashes.len(), "Bulk operation accepted");
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SessionError> {
        let url = self.endpoint(path)?;
        let response = send(&url, self.client.get(url.clone()).query(query)).await?;
        let response = expect_ok(&url, response).await?;
        response
            .json::<T>()
            .await
            .map_err(|error| SessionError::decode(url.as_str(), error))
    }

    fn endpoint(&self, path: &str) -> Result<Url, SessionError> {
        self.base_url
            .join(path)
            .map_err(|source| SessionError::InvalidBaseUrl {
                url: self.config.base_url.clone(),
                source,
            })
    }
}

/// Body of an add request, prepared before the session is touched.
enum AddPayload {
    Urls(String),
    Upload(Part),
}

/// Parses the WebUI address and makes sure relative joins keep its path.
fn normalize_base_url(raw: &str) -> Result<Url, SessionError> {
    let mut url = Url::parse(raw.trim()).map_err(|source| SessionError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn send(url: &Url, request: RequestBuilder) -> Result<Response, SessionError> {
    debug!(%url, "Sending WebUI request");
    request
        .send()
        .await
        .map_err(|error| SessionError::connection(url.as_str(), error))
}

async fn expect_ok(url: &Url, response: Response) -> Result<Response, SessionError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    warn!(%url, status = status.as_u16(), response = %message, "qBittorrent rejected request");
    Err(SessionError::rejected(url.as_str(), status.as_u16(), message))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_appends_slash() {
        let url = normalize_base_url("http://nas:8080/qbt").unwrap();
        assert_eq!(url.as_str(), "http://nas:8080/qbt/");
        assert_eq!(
            url.join(LOGIN_PATH).unwrap().as_str(),
            "http://nas:8080/qbt/api/v2/auth/login"
        );
    }

    #[test]
    fn test_normalize_base_url_keeps_root() {
        let url = normalize_base_url("http://localhost:8080").unwrap();
        assert_eq!(
            url.join(INFO_PATH).unwrap().as_str(),
            "http://localhost:8080/api/v2/torrents/info"
        );
    }

    #[test]
    fn test_new_rejects_relative_address() {
        let err = QbitSession::new(ConnectionConfig::new("localhost", "a", "b")).unwrap_err();
        assert!(matches!(err, SessionError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_new_session_starts_unauthenticated() {
        let session = QbitSession::new(ConnectionConfig::default()).unwrap();
        assert!(!session.is_authenticated());
        assert!(!format!("{session:?}").contains("adminadmin"));
    }

    #[tokio::test]
    async fn test_logout_without_login_is_noop() {
        // Unroutable address: a request would fail, so Ok proves none was sent.
        let mut session =
            QbitSession::new(ConnectionConfig::new("http://127.0.0.1:1/", "a", "b")).unwrap();
        session.logout().await.unwrap();
        session.logout().await.unwrap();
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_bulk_operation_rejects_empty_hashes_before_login() {
        let mut session =
            QbitSession::new(ConnectionConfig::new("http://127.0.0.1:1/", "a", "b")).unwrap();
        let empty: [&str; 0] = [];
        let err = session.pause_torrents(&empty).await.unwrap_err();
        assert!(matches!(err, SessionError::NoHashes));
    }
}
