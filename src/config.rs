//! Connection settings for the qBittorrent WebUI and the tracker site.
//!
//! Both binaries build these values from their command line and pass them to
//! the session and tracker clients at construction time.

/// Default qBittorrent WebUI address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Default WebUI user name.
pub const DEFAULT_USERNAME: &str = "admin";

/// Default WebUI password.
pub const DEFAULT_PASSWORD: &str = "adminadmin";

/// Default topic page of the tracker; the topic id is appended as `?t=<id>`.
pub const DEFAULT_TOPIC_PAGE_URL: &str = "https://rutracker.org/forum/viewtopic.php";

/// Address and credentials of one qBittorrent WebUI.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// WebUI root, e.g. `http://localhost:8080/`.
    pub base_url: String,
    /// WebUI user name.
    pub username: String,
    /// WebUI password.
    pub password: String,
}

impl ConnectionConfig {
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

// Hand-written so the password never reaches logs through `{:?}`.
impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where topic pages are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Topic page URL without the `t` query parameter.
    pub topic_page_url: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            topic_page_url: DEFAULT_TOPIC_PAGE_URL.to_string(),
        }
    }
}
