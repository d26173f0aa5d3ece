//! User-Agent strings and request headers for WebUI and tracker traffic.

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/qbt";

/// Browser User-Agent sent to the tracker, which refuses non-browser clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Accept-Language sent along with [`BROWSER_USER_AGENT`].
pub const BROWSER_ACCEPT_LANGUAGE: &str = "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7";

/// Default User-Agent for WebUI requests (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("qbt/{version} (+{PROJECT_UA_URL})")
}

/// Header set that makes a tracker page request look like a desktop browser.
#[must_use]
pub(crate) fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
    );
    headers
}
