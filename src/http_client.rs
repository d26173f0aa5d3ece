//! Shared HTTP client construction policy.
//!
//! The WebUI session and the tracker client both build their reqwest client
//! here so they agree on timeouts, compression and proxy handling.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::{Client, ClientBuilder, Proxy};
use thiserror::Error;
use tracing::warn;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const TOTAL_TIMEOUT: Duration = Duration::from_secs(30);

/// Proxy variables consulted when system proxy lookup is unusable, per scheme.
const HTTPS_PROXY_VARS: [&str; 4] = ["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"];
const HTTP_PROXY_VARS: [&str; 4] = ["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"];

/// Failure to construct a reqwest client.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The builder rejected the configuration.
    #[error("HTTP client construction failed: {0}")]
    Build(#[source] reqwest::Error),

    /// Networking setup panicked, even with proxies taken from the environment.
    #[error("HTTP client construction panicked while initializing networking")]
    Panicked,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ProxySource {
    System,
    Environment,
}

/// Builds an HTTP client with the crate-wide timeouts and compression.
///
/// `purpose` only labels log lines. A supplied cookie jar keeps cookies set
/// by one response (the WebUI `SID`) for later requests.
///
/// # Errors
///
/// Returns [`ClientBuildError`] when client construction fails.
pub(crate) fn build_http_client(
    purpose: &str,
    user_agent: &str,
    cookie_jar: Option<Arc<Jar>>,
) -> Result<Client, ClientBuildError> {
    if let Some(result) = guarded_build(user_agent, cookie_jar.clone(), ProxySource::System) {
        return result.map_err(ClientBuildError::Build);
    }
    // System proxy discovery panics in some sandboxes.
    warn!(purpose, "System proxy lookup panicked; retrying with proxies from the environment");
    guarded_build(user_agent, cookie_jar, ProxySource::Environment)
        .ok_or(ClientBuildError::Panicked)?
        .map_err(ClientBuildError::Build)
}

/// `None` when building panicked.
fn guarded_build(
    user_agent: &str,
    cookie_jar: Option<Arc<Jar>>,
    proxies: ProxySource,
) -> Option<Result<Client, reqwest::Error>> {
    catch_unwind(AssertUnwindSafe(|| {
        configured_builder(user_agent, cookie_jar, proxies).build()
    }))
    .ok()
}

fn configured_builder(
    user_agent: &str,
    cookie_jar: Option<Arc<Jar>>,
    proxies: ProxySource,
) -> ClientBuilder {
    let mut builder = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(TOTAL_TIMEOUT)
        .user_agent(user_agent)
        .gzip(true);

    if let Some(jar) = cookie_jar {
        builder = builder.cookie_provider(jar);
    }

    if proxies == ProxySource::Environment {
        builder = builder.no_proxy();
        if let Some(proxy) = first_env_value(&HTTPS_PROXY_VARS).and_then(|v| Proxy::https(v).ok()) {
            builder = builder.proxy(proxy);
        }
        if let Some(proxy) = first_env_value(&HTTP_PROXY_VARS).and_then(|v| Proxy::http(v).ok()) {
            builder = builder.proxy(proxy);
        }
    }
    builder
}

fn first_env_value(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
