//! One-shot submission of a resolved magnet link.

use tracing::{instrument, warn};

use crate::config::ConnectionConfig;
use crate::session::{AddTorrentOptions, QbitSession, SessionError, TorrentSource};

/// Logs in, adds `magnet`, and logs out again.
///
/// Uses its own session built from `config`; logout runs whether or not the
/// add succeeded, and a logout failure is only logged.
///
/// # Errors
///
/// Returns the login error, or the add error when the daemon refuses the link.
#[instrument(skip(config, magnet, options), fields(url = %config.base_url))]
pub async fn submit_magnet(
    config: ConnectionConfig,
    magnet: &str,
    options: &AddTorrentOptions,
) -> Result<(), SessionError> {
    let mut session = QbitSession::new(config)?;
    session.login().await?;

    let outcome = session
        .add_source(&TorrentSource::Magnet(magnet.to_string()), options)
        .await;

    if let Err(error) = session.logout().await {
        warn!(%error, "Logout after magnet submission failed");
    }
    outcome
}
