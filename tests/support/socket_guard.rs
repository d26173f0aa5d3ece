//! Guard for tests that need a localhost listener (wiremock).

use std::net::TcpListener;
use std::panic::Location;

use wiremock::MockServer;

const STRICT_ENV: &str = "QBT_REQUIRE_SOCKET_TESTS";

/// `QBT_REQUIRE_SOCKET_TESTS=1|true|yes` turns a skip into a failure.
#[must_use]
pub fn socket_tests_required() -> bool {
    std::env::var(STRICT_ENV).is_ok_and(|value| {
        matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
    })
}

/// True when localhost cannot be bound and the test should return early.
#[track_caller]
#[must_use]
pub fn should_skip_socket_bound_test() -> bool {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return false;
    }

    let caller = Location::caller();
    let message = format!(
        "[socket-guard] {}:{} needs a localhost socket for the mock WebUI, none available",
        caller.file(),
        caller.line()
    );
    assert!(!socket_tests_required(), "{message} ({STRICT_ENV} is set)");
    eprintln!("{message}; skipping. Set {STRICT_ENV}=1 to fail instead.");
    true
}

/// Starts a mock server, or returns `None` when sockets are unavailable.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if should_skip_socket_bound_test() {
        return None;
    }
    Some(MockServer::start().await)
}
