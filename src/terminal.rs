//! Terminal and log-output setup shared by the binaries.

use std::io::IsTerminal;

#[must_use]
pub fn no_color_env_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

#[must_use]
pub fn is_dumb_terminal() -> bool {
    std::env::var("TERM")
        .map(|value| value.eq_ignore_ascii_case("dumb"))
        .unwrap_or(false)
}

#[must_use]
pub fn should_disable_color(stderr_is_terminal: bool, no_color_env: bool, dumb_terminal: bool) -> bool {
    !stderr_is_terminal || no_color_env || dumb_terminal
}

/// Maps `-q` / `-v` counts to a default filter directive.
///
/// Results go to stdout, so the default stays at `warn` to keep stderr quiet.
#[must_use]
pub fn default_log_level(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr tracing subscriber.
///
/// `RUST_LOG` takes priority over `default_level`. Calling this twice is
/// harmless; the second call is ignored.
pub fn init_tracing(default_level: &str) {
    let no_color = should_disable_color(
        std::io::stderr().is_terminal(),
        no_color_env_requested(),
        is_dumb_terminal(),
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}
