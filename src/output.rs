//! Terminal rendering of torrent lists and JSON payloads.

use qbt_core::TorrentRecord;

const HASH_WIDTH: usize = 10;
const NAME_WIDTH: usize = 30;
const SIZE_WIDTH: usize = 8;
const PROGRESS_WIDTH: usize = 10;
const STATE_WIDTH: usize = 10;
const SPEED_WIDTH: usize = 15;

const SIZE_UNITS: [&str; 8] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi"];

/// Formats a byte count with binary prefixes and one decimal place.
///
/// `0` gives `0.0B`, `1536` gives `1.5KiB`.
#[allow(clippy::cast_precision_loss)]
pub fn human_size(bytes: i64) -> String {
    let mut value = bytes as f64;
    for unit in SIZE_UNITS {
        if value.abs() < 1024.0 {
            return format!("{value:.1}{unit}B");
        }
        value /= 1024.0;
    }
    format!("{value:.1}YiB")
}

/// Cuts `text` to `width` chars, ending with `...` when it was longer.
pub fn truncate_with_ellipsis(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut output: String = text.chars().take(keep).collect();
    output.push_str("...");
    output
}

fn header_line() -> String {
    format!(
        "{:<HASH_WIDTH$} {:<NAME_WIDTH$} {:<SIZE_WIDTH$} {:<PROGRESS_WIDTH$} {:<STATE_WIDTH$} {:<SPEED_WIDTH$}",
        "Hash", "Name", "Size", "Progress", "State", "Speed"
    )
}

fn row_line(torrent: &TorrentRecord) -> String {
    let hash: String = torrent.hash.chars().take(HASH_WIDTH - 1).collect();
    let name = truncate_with_ellipsis(&torrent.name, NAME_WIDTH);
    let speed = format!("{}/s", human_size(torrent.download_speed));
    format!(
        "{hash:<HASH_WIDTH$} {name:<NAME_WIDTH$} {size:<SIZE_WIDTH$} {progress:>width$.1}% {state:<STATE_WIDTH$} {speed:<SPEED_WIDTH$}",
        size = human_size(torrent.size),
        progress = torrent.progress * 100.0,
        width = PROGRESS_WIDTH - 1,
        state = torrent.state,
    )
}

/// Renders the fixed-width torrent table: header, rule, one row per torrent.
pub fn render_table(torrents: &[TorrentRecord]) -> String {
    let header = header_line();
    let mut lines = vec![header.clone(), "-".repeat(header.chars().count())];
    lines.extend(torrents.iter().map(row_line));
    let mut table = lines.join("\n");
    table.push('\n');
    table
}

/// Renders any serializable value as indented JSON, keeping non-ASCII text.
///
/// # Errors
///
/// Fails only if the value cannot be represented as JSON.
pub fn render_json<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
