//! Resolve a RuTracker topic to its magnet link and add it to qBittorrent.

use std::process::ExitCode;

use clap::Parser;
use qbt_core::config::{
    DEFAULT_BASE_URL, DEFAULT_PASSWORD, DEFAULT_TOPIC_PAGE_URL, DEFAULT_USERNAME,
};
use qbt_core::magnet::MAGNET_NOT_FOUND_CAUSES;
use qbt_core::{
    AddTorrentOptions, ConnectionConfig, TrackerClient, TrackerConfig, parse_topic_id,
    submit_magnet, terminal,
};
use tracing::error;

/// Add a RuTracker topic to qBittorrent through its magnet link.
#[derive(Parser)]
#[command(name = "rutracker-magnet")]
#[command(author, version, about)]
struct Args {
    /// Topic id or topic page URL (e.g. 6673601 or https://rutracker.org/forum/viewtopic.php?t=6673601)
    topic: String,

    /// qBittorrent WebUI URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    url: String,

    /// qBittorrent WebUI user name
    #[arg(long, default_value = DEFAULT_USERNAME)]
    user: String,

    /// qBittorrent WebUI password
    #[arg(long = "pass", default_value = DEFAULT_PASSWORD)]
    password: String,

    /// Folder to save the downloaded files into
    #[arg(long)]
    save_path: Option<String>,

    /// Category to file the torrent under
    #[arg(long)]
    category: Option<String>,

    /// Add the torrent without starting it
    #[arg(long)]
    paused: bool,

    /// Topic page URL the id is appended to
    #[arg(long, default_value = DEFAULT_TOPIC_PAGE_URL, hide = true)]
    tracker_url: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    terminal::init_tracing(terminal::default_log_level(args.quiet, args.verbose));

    let topic = match parse_topic_id(&args.topic) {
        Ok(topic) => topic,
        Err(error) => {
            error!("{error}");
            return ExitCode::FAILURE;
        }
    };

    println!("Fetching magnet link for topic #{topic}...");
    let tracker = match TrackerClient::new(TrackerConfig {
        topic_page_url: args.tracker_url.clone(),
    }) {
        Ok(tracker) => tracker,
        Err(error) => {
            error!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let magnet = match tracker.fetch_magnet(topic).await {
        Ok(magnet) => magnet,
        Err(error) => {
            error!("{error}");
            eprintln!("Could not get a magnet link. Likely causes:");
            for cause in MAGNET_NOT_FOUND_CAUSES {
                eprintln!("- {cause}");
            }
            return ExitCode::FAILURE;
        }
    };

    println!("Magnet link found, adding to qBittorrent...");
    let config = ConnectionConfig::new(args.url, args.user, args.password);
    let options = AddTorrentOptions {
        save_path: args.save_path,
        category: args.category,
        paused: args.paused,
    };

    match submit_magnet(config, &magnet, &options).await {
        Ok(()) => {
            println!("Torrent added to qBittorrent");
            ExitCode::SUCCESS
        }
        Err(error) => {
            error!("Failed to add torrent: {error}");
            ExitCode::FAILURE
        }
    }
}
