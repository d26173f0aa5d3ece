//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};

use qbt_core::TorrentFilter;
use qbt_core::config::{ConnectionConfig, DEFAULT_BASE_URL, DEFAULT_PASSWORD, DEFAULT_USERNAME};

/// Drive a qBittorrent daemon from the command line.
///
/// Each invocation logs in to the WebUI, runs one command and logs out.
#[derive(Parser, Debug)]
#[command(name = "qbt")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// WebUI address and credentials.
#[derive(Args)]
pub struct ConnectionArgs {
    /// qBittorrent WebUI URL
    #[arg(long, default_value = DEFAULT_BASE_URL, global = true)]
    pub host: String,

    /// qBittorrent WebUI user name
    #[arg(long, default_value = DEFAULT_USERNAME, global = true)]
    pub username: String,

    /// qBittorrent WebUI password
    #[arg(long, default_value = DEFAULT_PASSWORD, global = true)]
    pub password: String,
}

impl ConnectionArgs {
    pub fn to_config(&self) -> ConnectionConfig {
        ConnectionConfig::new(&self.host, &self.username, &self.password)
    }
}

impl std::fmt::Debug for ConnectionArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.to_config(), f)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the torrent list
    List(ListArgs),

    /// Add a torrent from a magnet link or a .torrent file
    Add(AddArgs),

    /// Delete torrents
    Delete(DeleteArgs),

    /// Pause torrents
    Pause(HashesArgs),

    /// Resume torrents
    Resume(HashesArgs),

    /// Recheck torrent data
    Recheck(HashesArgs),

    /// Show the properties of one torrent
    Info(HashArgs),

    /// Show the trackers of one torrent
    Trackers(HashArgs),

    /// Print hash/name pairs for shell completion of a sub-command
    #[command(hide = true)]
    Complete(CompleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Torrent filter
    #[arg(long, value_enum, default_value_t = FilterArg::All)]
    pub filter: FilterArg,

    /// Sort by this torrent field (e.g. name, size, added_on)
    #[arg(long)]
    pub sort: Option<String>,

    /// Dump every field of every torrent as JSON
    #[arg(long)]
    pub details: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Magnet link or path to a .torrent file
    pub source: String,

    /// Folder to save the downloaded files into
    #[arg(long)]
    pub save_path: Option<String>,

    /// Category to file the torrent under
    #[arg(long)]
    pub category: Option<String>,

    /// Add the torrent without starting it
    #[arg(long)]
    pub paused: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Hashes of the torrents to delete
    #[arg(required = true)]
    pub hashes: Vec<String>,

    /// Also delete the downloaded files
    #[arg(long)]
    pub delete_files: bool,
}

#[derive(Args, Debug)]
pub struct HashesArgs {
    /// Torrent hashes
    #[arg(required = true)]
    pub hashes: Vec<String>,
}

#[derive(Args, Debug)]
pub struct HashArgs {
    /// Torrent hash
    pub hash: String,
}

#[derive(Args, Debug)]
pub struct CompleteArgs {
    /// Sub-command being completed
    pub command: String,
}

/// Torrent list filter as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    All,
    Downloading,
    Seeding,
    Completed,
    Paused,
    Active,
    Inactive,
    Resumed,
    Stalled,
    #[value(name = "stalled_uploading")]
    StalledUploading,
    #[value(name = "stalled_downloading")]
    StalledDownloading,
}

impl From<FilterArg> for TorrentFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => Self::All,
            FilterArg::Downloading => Self::Downloading,
            FilterArg::Seeding => Self::Seeding,
            FilterArg::Completed => Self::Completed,
            FilterArg::Paused => Self::Paused,
            FilterArg::Active => Self::Active,
            FilterArg::Inactive => Self::Inactive,
            FilterArg::Resumed => Self::Resumed,
            FilterArg::Stalled => Self::Stalled,
            FilterArg::StalledUploading => Self::StalledUploading,
            FilterArg::StalledDownloading => Self::StalledDownloading,
        }
    }
}
