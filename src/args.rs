use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "followee",
    about = "Analyze a social-network data export to find mutual follows, unfollowers, and follow-request stats",
    version,
    long_about = None
)]
pub struct Args {
    /// Download URL for the exported data archive
    #[arg(short, long)]
    pub url: String,

    /// Identifying name used to scope local storage paths
    #[arg(short = 'n', long, default_value = "user")]
    pub username: String,

    /// Directory for the downloaded archive and extracted files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Number of entries in the recent-followers view
    #[arg(short, long, default_value_t = crate::analysis::DEFAULT_RECENT_LIMIT)]
    pub recent: usize,

    /// Print every relationship list, not just the counts
    #[arg(long)]
    pub lists: bool,

    /// Emit the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Redact usernames for privacy
    #[arg(long)]
    pub redact: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
