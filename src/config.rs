/// Runtime configuration
///
/// Parsed once at startup from the command line (and a couple of
/// environment variables) with clap.
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::state::carousel::SLIDE_INTERVAL;

#[derive(Parser, Debug, Clone)]
#[command(name = "memory-museum", version, about = "A tiny museum of our memories")]
pub struct AppConfig {
    /// Base path songs and relative images are resolved against (defaults to ./)
    #[arg(long, env = "MEMORY_MUSEUM_ASSET_BASE")]
    pub asset_base: Option<String>,

    /// Directory holding the local storage database
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Seconds between automatic slide changes
    #[arg(long, default_value_t = SLIDE_INTERVAL.as_secs(), value_parser = clap::value_parser!(u64).range(1..))]
    pub slide_interval_secs: u64,

    /// Start with the slideshow paused
    #[arg(long)]
    pub no_autoplay: bool,

    /// Log filter, e.g. `info` or `memory_museum=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log: String,
}

impl AppConfig {
    pub fn slide_interval(&self) -> Duration {
        Duration::from_secs(self.slide_interval_secs)
    }
}
