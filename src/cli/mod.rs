pub mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "streamlist")]
#[command(about = "Scrape a channel listing into an M3U playlist", long_about = None)]
pub struct Cli {
    /// Listing page to scrape
    #[arg(short, long)]
    pub url: Option<String>,

    /// Playlist file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Maximum number of embedded frames followed per channel
    #[arg(long)]
    pub max_frame_depth: Option<usize>,

    /// Number of channels resolved in parallel
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Config file to use instead of ~/.config/streamlist/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line overrides on top of `config`
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(ref url) = self.url {
            config.source.listing_url = url.clone();
        }
        if let Some(ref output) = self.output {
            config.playlist.output = output.clone();
        }
        if let Some(timeout) = self.timeout {
            config.scraper.timeout_secs = timeout;
        }
        if let Some(depth) = self.max_frame_depth {
            config.scraper.max_frame_depth = depth;
        }
        if let Some(concurrency) = self.concurrency {
            config.scraper.concurrency = concurrency;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::parse_from(["streamlist"]);
        assert_eq!(cli.apply(Config::default()), Config::default());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "streamlist",
            "--url",
            "https://site.test/list.php",
            "-o",
            "tv.m3u",
            "--timeout",
            "3",
            "--max-frame-depth",
            "2",
            "-c",
            "6",
        ]);
        let config = cli.apply(Config::default());

        assert_eq!(config.source.listing_url, "https://site.test/list.php");
        assert_eq!(config.playlist.output, PathBuf::from("tv.m3u"));
        assert_eq!(config.scraper.timeout_secs, 3);
        assert_eq!(config.scraper.max_frame_depth, 2);
        assert_eq!(config.scraper.concurrency, 6);
    }

    #[test]
    fn test_config_path_flag() {
        let cli = Cli::parse_from(["streamlist", "--config", "/etc/streamlist.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/streamlist.toml")));
    }
}
