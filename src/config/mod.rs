//! Configuration management for streamlist.
//!
//! Configuration is read from `~/.config/streamlist/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! Command-line flags override whatever the file says.

use crate::scraper::ScraperConfig;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_LISTING_URL: &str = "https://daddylive.dad/24-7-channels.php";
pub const DEFAULT_OUTPUT: &str = "daddylive_247_channels.m3u";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub scraper: ScraperConfig,
    pub playlist: PlaylistConfig,
}

/// Where channels are scraped from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub listing_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
        }
    }
}

/// Where the playlist goes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaylistConfig {
    pub output: PathBuf,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/streamlist/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("streamlist").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# streamlist configuration
#
# Every value below is the built-in default. Command-line flags
# (--url, --output, --timeout, --max-frame-depth, --concurrency)
# take precedence over this file.

[source]
# Page listing the channels
listing_url = "https://daddylive.dad/24-7-channels.php"

[scraper]
# Per-request timeout in seconds
timeout_secs = 10

# How many embedded frames to follow from one player page
max_frame_depth = 5

# Channels resolved at the same time (1 = one after another)
concurrency = 1

# User agent to send (default: HTTP client default)
# user_agent = "Mozilla/5.0"

# Regex matched against each class of a <div> to find channel tiles
container_class_pattern = "col-lg-2|col-md-3|col-sm-4|col-xs-6"

# Regex a link must match to count as a player page
player_link_pattern = 'player\.php\?id=\d+'

# CSS selector for the channel name inside the link
name_selector = "h2"

[playlist]
# Playlist file to write
output = "daddylive_247_channels.m3u"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
