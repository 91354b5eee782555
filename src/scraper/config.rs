use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for fetching and scraping channel pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: u64,

    /// Maximum number of frames followed from one player page (default: 5)
    pub max_frame_depth: usize,

    /// Channels resolved at the same time (default: 1, fully sequential)
    pub concurrency: usize,

    /// User agent string to send; none means the HTTP client default
    pub user_agent: Option<String>,

    /// Regex matched against each class of a `div` to recognize a channel tile
    pub container_class_pattern: String,

    /// Regex an anchor's href must match to count as a player-page link
    pub player_link_pattern: String,

    /// CSS selector for the element holding the channel name inside the link
    pub name_selector: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_frame_depth: 5,
            concurrency: 1,
            user_agent: None,
            container_class_pattern: "col-lg-2|col-md-3|col-sm-4|col-xs-6".to_string(),
            player_link_pattern: r"player\.php\?id=\d+".to_string(),
            name_selector: "h2".to_string(),
        }
    }
}

impl ScraperConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Concurrency clamped to at least one worker
    pub fn workers(&self) -> usize {
        self.concurrency.max(1)
    }
}
