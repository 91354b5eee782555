use std::path::PathBuf;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum StreamlistError {
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("Unrecognized page structure: {0}")]
    ParseMismatch(String),

    #[error("No stream address found at {0}")]
    StreamNotFound(String),

    #[error("Frame chain starting at {url} is deeper than {depth} hops")]
    FrameDepthExceeded { url: String, depth: usize },

    #[error("Frame chain loops back to {0}")]
    FrameCycle(String),

    #[error("Invalid channel record: {0}")]
    InvalidRecord(String),

    #[error("Failed to write playlist {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StreamlistError {
    pub fn fetch(url: &str, source: impl Into<BoxError>) -> Self {
        Self::Fetch {
            url: url.to_string(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StreamlistError>;
