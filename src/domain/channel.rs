use url::Url;

use crate::app::{Result, StreamlistError};

/// A channel tile found on the listing page, before its stream is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLink {
    pub name: String,
    pub player_url: String,
}

impl ChannelLink {
    pub fn new(name: impl Into<String>, player_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            player_url: player_url.into(),
        }
    }
}

/// A channel with a resolved stream address, ready for the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    name: String,
    stream_url: String,
}

impl ChannelRecord {
    /// Build a record, rejecting blank or multi-line names and stream
    /// addresses that are not absolute http(s) URLs.
    pub fn new(name: &str, stream_url: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StreamlistError::InvalidRecord("empty channel name".into()));
        }
        if name.contains(['\n', '\r']) {
            return Err(StreamlistError::InvalidRecord(format!(
                "channel name spans lines: {:?}",
                name
            )));
        }

        let parsed = Url::parse(stream_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StreamlistError::InvalidRecord(format!(
                "unsupported scheme in {}",
                stream_url
            )));
        }

        Ok(Self {
            name: name.to_string(),
            stream_url: stream_url.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }
}
