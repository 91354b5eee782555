use std::collections::HashSet;
use std::sync::Arc;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use crate::app::{Result, StreamlistError};
use crate::fetcher::Fetcher;
use crate::scraper::{PageLead, StreamLocator};

/// First `http(s)` address containing `.m3u8`, query string included.
/// Whitespace and quotes end the match.
const STREAM_PATTERN: &str = r#"https?://[^\s"']*\.m3u8[^\s"']*"#;

/// Matches stream addresses anywhere in the raw page text (script bodies,
/// attributes, plain text) and falls back to the first `<iframe src>`.
pub struct PatternStreamLocator {
    stream: Regex,
    frame: Selector,
}

impl PatternStreamLocator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            stream: Regex::new(STREAM_PATTERN)?,
            frame: Selector::parse("iframe[src]")
                .map_err(|e| StreamlistError::Selector(e.to_string()))?,
        })
    }
}

impl StreamLocator for PatternStreamLocator {
    fn inspect(&self, page: &str) -> PageLead {
        if let Some(found) = self.stream.find(page) {
            return PageLead::Stream(found.as_str().to_string());
        }

        let document = Html::parse_document(page);
        document
            .select(&self.frame)
            .filter_map(|frame| frame.value().attr("src"))
            .map(str::trim)
            .find(|src| !src.is_empty())
            .map(|src| PageLead::Frame(src.to_string()))
            .unwrap_or(PageLead::Nothing)
    }
}

/// Address of a frame `src` found on the page at `current`.
///
/// Absolute sources are kept, protocol-relative ones take the scheme of
/// `current`, anything else replaces the last path segment of `current`
/// (leading slashes of `src` are dropped, so `/a` and `a` resolve alike).
pub fn frame_address(current: &str, src: &str) -> String {
    if src.starts_with("http") {
        return src.to_string();
    }

    if let Some(rest) = src.strip_prefix("//") {
        let scheme = current
            .split_once("://")
            .map(|(scheme, _)| scheme)
            .unwrap_or("https");
        return format!("{}://{}", scheme, rest);
    }

    let path = current
        .split(['?', '#'])
        .next()
        .unwrap_or(current);
    let directory = path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or(path);
    format!("{}/{}", directory, src.trim_start_matches('/'))
}

/// Follows a player page, and at most `max_frame_depth` frames below it,
/// until a stream address turns up.
pub struct StreamResolver {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    locator: Arc<dyn StreamLocator>,
    max_frame_depth: usize,
}

impl StreamResolver {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        locator: Arc<dyn StreamLocator>,
        max_frame_depth: usize,
    ) -> Self {
        Self {
            fetcher,
            locator,
            max_frame_depth,
        }
    }

    pub async fn resolve(&self, player_url: &str) -> Result<String> {
        let mut current = player_url.to_string();
        let mut visited = HashSet::new();
        let mut hops = 0;

        loop {
            visited.insert(current.clone());
            let page = self.fetcher.fetch_text(&current).await?;

            match self.locator.inspect(&page) {
                PageLead::Stream(url) => {
                    debug!("Stream at {}: {}", current, url);
                    return Ok(url);
                }
                PageLead::Frame(src) => {
                    let next = frame_address(&current, &src);
                    if visited.contains(&next) {
                        return Err(StreamlistError::FrameCycle(next));
                    }
                    if hops == self.max_frame_depth {
                        return Err(StreamlistError::FrameDepthExceeded {
                            url: player_url.to_string(),
                            depth: self.max_frame_depth,
                        });
                    }
                    hops += 1;
                    debug!("No stream at {}, following frame {}", current, next);
                    current = next;
                }
                PageLead::Nothing => return Err(StreamlistError::StreamNotFound(current)),
            }
        }
    }
}
