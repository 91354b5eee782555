//! Channel scraping: listing page to channel links to stream addresses.
//!
//! # Architecture
//!
//! ```text
//! listing page → TileLocator → ChannelLink* → StreamResolver → ChannelRecord*
//!                                                  ↑    │
//!                                                  └────┘ frame hops (bounded)
//! ```
//!
//! Both markup-matching steps sit behind a trait so a different strategy
//! (another grid layout, a structured query instead of a regex) can be
//! dropped in without touching [`Pipeline`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use streamlist::fetcher::HttpFetcher;
//! use streamlist::scraper::{Pipeline, ScraperConfig};
//!
//! let config = ScraperConfig::default();
//! let fetcher = Arc::new(HttpFetcher::new(&config)?);
//! let pipeline = Pipeline::new(fetcher, &config)?;
//!
//! let report = pipeline.run("https://daddylive.dad/24-7-channels.php").await?;
//! for record in &report.records {
//!     println!("{} {}", record.name(), record.stream_url());
//! }
//! ```

mod config;
mod enumerator;
mod pipeline;
mod resolver;

pub use config::ScraperConfig;
pub use enumerator::GridTileLocator;
pub use pipeline::{ChannelFailure, Pipeline, ScrapeReport};
pub use resolver::{frame_address, PatternStreamLocator, StreamResolver};

use crate::app::Result;
use crate::domain::ChannelLink;

/// What a fetched page offers on the way to a stream address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLead {
    /// A stream address found directly in the page text
    Stream(String),
    /// The raw `src` of the first embedded frame, possibly relative
    Frame(String),
    /// Neither
    Nothing,
}

/// Locates channel tiles on a listing page
pub trait TileLocator: Send + Sync {
    /// Extract channel links from `listing`, resolving relative hrefs
    /// against `listing_url`.
    ///
    /// Fails with `ParseMismatch` when the page has no recognizable tiles.
    fn locate(&self, listing: &str, listing_url: &str) -> Result<Vec<ChannelLink>>;
}

/// Inspects a player page for a stream address or a frame to follow
pub trait StreamLocator: Send + Sync {
    fn inspect(&self, page: &str) -> PageLead;
}
