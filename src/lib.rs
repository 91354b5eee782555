//! # streamlist
//!
//! Scrapes a TV channel listing page into an extended M3U playlist.
//!
//! ## Architecture
//!
//! streamlist is a single-pass pipeline:
//!
//! ```text
//! Fetcher → TileLocator → StreamResolver → Playlist
//! ```
//!
//! - [`fetcher`]: HTTP GET with a per-request timeout
//! - [`scraper`]: channel tile enumeration and stream resolution
//! - [`playlist`]: M3U rendering and atomic writes
//!
//! ## Quick Start
//!
//! ```bash
//! # Scrape the default listing into ./daddylive_247_channels.m3u
//! streamlist
//!
//! # Another listing, another file, four channels at a time
//! streamlist --url https://example.com/channels.php -o tv.m3u -c 4
//!
//! # Watch every request
//! RUST_LOG=streamlist=debug streamlist
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together configuration,
/// fetcher and pipeline.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration file at `~/.config/streamlist/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`ChannelLink`](domain::ChannelLink): a channel tile and its player page
/// - [`ChannelRecord`](domain::ChannelRecord): a channel with its stream address
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for page fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Extended M3U playlist output.
pub mod playlist;

/// Listing and player page scraping.
///
/// - [`Pipeline`](scraper::Pipeline): listing page to channel records
/// - [`GridTileLocator`](scraper::GridTileLocator): grid-column channel tiles
/// - [`StreamResolver`](scraper::StreamResolver): stream lookup with bounded frame following
pub mod scraper;
