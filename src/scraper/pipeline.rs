use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::app::{Result, StreamlistError};
use crate::domain::ChannelRecord;
use crate::fetcher::Fetcher;
use crate::scraper::{
    GridTileLocator, PatternStreamLocator, ScraperConfig, StreamLocator, StreamResolver,
    TileLocator,
};

/// A channel that was listed but produced no playlist entry
#[derive(Debug)]
pub struct ChannelFailure {
    pub name: String,
    pub player_url: String,
    pub error: StreamlistError,
}

/// Outcome of one scrape run
#[derive(Debug, Default)]
pub struct ScrapeReport {
    /// Resolved channels, in listing order
    pub records: Vec<ChannelRecord>,
    /// Channel links found on the listing page
    pub discovered: usize,
    pub failures: Vec<ChannelFailure>,
}

pub struct Pipeline {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    tiles: Arc<dyn TileLocator>,
    resolver: StreamResolver,
    workers: usize,
}

impl Pipeline {
    /// Pipeline with the grid tile locator and the pattern stream locator
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, config: &ScraperConfig) -> Result<Self> {
        let tiles = Arc::new(GridTileLocator::new(config)?);
        let streams = Arc::new(PatternStreamLocator::new()?);
        Ok(Self::with_locators(fetcher, tiles, streams, config))
    }

    pub fn with_locators(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        tiles: Arc<dyn TileLocator>,
        streams: Arc<dyn StreamLocator>,
        config: &ScraperConfig,
    ) -> Self {
        let resolver = StreamResolver::new(fetcher.clone(), streams, config.max_frame_depth);
        Self {
            fetcher,
            tiles,
            resolver,
            workers: config.workers(),
        }
    }

    /// Scrape the listing page and resolve a stream for every channel on it.
    ///
    /// Fails only when the listing page itself can't be fetched or has no
    /// recognizable channel tiles; per-channel problems end up in
    /// [`ScrapeReport::failures`].
    pub async fn run(&self, listing_url: &str) -> Result<ScrapeReport> {
        info!("Fetching listing page {}", listing_url);
        let listing = self.fetcher.fetch_text(listing_url).await?;
        let links = self.tiles.locate(&listing, listing_url)?;
        info!("Found {} channels", links.len());

        let resolver = &self.resolver;
        let outcomes: Vec<std::result::Result<ChannelRecord, ChannelFailure>> =
            stream::iter(links)
                .map(|link| async move {
                    info!("Resolving {} ({})", link.name, link.player_url);
                    let outcome = resolver
                        .resolve(&link.player_url)
                        .await
                        .and_then(|url| ChannelRecord::new(&link.name, &url));

                    match outcome {
                        Ok(record) => {
                            info!("  {} -> {}", record.name(), record.stream_url());
                            Ok(record)
                        }
                        Err(error) => {
                            warn!("  Could not extract a stream for {}: {}", link.name, error);
                            Err(ChannelFailure {
                                name: link.name,
                                player_url: link.player_url,
                                error,
                            })
                        }
                    }
                })
                .buffered(self.workers)
                .collect()
                .await;

        let mut report = ScrapeReport {
            discovered: outcomes.len(),
            ..Default::default()
        };

        for outcome in outcomes {
            match outcome {
                Ok(record) => report.records.push(record),
                Err(failure) => report.failures.push(failure),
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::fetcher::testing::StaticFetcher;

    const LISTING_URL: &str = "https://site.test/24-7-channels.php";

    fn pipeline(fetcher: StaticFetcher, config: &ScraperConfig) -> Pipeline {
        Pipeline::new(Arc::new(fetcher), config).unwrap()
    }

    fn listing(tiles: &[(&str, &str)]) -> String {
        tiles
            .iter()
            .map(|(id, name)| {
                format!(
                    r#"<div class="col-lg-2 col-md-3"><a href="player.php?id={}"><h2>{}</h2></a></div>"#,
                    id, name
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_sample_channel_end_to_end() {
        let fetcher = StaticFetcher::new()
            .page(
                LISTING_URL,
                r#"<div class="col-lg-2"><a href="player.php?id=903"><h2>Sample Channel</h2></a></div>"#,
            )
            .page(
                "https://site.test/player.php?id=903",
                r#"<script>jwplayer("v").setup({ file: "https://cdn.example/live/903.m3u8?token=abc" });</script>"#,
            );

        let report = pipeline(fetcher, &ScraperConfig::default())
            .run(LISTING_URL)
            .await
            .unwrap();

        assert_eq!(report.discovered, 1);
        assert!(report.failures.is_empty());
        assert_eq!(
            report.records,
            vec![ChannelRecord::new("Sample Channel", "https://cdn.example/live/903.m3u8?token=abc").unwrap()]
        );
    }

    #[tokio::test]
    async fn test_unresolvable_channel_yields_no_records() {
        let fetcher = StaticFetcher::new()
            .page(LISTING_URL, &listing(&[("1", "Dead Channel")]))
            .page("https://site.test/player.php?id=1", "<p>Stream offline</p>");

        let report = pipeline(fetcher, &ScraperConfig::default())
            .run(LISTING_URL)
            .await
            .unwrap();

        assert_eq!(report.discovered, 1);
        assert!(report.records.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(report.failures[0].error, StreamlistError::StreamNotFound(_)));
    }

    #[tokio::test]
    async fn test_failures_skip_only_their_channel() {
        let fetcher = StaticFetcher::new()
            .page(LISTING_URL, &listing(&[("1", "One"), ("2", "Two"), ("3", "Three")]))
            .page("https://site.test/player.php?id=1", r#""https://cdn.test/1.m3u8""#)
            .page(
                "https://site.test/player.php?id=3",
                r#"<iframe src="/embed/3.php"></iframe>"#,
            )
            .page("https://site.test/embed/3.php", r#"'https://cdn.test/3.m3u8'"#);

        let report = pipeline(fetcher, &ScraperConfig::default())
            .run(LISTING_URL)
            .await
            .unwrap();

        let names: Vec<&str> = report.records.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["One", "Three"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name, "Two");
        assert!(matches!(report.failures[0].error, StreamlistError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_parallel_resolution_keeps_listing_order() {
        let ids: Vec<String> = (0..8).map(|i| i.to_string()).collect();
        let tiles: Vec<(&str, &str)> = ids.iter().map(|id| (id.as_str(), id.as_str())).collect();
        let mut fetcher = StaticFetcher::new().page(LISTING_URL, &listing(&tiles));
        for id in &ids {
            fetcher = fetcher.page(
                &format!("https://site.test/player.php?id={}", id),
                &format!(r#"src="https://cdn.test/{}.m3u8""#, id),
            );
        }
        let config = ScraperConfig {
            concurrency: 4,
            ..Default::default()
        };

        let report = pipeline(fetcher, &config).run(LISTING_URL).await.unwrap();

        let names: Vec<&str> = report.records.iter().map(|r| r.name()).collect();
        assert_eq!(names, ids.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Records what had been logged when a given page was requested.
    struct SnapshotFetcher {
        inner: StaticFetcher,
        logs: LogBuffer,
        watch: String,
        snapshot: Mutex<Option<String>>,
    }

    #[async_trait]
    impl Fetcher for SnapshotFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            if url == self.watch {
                *self.snapshot.lock().unwrap() = Some(self.logs.contents());
            }
            self.inner.fetch_text(url).await
        }
    }

    #[tokio::test]
    async fn test_channel_outcome_logged_before_next_channel() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let fetcher = Arc::new(SnapshotFetcher {
            inner: StaticFetcher::new()
                .page(LISTING_URL, &listing(&[("1", "One"), ("2", "Two"), ("3", "Three")]))
                .page("https://site.test/player.php?id=1", r#""https://cdn.test/1.m3u8""#)
                .page("https://site.test/player.php?id=3", r#""https://cdn.test/3.m3u8""#),
            logs: logs.clone(),
            watch: "https://site.test/player.php?id=3".to_string(),
            snapshot: Mutex::new(None),
        });

        Pipeline::new(fetcher.clone(), &ScraperConfig::default())
            .unwrap()
            .run(LISTING_URL)
            .await
            .unwrap();

        let before_three = fetcher.snapshot.lock().unwrap().clone().unwrap();
        assert!(before_three.contains("One -> https://cdn.test/1.m3u8"));
        assert!(before_three.contains("Could not extract a stream for Two"));
    }

    #[tokio::test]
    async fn test_listing_fetch_failure_aborts() {
        let err = pipeline(StaticFetcher::new(), &ScraperConfig::default())
            .run(LISTING_URL)
            .await
            .unwrap_err();
        assert!(matches!(err, StreamlistError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_unrecognized_listing_aborts() {
        let fetcher = StaticFetcher::new().page(LISTING_URL, "<ul><li>nothing here</li></ul>");
        let err = pipeline(fetcher, &ScraperConfig::default())
            .run(LISTING_URL)
            .await
            .unwrap_err();
        assert!(matches!(err, StreamlistError::ParseMismatch(_)));
    }
}
