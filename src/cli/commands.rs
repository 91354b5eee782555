use std::path::Path;

use crate::app::{AppContext, Result};
use crate::playlist::{self, WriteOutcome};
use crate::scraper::ScrapeReport;

/// Scrape the configured listing page and write the playlist.
///
/// Nothing here is fatal: an unreachable or unrecognized listing page, a
/// run that resolves zero channels and a failed write are all reported on
/// the console and return `Ok`.
pub async fn scrape(ctx: &AppContext) -> Result<()> {
    let listing_url = &ctx.config.source.listing_url;
    println!("Scraping channels from {}", listing_url);

    let report = match ctx.pipeline.run(listing_url).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Could not read the channel listing: {}", e);
            ScrapeReport::default()
        }
    };

    print_summary(&report);
    save(&report, &ctx.config.playlist.output);

    Ok(())
}

fn print_summary(report: &ScrapeReport) {
    if !report.failures.is_empty() {
        println!("\nChannels without a stream:");
        for failure in &report.failures {
            println!("  ! {} ({}) - {}", failure.name, failure.player_url, failure.error);
        }
    }

    println!(
        "\nResolved {} of {} channels",
        report.records.len(),
        report.discovered
    );
}

fn save(report: &ScrapeReport, output: &Path) {
    match playlist::write_playlist(&report.records, output) {
        Ok(WriteOutcome::Written { path, channels }) => {
            let shown = std::fs::canonicalize(&path).unwrap_or(path);
            println!("Wrote {} channels to {}", channels, shown.display());
        }
        Ok(WriteOutcome::Skipped) => {
            println!("No channels were scraped. Playlist not created.");
        }
        Err(e) => {
            eprintln!("Error writing playlist: {}", e);
        }
    }
}
