use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use streamlist::app::AppContext;
use streamlist::cli::{commands, Cli};
use streamlist::config::{Config, ConfigError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; per-channel progress is logged at info
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("streamlist=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => match Config::load() {
            Ok(config) => config,
            Err(e @ ConfigError::Parse { .. }) => return Err(e.into()),
            Err(e) => {
                tracing::warn!("{}; using built-in defaults", e);
                Config::default()
            }
        },
    };
    let config = cli.apply(config);

    let ctx = AppContext::new(config)?;
    commands::scrape(&ctx).await?;

    Ok(())
}
