use async_trait::async_trait;
use reqwest::Client;

use crate::app::{Result, StreamlistError};
use crate::fetcher::Fetcher;
use crate::scraper::ScraperConfig;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true);

        if let Some(ref ua) = config.user_agent {
            builder = builder.user_agent(ua.as_str());
        }

        let client = builder
            .build()
            .map_err(|e| StreamlistError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StreamlistError::fetch(url, e))?;

        let response = response
            .error_for_status()
            .map_err(|e| StreamlistError::fetch(url, e))?;

        response
            .text()
            .await
            .map_err(|e| StreamlistError::fetch(url, e))
    }
}
