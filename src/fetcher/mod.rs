pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

#[async_trait]
pub trait Fetcher {
    /// GET `url` and return the body as text.
    ///
    /// Transport failures and non-success statuses are reported as
    /// [`StreamlistError::Fetch`](crate::app::StreamlistError::Fetch).
    async fn fetch_text(&self, url: &str) -> Result<String>;
}
