//! Data source trait for paginated artwork listings

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

use super::{
    errors::{ApiError, ApiResult},
    types::ArtworkPage,
};

/// Anything that can hand out pages of artworks by 1-based page number
#[async_trait]
pub trait ArtworkSource: Send + Sync {
    /// Fetch a single page of the listing
    async fn fetch_page(&self, page: u32) -> ApiResult<ArtworkPage>;

    /// Human-readable name used in logs and the status bar
    fn name(&self) -> &str;
}

/// Client options for HTTP-backed sources
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: "https://api.artic.edu/api/v1".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
            retry_delay_ms: 500,
            user_agent: format!("artview/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Retry helpers shared by source implementations
pub mod retry {
    use super::*;
    use rand::Rng;
    use std::future::Future;

    /// Exponential backoff with jitter, capped at 30 seconds
    pub fn backoff_delay(attempt: u32, base_delay_ms: u64) -> Duration {
        let jitter: f64 = rand::thread_rng().gen_range(0.0..=1.0);
        let factor = 2.0_f64.powi(attempt.min(16) as i32) * (1.0 + jitter);
        let delay_ms = (base_delay_ms as f64 * factor) as u64;
        Duration::from_millis(delay_ms.min(30_000))
    }

    /// Run `operation` until it succeeds, fails with a non-retryable
    /// error, or `max_retries` extra attempts have been spent.
    pub async fn with_retries<T, F, Fut>(
        max_retries: u32,
        base_delay_ms: u64,
        mut operation: F,
    ) -> ApiResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = backoff_delay(attempt, base_delay_ms);
                    warn!("Attempt {} failed ({}), retrying in {:?}", attempt + 1, e, delay);
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Reject page numbers the API can never serve
pub fn check_page(page: u32) -> ApiResult<()> {
    if page == 0 {
        return Err(ApiError::InvalidPage(page));
    }
    Ok(())
}
