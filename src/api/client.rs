//! HTTP implementation of [`ArtworkSource`] backed by reqwest

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{
    errors::{ApiError, ApiResult},
    source::{check_page, retry, ArtworkSource, ClientOptions},
    types::ArtworkPage,
};

/// Source that talks to the public artworks REST API
#[derive(Debug, Clone)]
pub struct HttpArtworkSource {
    client: Client,
    options: ClientOptions,
}

impl HttpArtworkSource {
    /// Create a new source from client options
    pub fn new(options: ClientOptions) -> ApiResult<Self> {
        if options.base_url.trim().is_empty() {
            return Err(ApiError::Config("base URL must not be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()?;

        Ok(Self { client, options })
    }

    /// URL of the listing page `page`
    pub fn page_url(&self, page: u32) -> String {
        format!(
            "{}/artworks?page={}",
            self.options.base_url.trim_end_matches('/'),
            page
        )
    }

    async fn fetch_once(&self, url: &str) -> ApiResult<ArtworkPage> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(format!("{} did not answer within {:?}", url, self.options.timeout))
            } else {
                ApiError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let page: ArtworkPage = serde_json::from_str(&body)?;
        Ok(page)
    }
}

#[async_trait]
impl ArtworkSource for HttpArtworkSource {
    async fn fetch_page(&self, page: u32) -> ApiResult<ArtworkPage> {
        check_page(page)?;
        let url = self.page_url(page);
        debug!("Fetching {}", url);

        let this = self;
        let target = url.as_str();
        let result = retry::with_retries(
            self.options.max_retries,
            self.options.retry_delay_ms,
            move || this.fetch_once(target),
        )
        .await?;

        debug!(
            "Page {} returned {} records ({} pages total)",
            result.pagination.current_page,
            result.data.len(),
            result.pagination.total_pages
        );
        Ok(result)
    }

    fn name(&self) -> &str {
        &self.options.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `responses` one connection at a time, returning the request lines seen
    async fn serve(responses: Vec<(u16, String)>) -> (String, tokio::task::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let mut seen = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = vec![0u8; 4096];
                let mut request = Vec::new();
                loop {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let text = String::from_utf8_lossy(&request);
                seen.push(text.lines().next().unwrap_or_default().to_string());

                let reply = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
            seen
        });

        (format!("http://{}/api/v1", addr), handle)
    }

    fn options(base_url: String) -> ClientOptions {
        ClientOptions {
            base_url,
            timeout: Duration::from_secs(5),
            max_retries: 1,
            retry_delay_ms: 1,
            ..ClientOptions::default()
        }
    }

    const BODY: &str = r#"{"pagination":{"total":2,"limit":12,"offset":12,"total_pages":2,"current_page":2,"prev_url":"x"},"data":[{"id":7,"title":"Nighthawks"}]}"#;

    #[tokio::test]
    async fn test_fetch_page_requests_page_query() {
        let (base_url, server) = serve(vec![(200, BODY.to_string())]).await;
        let source = HttpArtworkSource::new(options(base_url)).unwrap();

        let page = source.fetch_page(2).await.unwrap();
        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(page.data[0].title, "Nighthawks");

        let seen = server.await.unwrap();
        assert_eq!(seen, vec!["GET /api/v1/artworks?page=2 HTTP/1.1".to_string()]);
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let (base_url, server) = serve(vec![
            (503, "{}".to_string()),
            (200, BODY.to_string()),
        ])
        .await;
        let source = HttpArtworkSource::new(options(base_url)).unwrap();

        let page = source.fetch_page(2).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(server.await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_status_error() {
        let (base_url, _server) = serve(vec![(404, "{}".to_string())]).await;
        let source = HttpArtworkSource::new(options(base_url)).unwrap();

        let err = source.fetch_page(9).await.unwrap_err();
        match err {
            ApiError::Status { status, url } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert!(url.ends_with("artworks?page=9"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode_error() {
        let (base_url, _server) = serve(vec![(200, "{\"data\": 3}".to_string())]).await;
        let source = HttpArtworkSource::new(options(base_url)).unwrap();

        let err = source.fetch_page(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_page_zero_is_rejected_without_request() {
        let source = HttpArtworkSource::new(options("http://127.0.0.1:9".to_string())).unwrap();
        assert!(matches!(source.fetch_page(0).await, Err(ApiError::InvalidPage(0))));
    }

    #[test]
    fn test_page_url_trims_trailing_slash() {
        let source = HttpArtworkSource::new(options("https://api.artic.edu/api/v1/".to_string())).unwrap();
        assert_eq!(source.page_url(3), "https://api.artic.edu/api/v1/artworks?page=3");
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        assert!(matches!(
            HttpArtworkSource::new(options("  ".to_string())),
            Err(ApiError::Config(_))
        ));
    }
}
