//! In-memory [`ArtworkSource`] used by tests

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use super::{
    errors::{ApiError, ApiResult},
    source::{check_page, ArtworkSource},
    types::{Artwork, ArtworkId, ArtworkPage, Pagination},
};

#[derive(Debug)]
pub struct FakeSource {
    total: u64,
    limit: u32,
    fail_on: Option<u32>,
    delay: Option<Duration>,
    empty_past_end: bool,
    requested: Mutex<Vec<u32>>,
}

impl FakeSource {
    pub fn new(total: u64, limit: u32) -> Self {
        Self {
            total,
            limit,
            fail_on: None,
            delay: None,
            empty_past_end: false,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, page: u32) -> Self {
        self.fail_on = Some(page);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer pages past the end with an empty page instead of a 404
    pub fn empty_past_end(mut self) -> Self {
        self.empty_past_end = true;
        self
    }

    pub fn total_pages(&self) -> u32 {
        self.total.div_ceil(u64::from(self.limit)) as u32
    }

    /// Page numbers requested so far, in order
    pub fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }

    pub fn artwork(id: u64) -> Artwork {
        Artwork {
            id: ArtworkId(id),
            title: format!("Artwork {id}"),
            place_of_origin: Some("France".to_string()),
            artist_display: Some(format!("Artist {id}")),
            inscriptions: None,
            date_start: Some(1800),
            date_end: Some(1801),
        }
    }
}

#[async_trait]
impl ArtworkSource for FakeSource {
    async fn fetch_page(&self, page: u32) -> ApiResult<ArtworkPage> {
        check_page(page)?;
        self.requested.lock().unwrap().push(page);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let total_pages = self.total_pages();
        let past_end = page > total_pages.max(1) && !self.empty_past_end;
        if self.fail_on == Some(page) || past_end {
            return Err(ApiError::Status {
                status: reqwest::StatusCode::NOT_FOUND,
                url: format!("fake://artworks?page={page}"),
            });
        }

        let offset = u64::from(page - 1) * u64::from(self.limit);
        let end = (offset + u64::from(self.limit)).min(self.total);
        let data = (offset..end).map(|i| Self::artwork(i + 1)).collect();

        Ok(ArtworkPage {
            pagination: Pagination {
                current_page: page,
                limit: self.limit,
                next_url: (page < total_pages).then(|| format!("fake://artworks?page={}", page + 1)),
                prev_url: (page > 1).then(|| format!("fake://artworks?page={}", page - 1)),
                offset,
                total: self.total,
                total_pages,
            },
            data,
        })
    }

    fn name(&self) -> &str {
        "fake"
    }
}
