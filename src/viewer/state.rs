//! Everything the table view shows, independent of the terminal.

use chrono::{DateTime, Local};
use tracing::debug;

use super::{
    accumulate::Accumulation,
    selection::Selection,
    window::{PageClick, PageWindow},
};
use crate::api::{Artwork, ArtworkPage};

/// Where the current page stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading { page: u32 },
    Failed { page: u32, message: String },
}

/// A fetch the caller must perform and report back with
/// [`ViewerState::apply_loaded`] or [`ViewerState::apply_failed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub id: u64,
    pub page: u32,
}

/// What [`ViewerState::apply_loaded`] did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A newer request superseded this one
    Stale,
    Shown,
    /// The requested page was past the end; fetch this one instead
    Clamped(PageRequest),
}

#[derive(Debug, Clone)]
pub struct ViewerState {
    active_page: u32,
    window: PageWindow,
    current: Option<ArtworkPage>,
    status: LoadStatus,
    selection: Selection,
    cursor: usize,
    next_request_id: u64,
    pending: Option<PageRequest>,
    loaded_at: Option<DateTime<Local>>,
}

impl ViewerState {
    pub fn new(start_page: u32, window_size: u32) -> Self {
        let placed = PageWindow::new(window_size).jump(start_page, u32::MAX);
        Self {
            active_page: placed.active,
            window: placed.window,
            current: None,
            status: LoadStatus::Idle,
            selection: Selection::new(),
            cursor: 0,
            next_request_id: 0,
            pending: None,
            loaded_at: None,
        }
    }

    pub fn active_page(&self) -> u32 {
        self.active_page
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading { .. })
    }

    pub fn current_page(&self) -> Option<&ArtworkPage> {
        self.current.as_ref()
    }

    /// Total page count as last reported by the API
    pub fn total_pages(&self) -> Option<u32> {
        self.current.as_ref().map(|p| p.pagination.total_pages)
    }

    pub fn rows(&self) -> &[Artwork] {
        self.current.as_ref().map_or(&[], |p| p.data.as_slice())
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn loaded_at(&self) -> Option<DateTime<Local>> {
        self.loaded_at
    }

    /// Page buttons to draw
    pub fn visible_pages(&self) -> Vec<u32> {
        self.window.visible(self.total_pages().unwrap_or(u32::MAX))
    }

    fn known_total(&self) -> u32 {
        self.total_pages().unwrap_or(u32::MAX)
    }

    /// Request for the active page, used on start-up
    pub fn initial_request(&mut self) -> PageRequest {
        self.issue(self.active_page)
    }

    /// A page-number button was clicked
    pub fn click_page(&mut self, page: u32) -> Option<PageRequest> {
        let click = self.window.click(page, self.known_total());
        self.navigate(click)
    }

    /// Go to any page, re-basing the window if needed
    pub fn jump_to(&mut self, page: u32) -> Option<PageRequest> {
        let click = self.window.jump(page, self.known_total());
        self.navigate(click)
    }

    pub fn prev_page(&mut self) -> Option<PageRequest> {
        let click = self.window.prev(self.active_page, self.known_total());
        self.navigate(click)
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        let click = self.window.next(self.active_page, self.known_total());
        self.navigate(click)
    }

    fn navigate(&mut self, click: PageClick) -> Option<PageRequest> {
        self.window = click.window;
        let unchanged = click.active == self.active_page;
        self.active_page = click.active;

        let showing_active = self
            .current
            .as_ref()
            .is_some_and(|p| p.pagination.current_page == click.active);
        if unchanged && (showing_active || self.is_loading()) {
            return None;
        }
        Some(self.issue(click.active))
    }

    fn issue(&mut self, page: u32) -> PageRequest {
        self.next_request_id += 1;
        let request = PageRequest {
            id: self.next_request_id,
            page,
        };
        debug!("Requesting page {} (request {})", page, request.id);
        self.pending = Some(request);
        self.status = LoadStatus::Loading { page };
        request
    }

    /// Re-issue the request for the active page after a failure
    pub fn retry(&mut self) -> Option<PageRequest> {
        match self.status {
            LoadStatus::Failed { .. } => Some(self.issue(self.active_page)),
            _ => None,
        }
    }

    /// Install a fetched page; stale responses are dropped.
    ///
    /// The first response is also the first time the page total is known.
    /// If the active page turns out to lie past it, the window is re-placed
    /// at the end and the returned request fetches the last page instead.
    pub fn apply_loaded(&mut self, request_id: u64, page: ArtworkPage) -> LoadOutcome {
        if self.pending.map(|r| r.id) != Some(request_id) {
            debug!("Ignoring stale response for request {}", request_id);
            return LoadOutcome::Stale;
        }
        self.pending = None;
        self.status = LoadStatus::Idle;

        let total = page.pagination.total_pages;
        self.current = Some(page);
        self.loaded_at = Some(Local::now());
        self.cursor = 0;

        if total > 0 && self.active_page > total {
            debug!("Page {} is past the last page {}, moving there", self.active_page, total);
            let placed = self.window.jump(total, total);
            self.window = placed.window;
            self.active_page = placed.active;
            return LoadOutcome::Clamped(self.issue(placed.active));
        }
        LoadOutcome::Shown
    }

    /// Record a failed fetch and return the page that failed; stale
    /// failures are dropped
    pub fn apply_failed(&mut self, request_id: u64, message: String) -> Option<u32> {
        let Some(request) = self.pending.filter(|r| r.id == request_id) else {
            debug!("Ignoring stale failure for request {}", request_id);
            return None;
        };
        self.pending = None;
        self.status = LoadStatus::Failed {
            page: request.page,
            message,
        };
        Some(request.page)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Flip the checkbox of the row under the cursor
    pub fn toggle_current(&mut self) -> Option<bool> {
        let row = self.rows().get(self.cursor)?.clone();
        Some(self.selection.toggle(&row))
    }

    /// Header checkbox state
    pub fn all_selected(&self) -> bool {
        self.selection.covers(self.rows())
    }

    /// Header checkbox: select exactly this page, or clear when it already is
    pub fn toggle_all(&mut self) {
        if self.all_selected() {
            self.selection.clear();
        } else {
            let rows = self.rows().to_vec();
            self.selection.replace_with(rows);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Merge a finished accumulation and show the page it stopped on
    pub fn apply_accumulation(&mut self, accumulation: Accumulation) -> usize {
        let added = self.selection.extend(accumulation.added);

        if let Some(page) = accumulation.last_page {
            let total = page.pagination.total_pages;
            let placed = self.window.jump(page.pagination.current_page, total);
            self.window = placed.window;
            self.active_page = placed.active;
            self.pending = None;
            self.status = LoadStatus::Idle;
            self.current = Some(page);
            self.loaded_at = Some(Local::now());
            self.cursor = 0;
        }
        added
    }
}
