//! Sliding window of page-number buttons.
//!
//! The window is a run of `size` consecutive page numbers. It only moves
//! when navigation lands on one of its edge buttons, and then by exactly one
//! position, unless that edge is already the absolute first or last page.

use std::ops::RangeInclusive;

/// Number of page buttons shown by default
pub const DEFAULT_WINDOW_SIZE: u32 = 10;

/// Widest window the pagination bar will lay out
pub const MAX_WINDOW_SIZE: u32 = 50;

/// Consecutive page numbers currently offered as buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    first: u32,
    size: u32,
}

/// Result of a navigation: the page to display and the window to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageClick {
    pub active: u32,
    pub window: PageWindow,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl PageWindow {
    /// Window `[1 ..= size]`
    pub fn new(size: u32) -> Self {
        Self::starting_at(1, size)
    }

    /// Window `[first ..= first + size - 1]`
    pub fn starting_at(first: u32, size: u32) -> Self {
        Self {
            first: first.max(1),
            size: size.max(1),
        }
    }

    pub fn first(&self) -> u32 {
        self.first
    }

    pub fn last(&self) -> u32 {
        self.first + self.size - 1
    }

    pub fn pages(&self) -> RangeInclusive<u32> {
        self.first..=self.last()
    }

    pub fn contains(&self, page: u32) -> bool {
        self.pages().contains(&page)
    }

    /// Buttons that point at pages which actually exist
    pub fn visible(&self, total_pages: u32) -> Vec<u32> {
        self.pages().take_while(|&p| p <= total_pages).collect()
    }

    fn shifted_left(self) -> Self {
        Self::starting_at(self.first - 1, self.size)
    }

    fn shifted_right(self) -> Self {
        Self::starting_at(self.first + 1, self.size)
    }

    /// Handle a click on page `clicked`.
    ///
    /// The requested page is clamped to `[1, total_pages]` first, so Prev on
    /// the first page and Next on the last page are no-ops. Both edge checks
    /// run against the window as it was before the click.
    pub fn click(self, clicked: u32, total_pages: u32) -> PageClick {
        let active = clicked.clamp(1, total_pages.max(1));
        let mut window = self;

        if active == self.first() && self.first() != 1 {
            window = window.shifted_left();
        }

        if active == self.last() && self.last() != total_pages {
            window = window.shifted_right();
        }

        PageClick { active, window }
    }

    /// Navigate to an arbitrary page.
    ///
    /// Pages inside the window behave exactly like [`PageWindow::click`].
    /// Anything else re-bases the window so the target is the second button,
    /// leaving room for one Prev without a slide. The window is pulled back
    /// so it never runs past the last page.
    pub fn jump(self, target: u32, total_pages: u32) -> PageClick {
        let active = target.clamp(1, total_pages.max(1));
        if self.contains(active) {
            return self.click(active, total_pages);
        }

        let mut first = active.saturating_sub(1).max(1);
        let last_start = total_pages.saturating_sub(self.size - 1).max(1);
        if first > last_start {
            first = last_start;
        }

        PageClick {
            active,
            window: Self::starting_at(first, self.size),
        }
    }

    /// The Prev button: `active - 1`
    pub fn prev(self, active: u32, total_pages: u32) -> PageClick {
        self.jump(active.saturating_sub(1), total_pages)
    }

    /// The Next button: `active + 1`
    pub fn next(self, active: u32, total_pages: u32) -> PageClick {
        self.jump(active.saturating_add(1), total_pages)
    }
}
