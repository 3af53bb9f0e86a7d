//! Responsive pagination.

use std::ops::RangeInclusive;

/// Viewport width (px) from which pages hold 20 rows.
pub const WIDE_BREAKPOINT_PX: u32 = 1536;
/// Viewport width (px) from which pages hold 15 rows.
pub const MEDIUM_BREAKPOINT_PX: u32 = 1280;

/// Rows per page for a viewport width in pixels.
pub fn items_per_page_for_width(width_px: u32) -> usize {
    if width_px >= WIDE_BREAKPOINT_PX {
        20
    } else if width_px >= MEDIUM_BREAKPOINT_PX {
        15
    } else {
        10
    }
}

/// Number of pages needed for `len` rows. Zero rows still make one page.
pub fn total_pages(len: usize, items_per_page: usize) -> usize {
    let per_page = items_per_page.max(1);
    len.div_ceil(per_page).max(1)
}

/// The rows shown on `page` (1-based). Out-of-range pages are empty.
pub fn visible_slice<T>(rows: &[T], page: usize, items_per_page: usize) -> &[T] {
    let per_page = items_per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(per_page).min(rows.len());
    let end = start.saturating_add(per_page).min(rows.len());
    &rows[start..end]
}

/// Current page and page size of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current_page: usize,
    items_per_page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    /// Create a pager on page 1 with the narrow page size.
    pub fn new() -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page_for_width(0),
        }
    }

    /// The current 1-based page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Rows per page.
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Recompute the page size after a resize.
    ///
    /// Returns true if the page size changed, in which case the pager is
    /// back on page 1.
    pub fn set_viewport_width(&mut self, width_px: u32) -> bool {
        let per_page = items_per_page_for_width(width_px);
        if per_page == self.items_per_page {
            return false;
        }
        self.items_per_page = per_page;
        self.current_page = 1;
        true
    }

    /// Go back to page 1.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Number of pages for `len` rows.
    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.items_per_page)
    }

    /// Page numbers to offer, always the full range.
    pub fn page_numbers(&self, len: usize) -> RangeInclusive<usize> {
        1..=self.total_pages(len)
    }

    /// Rows on the current page.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        visible_slice(rows, self.current_page, self.items_per_page)
    }

    /// Offset of the current page's first row.
    pub fn offset(&self) -> usize {
        (self.current_page - 1) * self.items_per_page
    }

    /// Jump to a page, clamped to `1..=total_pages`.
    pub fn go_to(&mut self, page: usize, len: usize) {
        self.current_page = page.clamp(1, self.total_pages(len));
    }

    /// Advance one page. Returns false on the last page.
    pub fn next_page(&mut self, len: usize) -> bool {
        if self.current_page < self.total_pages(len) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns false on page 1.
    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Pull the current page back into range after the row count shrank.
    pub fn clamp(&mut self, len: usize) {
        self.current_page = self.current_page.clamp(1, self.total_pages(len));
    }
}
