//! Vertical flow position within the current page.

use folio_core::{EPSILON, LayoutError, LayoutResult, Pt};

use crate::geometry::PageGeometry;

/// Notice returned by [`PageFlowCursor::new_page`]. The document composer
/// answers it by drawing the repeated page chrome (header, footer, watermark).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a page break must be answered by starting a page on the canvas"]
pub struct PageBreak {
    /// 1-based number of the page that just started.
    pub page_number: u32,
}

/// Tracks how much vertical space is left on the current page.
///
/// One cursor per document. It only ever moves down a page or onto a fresh
/// page, and never below the content bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFlowCursor {
    full_height: Pt,
    remaining: Pt,
    content_bottom: Pt,
    page_number: u32,
}

impl PageFlowCursor {
    /// Cursor at the top of page 1's content region.
    pub fn new(page: &PageGeometry) -> Self {
        Self {
            full_height: page.content_height(),
            remaining: page.content_height(),
            content_bottom: page.content_bottom(),
            page_number: 1,
        }
    }

    /// Cursor on page 1 with only `remaining` points left (the top of the page
    /// is already taken by title, client box, reference fields...).
    pub fn starting_at(page: &PageGeometry, remaining: Pt) -> LayoutResult<Self> {
        let full_height = page.content_height();
        if !remaining.is_finite() || remaining < 0.0 || remaining > full_height + EPSILON {
            return Err(LayoutError::contract(format!(
                "starting height {remaining}pt is outside the page content region (0..={full_height}pt)"
            )));
        }

        Ok(Self {
            full_height,
            remaining: remaining.min(full_height),
            content_bottom: page.content_bottom(),
            page_number: 1,
        })
    }

    pub fn remaining_height(&self) -> Pt {
        self.remaining
    }

    /// Usable height of a fresh page.
    pub fn full_height(&self) -> Pt {
        self.full_height
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Current writing position (y of the next free line, PDF coordinates).
    pub fn y(&self) -> Pt {
        self.content_bottom + self.remaining
    }

    /// Whether `height` still fits on this page.
    pub fn fits(&self, height: Pt) -> bool {
        height <= self.remaining + EPSILON
    }

    /// Take `height` points from the current page.
    ///
    /// Rejected (and the cursor left untouched) when the page does not have
    /// that much room: content emitted past the footer cannot be taken back.
    pub fn consume(&mut self, height: Pt) -> LayoutResult<()> {
        if !height.is_finite() || height < 0.0 {
            return Err(LayoutError::contract(format!(
                "cannot consume {height}pt: height must be a non-negative length"
            )));
        }
        if !self.fits(height) {
            return Err(LayoutError::contract(format!(
                "cannot consume {height}pt on page {}: only {}pt remain",
                self.page_number, self.remaining
            )));
        }

        self.remaining = (self.remaining - height).max(0.0);
        Ok(())
    }

    /// Move to a fresh page with its full content height available.
    pub fn new_page(&mut self) -> PageBreak {
        self.page_number += 1;
        self.remaining = self.full_height;
        tracing::debug!(page = self.page_number, "page break");
        PageBreak {
            page_number: self.page_number,
        }
    }
}
