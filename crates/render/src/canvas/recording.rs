use std::collections::HashSet;

use folio_core::Pt;

use super::r#trait::{Canvas, FontSpec, ImageFallback, ImageSpec, RectSpec, TextSpec};
use crate::error::CanvasError;

/// Average glyph advance as a fraction of the font size.
const DEFAULT_ADVANCE_RATIO: f32 = 0.5;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextSpec),
    Rect(RectSpec),
    Image(ImageSpec),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordedPage {
    pub ops: Vec<DrawOp>,
}

impl RecordedPage {
    pub fn texts(&self) -> impl Iterator<Item = &TextSpec> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectSpec> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageSpec> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Image(image) => Some(image),
            _ => None,
        })
    }

    /// Whether some text run on this page contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.text.contains(needle))
    }
}

/// In-memory canvas that records every call, page by page.
///
/// Text is measured with a fixed advance per character, which keeps layouts
/// reproducible without font files. Images resolve unless registered as
/// missing, in which case the image's fallback is recorded instead.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    pages: Vec<RecordedPage>,
    advance_ratio: f32,
    missing_assets: HashSet<String>,
    fail_at_page: Option<usize>,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            pages: vec![RecordedPage::default()],
            advance_ratio: DEFAULT_ADVANCE_RATIO,
            missing_assets: HashSet::new(),
            fail_at_page: None,
        }
    }

    pub fn with_advance_ratio(mut self, ratio: f32) -> Self {
        self.advance_ratio = ratio;
        self
    }

    /// Treat `assets` as unloadable.
    pub fn with_missing_assets<I, S>(mut self, assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_assets.extend(assets.into_iter().map(Into::into));
        self
    }

    /// Make the call that would open page `page` fail with a backend error.
    pub fn failing_at_page(mut self, page: usize) -> Self {
        self.fail_at_page = Some(page);
        self
    }

    pub fn pages(&self) -> &[RecordedPage] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page `number` (1-based).
    pub fn page(&self, number: usize) -> Option<&RecordedPage> {
        number.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    /// Every text run of the document, in drawing order.
    pub fn all_texts(&self) -> impl Iterator<Item = &TextSpec> {
        self.pages.iter().flat_map(RecordedPage::texts)
    }

    fn current(&mut self) -> &mut RecordedPage {
        if self.pages.is_empty() {
            self.pages.push(RecordedPage::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl Canvas for RecordingCanvas {
    fn place_text(&mut self, text: &TextSpec) -> Result<(), CanvasError> {
        self.current().ops.push(DrawOp::Text(text.clone()));
        Ok(())
    }

    fn place_rect(&mut self, rect: &RectSpec) -> Result<(), CanvasError> {
        self.current().ops.push(DrawOp::Rect(*rect));
        Ok(())
    }

    fn place_image(&mut self, image: &ImageSpec) -> Result<(), CanvasError> {
        if !self.missing_assets.contains(&image.asset) {
            self.current().ops.push(DrawOp::Image(image.clone()));
            return Ok(());
        }

        match image.fallback {
            ImageFallback::Fill(color) => {
                let rect = RectSpec::filled(image.x, image.y, image.width, image.height, color);
                self.current().ops.push(DrawOp::Rect(rect));
            }
            ImageFallback::Skip => {}
        }
        Ok(())
    }

    fn measure_text_width(&self, text: &str, font: &FontSpec) -> Pt {
        text.chars().count() as Pt * font.size * self.advance_ratio
    }

    fn start_new_page(&mut self) -> Result<(), CanvasError> {
        let next = self.pages.len() + 1;
        if self.fail_at_page == Some(next) {
            return Err(CanvasError::backend(format!("cannot open page {next}")));
        }
        self.pages.push(RecordedPage::default());
        Ok(())
    }
}
