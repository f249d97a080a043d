//! Document composition on top of the layout engine.
//!
//! [`DocumentComposer`] turns a [`DocumentRequest`] into drawing calls on a
//! [`Canvas`]: repeated page chrome, the page-1 heading, the paginated item
//! table, then totals, amount in words and signatures. The same chrome backs
//! the blank letterhead and the completion report form. Page encoding stays
//! behind the `Canvas` trait; [`RecordingCanvas`] keeps the calls in memory.

pub mod canvas;
pub mod company;
pub mod composer;
pub mod document;
pub mod error;
pub mod report;
pub mod theme;

pub use canvas::{
    Canvas, Color, DrawOp, FontSpec, ImageFallback, ImageSpec, RecordedPage, RecordingCanvas,
    RectSpec, Stroke, TextAlign, TextSpec,
};
pub use company::CompanyProfile;
pub use composer::{CONTINUED_MARKER, ComposedDocument, DocumentComposer, fit_text};
pub use document::{CellContent, ClientInfo, Column, ColumnWidth, DocumentKind, DocumentRequest};
pub use error::{CanvasError, RenderError, RenderResult};
pub use report::{CompletionReport, REPORT_TITLE, ReceptionOutcome};
pub use theme::{FontSet, FontStyle, Palette, PageTheme, ThemeAssets};
