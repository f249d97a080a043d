//! Drawing surface boundary.
//!
//! The composer only talks to [`Canvas`]. Encoding pages (PDF or otherwise),
//! loading fonts and decoding images belong to the backend behind it.

pub mod recording;
pub mod r#trait;

pub use recording::{DrawOp, RecordedPage, RecordingCanvas};
pub use r#trait::{
    Canvas, Color, FontSpec, ImageFallback, ImageSpec, RectSpec, Stroke, TextAlign, TextSpec,
};
