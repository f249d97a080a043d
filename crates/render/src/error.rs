//! Rendering error model.

use thiserror::Error;

use folio_core::LayoutError;

/// Result type of document composition.
pub type RenderResult<T> = Result<T, RenderError>;

/// Failure reported by a [`Canvas`](crate::Canvas) backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanvasError {
    /// The backend could not draw (I/O, encoder state...).
    #[error("canvas backend error: {0}")]
    Backend(String),
}

impl CanvasError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Everything that can stop a document from being composed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Canvas(#[from] CanvasError),

    /// Theme or company profile could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RenderError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
