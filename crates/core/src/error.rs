//! Layout error model.

use thiserror::Error;

/// Result type used across the layout crates.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Layout-level error.
///
/// Every variant is a programming or configuration error: nothing here is
/// transient, so callers surface it instead of retrying.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Page or table geometry cannot hold content (non-positive dimension,
    /// columns not summing to the table width, page too short for a header
    /// and one data row).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A caller broke a usage contract (e.g. consuming more vertical space
    /// than the page has left).
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// A value failed validation (e.g. negative quantity, tax rate above 100%).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl LayoutError {
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    pub fn contract(msg: impl Into<String>) -> Self {
        Self::ContractViolation(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
