//! `folio-core`: shared building blocks for document layout.
//!
//! This crate contains **pure** primitives (no drawing, no IO): the error model,
//! the value object marker and the length units every other crate measures in.

pub mod error;
pub mod units;
pub mod value_object;

pub use error::{LayoutError, LayoutResult};
pub use units::{EPSILON, Pt, approx_le, mm};
pub use value_object::ValueObject;
