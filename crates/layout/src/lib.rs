//! Page layout for tabular documents.
//!
//! - [`PageGeometry`] / [`TableGeometry`]: validated, immutable configuration.
//! - [`PageFlowCursor`]: vertical writing position on the current page.
//! - [`paginate`]: splits an item list into [`PageBlock`]s, repeating the table
//!   header on every continuation page.
//!
//! Nothing here draws. The output is a plan that a canvas-driving caller walks
//! in order, starting a new page before every block that is not the first.

pub mod cursor;
pub mod geometry;
pub mod paginator;

pub use cursor::{PageBreak, PageFlowCursor};
pub use geometry::{PageGeometry, TableGeometry};
pub use paginator::{PageBlock, RowStripe, paginate};
