//! Invoicing domain values: line items, tax policy and totals.
//!
//! Pure deterministic logic (no IO, no drawing). All money is exact
//! [`rust_decimal::Decimal`]; rounding to cents only happens when formatting.

pub mod line;
pub mod money;
pub mod tax;
pub mod totals;

pub use line::{ItemList, LineItem, MAX_LINE_TOTAL};
pub use money::{format_amount, format_quantity, round_cents};
pub use tax::{MOROCCO_VAT_RATES, TaxPolicy};
pub use totals::{Totals, compute_totals};
