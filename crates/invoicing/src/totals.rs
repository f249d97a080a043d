use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_core::ValueObject;

use crate::line::LineItem;
use crate::money::round_cents;
use crate::tax::TaxPolicy;

/// Financial summary of a document.
///
/// Values keep full decimal precision; use [`Totals::rounded`] (or
/// [`crate::format_amount`]) for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Total HT.
    pub subtotal: Decimal,
    /// TVA amount; zero when the policy is not applicable.
    pub tax_amount: Decimal,
    /// Total TTC.
    pub grand_total: Decimal,
}

impl ValueObject for Totals {}

impl Totals {
    /// Same totals rounded to cents for presentation.
    pub fn rounded(&self) -> Totals {
        Totals {
            subtotal: round_cents(self.subtotal),
            tax_amount: round_cents(self.tax_amount),
            grand_total: round_cents(self.grand_total),
        }
    }
}

/// Sum the line totals and apply the tax policy.
///
/// Total over its domain: an empty list yields all-zero totals. Each line is
/// capped at [`crate::MAX_LINE_TOTAL`] and the rate at 1, so sums stay exact
/// for any list below 3.9 × 10^13 rows; past that the arithmetic saturates
/// instead of panicking.
pub fn compute_totals(items: &[LineItem], tax: &TaxPolicy) -> Totals {
    let subtotal = items
        .iter()
        .map(LineItem::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let tax_amount = if tax.is_applicable() {
        subtotal.saturating_mul(tax.rate())
    } else {
        Decimal::ZERO
    };
    let grand_total = subtotal.saturating_add(tax_amount);

    tracing::debug!(
        items = items.len(),
        %subtotal,
        %tax_amount,
        %grand_total,
        "computed document totals"
    );

    Totals {
        subtotal,
        tax_amount,
        grand_total,
    }
}
