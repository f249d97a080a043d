use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_core::{LayoutError, LayoutResult, ValueObject};

/// Ordered line items of one document. Row numbering follows this order.
pub type ItemList = Vec<LineItem>;

/// Default unit code when none is given ("unité").
pub const DEFAULT_UNIT: &str = "U";

/// Largest accepted `quantity × unit_price` (10^15).
///
/// Keeps document sums far inside `Decimal` range: overflowing a subtotal
/// would take tens of trillions of rows at this cap.
pub const MAX_LINE_TOTAL: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// One table row: what was sold, in which unit, how many, at what price.
///
/// Immutable once built; the description is never blank, quantity and unit
/// price are never negative and their product stays within [`MAX_LINE_TOTAL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLineItem", into = "RawLineItem")]
pub struct LineItem {
    description: String,
    unit: String,
    quantity: Decimal,
    unit_price: Decimal,
}

impl ValueObject for LineItem {}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        unit: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> LayoutResult<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(LayoutError::validation("line item description must not be blank"));
        }
        if quantity.is_sign_negative() && !quantity.is_zero() {
            return Err(LayoutError::validation(format!(
                "line item quantity must be non-negative (got {quantity})"
            )));
        }
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(LayoutError::validation(format!(
                "line item unit price must be non-negative (got {unit_price})"
            )));
        }

        match quantity.checked_mul(unit_price) {
            Some(total) if total <= MAX_LINE_TOTAL => {}
            _ => {
                return Err(LayoutError::validation(format!(
                    "line total {quantity} x {unit_price} exceeds {MAX_LINE_TOTAL}"
                )));
            }
        }

        let unit = unit.into();
        Ok(Self {
            description,
            unit: if unit.trim().is_empty() {
                DEFAULT_UNIT.to_string()
            } else {
                unit
            },
            quantity,
            unit_price,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// `quantity × unit_price`, unrounded.
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Wire shape of [`LineItem`]; validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawLineItem {
    description: String,
    #[serde(default)]
    unit: String,
    quantity: Decimal,
    unit_price: Decimal,
}

impl TryFrom<RawLineItem> for LineItem {
    type Error = LayoutError;

    fn try_from(raw: RawLineItem) -> Result<Self, Self::Error> {
        LineItem::new(raw.description, raw.unit, raw.quantity, raw.unit_price)
    }
}

impl From<LineItem> for RawLineItem {
    fn from(item: LineItem) -> Self {
        Self {
            description: item.description,
            unit: item.unit,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}
