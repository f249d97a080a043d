use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_core::{LayoutError, LayoutResult, ValueObject};

/// Standard Moroccan VAT (TVA) rates, in percent.
pub const MOROCCO_VAT_RATES: [u32; 5] = [0, 7, 10, 14, 20];

/// Tax applied on top of the subtotal (HT) to get the grand total (TTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTaxPolicy", into = "RawTaxPolicy")]
pub struct TaxPolicy {
    rate: Decimal,
    applicable: bool,
}

impl ValueObject for TaxPolicy {}

impl TaxPolicy {
    /// `rate` is a fraction in `[0, 1]` (0.20 for 20%).
    pub fn new(rate: Decimal, applicable: bool) -> LayoutResult<Self> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(LayoutError::validation(format!(
                "tax rate must be within [0, 1] (got {rate})"
            )));
        }
        Ok(Self { rate, applicable })
    }

    pub fn from_percent(percent: u32) -> LayoutResult<Self> {
        Self::new(Decimal::from(percent) / Decimal::ONE_HUNDRED, true)
    }

    /// 20% TVA, the general rate.
    pub fn standard() -> Self {
        Self {
            rate: Decimal::new(20, 2),
            applicable: true,
        }
    }

    /// No tax line ("TVA non applicable").
    pub fn exempt() -> Self {
        Self {
            rate: Decimal::ZERO,
            applicable: false,
        }
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn is_applicable(&self) -> bool {
        self.applicable
    }

    /// Whether the rate is one of [`MOROCCO_VAT_RATES`].
    pub fn is_standard_rate(&self) -> bool {
        MOROCCO_VAT_RATES
            .iter()
            .any(|p| Decimal::from(*p) / Decimal::ONE_HUNDRED == self.rate)
    }

    /// Rate as a percentage label for the tax line, e.g. `"20%"` or `"5.5%"`.
    pub fn percent_label(&self) -> String {
        format!("{}%", (self.rate * Decimal::ONE_HUNDRED).normalize())
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawTaxPolicy {
    rate: Decimal,
    applicable: bool,
}

impl TryFrom<RawTaxPolicy> for TaxPolicy {
    type Error = LayoutError;

    fn try_from(raw: RawTaxPolicy) -> Result<Self, Self::Error> {
        TaxPolicy::new(raw.rate, raw.applicable)
    }
}

impl From<TaxPolicy> for RawTaxPolicy {
    fn from(policy: TaxPolicy) -> Self {
        Self {
            rate: policy.rate,
            applicable: policy.applicable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rate_outside_unit_interval_is_rejected() {
        assert!(TaxPolicy::new(dec!(-0.01), true).is_err());
        assert!(TaxPolicy::new(dec!(1.01), true).is_err());
        assert!(TaxPolicy::new(dec!(1), true).is_ok());
        assert!(TaxPolicy::new(dec!(0), false).is_ok());
    }

    #[test]
    fn percent_constructor_matches_fraction() {
        assert_eq!(TaxPolicy::from_percent(20).unwrap(), TaxPolicy::standard());
        assert_eq!(TaxPolicy::from_percent(14).unwrap().rate(), dec!(0.14));
        assert!(TaxPolicy::from_percent(120).is_err());
    }

    #[test]
    fn standard_rates_are_recognized() {
        for percent in MOROCCO_VAT_RATES {
            assert!(TaxPolicy::from_percent(percent).unwrap().is_standard_rate());
        }
        assert!(!TaxPolicy::new(dec!(0.055), true).unwrap().is_standard_rate());
    }

    #[test]
    fn percent_label_has_no_trailing_zeros() {
        assert_eq!(TaxPolicy::standard().percent_label(), "20%");
        assert_eq!(TaxPolicy::new(dec!(0.055), true).unwrap().percent_label(), "5.5%");
        assert_eq!(TaxPolicy::exempt().percent_label(), "0%");
    }
}
