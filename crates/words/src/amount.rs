//! Decimal amounts to the legal "somme en lettres" phrase.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::numerals::integer_to_words;

/// Currency and tax-qualifier wording appended to the spelled-out amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyWording {
    /// Major unit, e.g. "Dirhams".
    pub major: String,
    /// Minor unit, e.g. "Cts".
    pub minor: String,
    /// Qualifier for tax-inclusive totals ("TTC").
    pub tax_included: String,
    /// Qualifier for totals without tax ("HT").
    pub tax_excluded: String,
}

impl CurrencyWording {
    pub fn dirham() -> Self {
        Self {
            major: "Dirhams".to_string(),
            minor: "Cts".to_string(),
            tax_included: "TTC".to_string(),
            tax_excluded: "HT".to_string(),
        }
    }
}

impl Default for CurrencyWording {
    fn default() -> Self {
        Self::dirham()
    }
}

/// Spell out `amount` followed by the currency and a two-digit cents fragment.
///
/// The amount is rounded to cents first; the cents fragment is always present
/// ("; 00 Cts" for whole amounts).
///
/// ```
/// use folio_words::amount_to_words;
/// use rust_decimal::Decimal;
///
/// let amount = Decimal::new(156_180_50, 2);
/// assert_eq!(
///     amount_to_words(amount, "Dirhams", "Cts"),
///     "Cent cinquante-six mille cent quatre-vingts Dirhams ; 50 Cts"
/// );
/// ```
pub fn amount_to_words(amount: Decimal, currency_major: &str, currency_minor: &str) -> String {
    let (units, cents) = split_cents(amount);
    let words = capitalize(&integer_to_words(units));
    format!("{words} {currency_major} ; {cents:02} {currency_minor}")
}

/// [`amount_to_words`] plus the tax qualifier: "TTC" when tax applies to the
/// amount, "HT" otherwise.
pub fn legal_phrase(amount: Decimal, wording: &CurrencyWording, tax_applicable: bool) -> String {
    let qualifier = if tax_applicable {
        &wording.tax_included
    } else {
        &wording.tax_excluded
    };
    format!(
        "{} {qualifier}",
        amount_to_words(amount, &wording.major, &wording.minor)
    )
}

fn split_cents(amount: Decimal) -> (u128, u32) {
    if amount.is_sign_negative() && !amount.is_zero() {
        tracing::warn!(%amount, "negative amount spelled out by its absolute value");
    }

    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let whole = rounded.trunc();
    let cents = ((rounded - whole) * Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or_default();
    // The integer part of a decimal is below 2^96, so it always fits.
    let units = whole.to_u128().unwrap_or_default();

    (units, cents)
}

fn capitalize(words: &str) -> String {
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn whole_amount_carries_zero_cents() {
        assert_eq!(
            amount_to_words(dec!(360.00), "Dirhams", "Cts"),
            "Trois cent soixante Dirhams ; 00 Cts"
        );
    }

    #[test]
    fn cents_reflect_the_fractional_remainder() {
        assert_eq!(
            amount_to_words(dec!(1001.07), "Dirhams", "Cts"),
            "Mille un Dirhams ; 07 Cts"
        );
        assert_eq!(
            amount_to_words(dec!(80.5), "Euros", "cents"),
            "Quatre-vingts Euros ; 50 cents"
        );
    }

    #[test]
    fn sub_cent_precision_rounds_before_splitting() {
        assert_eq!(
            amount_to_words(dec!(99.995), "Dirhams", "Cts"),
            "Cent Dirhams ; 00 Cts"
        );
        assert_eq!(
            amount_to_words(dec!(12.344), "Dirhams", "Cts"),
            "Douze Dirhams ; 34 Cts"
        );
    }

    #[test]
    fn zero_is_capitalized_with_its_accent() {
        assert_eq!(
            amount_to_words(Decimal::ZERO, "Dirhams", "Cts"),
            "Zéro Dirhams ; 00 Cts"
        );
    }

    #[test]
    fn legal_phrase_appends_tax_qualifier() {
        let wording = CurrencyWording::dirham();
        assert_eq!(
            legal_phrase(dec!(360), &wording, true),
            "Trois cent soixante Dirhams ; 00 Cts TTC"
        );
        assert_eq!(
            legal_phrase(dec!(300), &wording, false),
            "Trois cents Dirhams ; 00 Cts HT"
        );
    }

    #[test]
    fn negative_amounts_are_spelled_by_magnitude() {
        assert_eq!(
            amount_to_words(dec!(-21.10), "Dirhams", "Cts"),
            "Vingt et un Dirhams ; 10 Cts"
        );
    }

    #[test]
    fn invoice_sample_total() {
        // 15-line sample invoice: 130 150.00 HT + 20% TVA.
        assert_eq!(
            legal_phrase(dec!(156180.00), &CurrencyWording::default(), true),
            "Cent cinquante-six mille cent quatre-vingts Dirhams ; 00 Cts TTC"
        );
    }

    #[test]
    fn amounts_beyond_u64_are_spelled_in_full() {
        assert_eq!(
            amount_to_words(dec!(20000000000000000000.25), "Dirhams", "Cts"),
            "Vingt milliards milliards Dirhams ; 25 Cts"
        );
        let largest = amount_to_words(Decimal::MAX, "Dirhams", "Cts");
        assert!(largest.starts_with("Soixante-dix-neuf milliards"));
        assert!(largest.ends_with("trois cent trente-cinq Dirhams ; 00 Cts"));
    }
}
