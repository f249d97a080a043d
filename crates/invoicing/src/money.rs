//! Presentation formatting for money and quantities.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to cents, half away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Two decimals with comma thousands grouping: `156180` -> `"156,180.00"`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_cents(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let mut plain = rounded.abs();
    plain.rescale(2);
    let text = plain.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}.{frac_part}")
    } else {
        format!("{grouped}.{frac_part}")
    }
}

/// Quantity without trailing zeros: `2.00` -> `"2"`, `1.50` -> `"1.5"`.
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}
