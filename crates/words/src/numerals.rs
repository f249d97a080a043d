//! Integer to French words.
//!
//! Units below twenty are irregular, seventy and ninety borrow from sixty and
//! eighty ("soixante-dix", "quatre-vingt-dix"), and the plural marks on "cent"
//! and "vingt" depend on what follows them.

const UNITS: [&str; 20] = [
    "", "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf", "dix", "onze",
    "douze", "treize", "quatorze", "quinze", "seize", "dix-sept", "dix-huit", "dix-neuf",
];

const TENS: [&str; 10] = [
    "",
    "dix",
    "vingt",
    "trente",
    "quarante",
    "cinquante",
    "soixante",
    "soixante",
    "quatre-vingt",
    "quatre-vingt",
];

const THOUSAND: u128 = 1_000;
const MILLION: u128 = 1_000_000;
const MILLIARD: u128 = 1_000_000_000;

/// Spell out `n` in French.
///
/// Groups are converted independently (milliards, millions, thousands, then the
/// 0..=999 remainder) and joined with single spaces, largest first. Counts of
/// a thousand milliards and more are spelled recursively ("mille milliards"),
/// so every `u128`, and with it the integer part of any decimal amount, has a
/// spelling.
///
/// ```
/// use folio_words::integer_to_words;
///
/// assert_eq!(integer_to_words(80), "quatre-vingts");
/// assert_eq!(integer_to_words(1_234_567), "un million deux cent trente-quatre mille cinq cent soixante-sept");
/// ```
pub fn integer_to_words(n: u128) -> String {
    if n == 0 {
        return "zéro".to_string();
    }

    let mut parts: Vec<String> = Vec::with_capacity(4);

    let milliards = n / MILLIARD;
    if milliards > 0 {
        if milliards == 1 {
            parts.push("un milliard".to_string());
        } else {
            // The count can itself exceed 999 for very large values.
            parts.push(format!("{} milliards", integer_to_words(milliards)));
        }
    }

    let millions = ((n % MILLIARD) / MILLION) as u32;
    if millions > 0 {
        if millions == 1 {
            parts.push("un million".to_string());
        } else {
            parts.push(format!("{} millions", below_thousand(millions)));
        }
    }

    let thousands = ((n % MILLION) / THOUSAND) as u32;
    if thousands > 0 {
        if thousands == 1 {
            parts.push("mille".to_string());
        } else {
            parts.push(format!("{} mille", below_thousand(thousands)));
        }
    }

    let rest = (n % THOUSAND) as u32;
    if rest > 0 {
        parts.push(below_thousand(rest));
    }

    parts.join(" ")
}

/// 1..=999. Returns an empty string for zero.
fn below_thousand(n: u32) -> String {
    debug_assert!(n < 1_000);
    if n < 100 {
        return below_hundred(n);
    }

    let hundreds = n / 100;
    let rest = n % 100;
    let prefix = if hundreds == 1 {
        "cent".to_string()
    } else {
        format!("{} cent", UNITS[hundreds as usize])
    };

    match (rest, hundreds > 1) {
        (0, true) => format!("{prefix}s"),
        (0, false) => prefix,
        _ => format!("{prefix} {}", below_hundred(rest)),
    }
}

/// 0..=99. Returns an empty string for zero.
fn below_hundred(n: u32) -> String {
    debug_assert!(n < 100);
    if n < 20 {
        return UNITS[n as usize].to_string();
    }

    let mut tens = n / 10;
    let mut unit = n % 10;
    if tens == 7 || tens == 9 {
        tens -= 1;
        unit += 10;
    }

    if unit == 0 {
        return if tens == 8 {
            "quatre-vingts".to_string()
        } else {
            TENS[tens as usize].to_string()
        };
    }

    // "et" for 21, 31, .., 61 and 71; never after quatre-vingt.
    if (unit == 1 || unit == 11) && tens != 8 {
        return format!("{} et {}", TENS[tens as usize], UNITS[unit as usize]);
    }

    format!("{}-{}", TENS[tens as usize], UNITS[unit as usize])
}
