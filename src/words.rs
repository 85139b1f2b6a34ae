//! French amount-in-words conversion.
//!
//! Turns a monetary amount into the phrase printed under the totals block
//! ("Mille deux cent trente-quatre euros et cinquante-six centimes").
//! French counting has its quirks and they are all here: teens named
//! individually, 70 and 90 built from the teens ("soixante-dix",
//! "quatre-vingt-onze"), "et un" after 20–60 but a hyphen after 80,
//! plural "cents" and "quatre-vingts" only when nothing follows, bare
//! "mille", and "un million" in the singular.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::core::Currency;

const UNITS: [&str; 10] = [
    "", "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf",
];
const TEENS: [&str; 10] = [
    "dix", "onze", "douze", "treize", "quatorze", "quinze", "seize", "dix-sept", "dix-huit",
    "dix-neuf",
];
const TENS: [&str; 10] = [
    "",
    "",
    "vingt",
    "trente",
    "quarante",
    "cinquante",
    "soixante",
    "soixante",
    "quatre-vingt",
    "quatre-vingt",
];

/// Convert a monetary amount into French words, using the currency's unit
/// words. The fractional part is rounded half-up to two digits (cents); a
/// carry out of the cents rolls into the integer part. Exactly zero
/// renders as the bare word "Zéro". Negative amounts (an excess deposit
/// producing a credit) are prefixed with "moins".
pub fn to_words(amount: Decimal, currency: Currency) -> String {
    let negative = amount.is_sign_negative();
    let abs = amount.abs();

    let mut integer = abs.trunc().to_u64().unwrap_or(0);
    let mut cents = ((abs - abs.trunc()) * dec!(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0);
    if cents == 100 {
        integer += 1;
        cents = 0;
    }

    if integer == 0 && cents == 0 {
        return capitalize("zéro");
    }

    let (major, minor_one, minor_many) = currency.unit_words();
    let mut words = String::new();
    if negative {
        words.push_str("moins ");
    }

    if integer > 0 {
        words.push_str(&convert_integer(integer));
        words.push(' ');
        words.push_str(major);
        if integer >= 2 {
            words.push('s');
        }
    }

    if cents > 0 {
        if integer > 0 {
            words.push_str(" et ");
        }
        words.push_str(&convert_hundreds(cents));
        words.push(' ');
        words.push_str(if cents >= 2 { minor_many } else { minor_one });
    }

    capitalize(&words)
}

/// Convert a whole number, grouping by milliards, millions, mille, and
/// hundreds. "mille" never takes "un" and never pluralizes; "million" and
/// "milliard" are singular for exactly one.
fn convert_integer(n: u64) -> String {
    let milliards = ((n / 1_000_000_000) % 1_000) as u32;
    let millions = ((n / 1_000_000) % 1_000) as u32;
    let thousands = ((n / 1_000) % 1_000) as u32;
    let hundreds = (n % 1_000) as u32;

    let mut words = String::new();

    if milliards > 0 {
        if milliards == 1 {
            words.push_str("un milliard ");
        } else {
            words.push_str(&convert_hundreds(milliards));
            words.push_str(" milliards ");
        }
    }

    if millions > 0 {
        if millions == 1 {
            words.push_str("un million ");
        } else {
            words.push_str(&convert_hundreds(millions));
            words.push_str(" millions ");
        }
    }

    if thousands > 0 {
        if thousands == 1 {
            words.push_str("mille ");
        } else {
            words.push_str(&convert_hundreds(thousands));
            words.push_str(" mille ");
        }
    }

    if hundreds > 0 {
        words.push_str(&convert_hundreds(hundreds));
    }

    words.trim_end().to_string()
}

/// Convert 1..=999. Returns an empty string for 0.
fn convert_hundreds(n: u32) -> String {
    let mut words = String::new();
    let hundred = n / 100;
    let remainder = n % 100;

    if hundred > 0 {
        if hundred == 1 {
            words.push_str("cent");
        } else {
            words.push_str(UNITS[hundred as usize]);
            words.push_str(" cent");
        }
        // "deux cents" but "deux cent un"
        if remainder == 0 && hundred > 1 {
            words.push('s');
        }
        if remainder > 0 {
            words.push(' ');
        }
    }

    if (10..20).contains(&remainder) {
        words.push_str(TEENS[(remainder - 10) as usize]);
        return words;
    }

    let ten = remainder / 10;
    let unit = remainder % 10;

    if ten == 7 || ten == 9 {
        // 70–79 and 90–99 compound with the teens: soixante-dix,
        // soixante-onze, quatre-vingt-dix, quatre-vingt-onze.
        words.push_str(TENS[ten as usize]);
        words.push('-');
        words.push_str(TEENS[unit as usize]);
    } else if ten > 0 {
        words.push_str(TENS[ten as usize]);
        if ten == 8 && unit == 0 {
            words.push('s'); // quatre-vingts
        }
        if unit > 0 {
            if unit == 1 && ten != 8 {
                words.push_str(" et un"); // vingt et un ... soixante et un
            } else {
                words.push('-'); // quatre-vingt-un, trente-deux
                words.push_str(UNITS[unit as usize]);
            }
        }
    } else if unit > 0 {
        words.push_str(UNITS[unit as usize]);
    }

    words
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
