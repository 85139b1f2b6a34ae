//! Currency table, display formatting, and lenient amount parsing.
//!
//! Currency is a display label only — there is no rate conversion. The
//! fixed set matches the form's dropdown: EUR, USD, GBP, CHF.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Invoice display currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "CHF")]
    Chf,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Chf => "CHF",
        }
    }

    /// Parse from an ISO 4217 code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "EUR" => Some(Self::Eur),
            "USD" => Some(Self::Usd),
            "GBP" => Some(Self::Gbp),
            "CHF" => Some(Self::Chf),
            _ => None,
        }
    }

    /// Display symbol appended after the amount.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eur => "€",
            Self::Usd => "$",
            Self::Gbp => "£",
            Self::Chf => "CHF",
        }
    }

    /// French unit words: (major unit, minor singular, minor plural).
    /// The major unit pluralizes with a regular "s".
    pub fn unit_words(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Eur => ("euro", "centime", "centimes"),
            Self::Usd => ("dollar", "cent", "cents"),
            Self::Gbp => ("livre", "penny", "pence"),
            Self::Chf => ("franc", "centime", "centimes"),
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::Eur
    }
}

/// Format an amount for display: half-up to two decimals, comma as the
/// decimal separator, symbol suffix ("1234,56 €").
pub fn format_amount(amount: Decimal, currency: Currency) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2} {}", currency.symbol()).replace('.', ",")
}

/// Parse a raw numeric form field, coercing anything unparsable to zero.
///
/// Accepts either "," or "." as the decimal separator. This is the only
/// tolerance the engine's input boundary needs: missing or malformed
/// fields become zero-amount contributions, never errors.
pub fn parse_amount(raw: &str) -> Decimal {
    Decimal::from_str(&raw.trim().replace(',', ".")).unwrap_or(Decimal::ZERO)
}
