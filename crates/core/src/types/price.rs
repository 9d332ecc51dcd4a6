//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are `rust_decimal::Decimal` values in the currency's standard unit
//! (euros, not cents). Catalogue and snapshot loaders round incoming amounts
//! to the currency's minor units with [`CurrencyCode::round`], so nothing past
//! that boundary ever sees a float.
//!
//! Display formatting (symbol, digit grouping, decimal separator) lives here
//! as well; the cart itself only deals in raw amounts.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown currency code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported currency code: {0}")]
pub struct CurrencyError(pub String);

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., euros, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display (e.g., "€1,234.50" or "$12.990").
    #[must_use]
    pub fn display(&self) -> String {
        let currency = self.currency_code;
        let rounded = currency.round(self.amount);
        let digits = format!("{:.*}", currency.minor_units() as usize, rounded.abs());

        let (whole, fraction) = digits
            .split_once('.')
            .map_or((digits.as_str(), None), |(w, f)| (w, Some(f)));

        let mut out = String::new();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(currency.symbol());
        out.push_str(&group_thousands(whole, currency.group_separator()));
        if let Some(fraction) = fraction {
            out.push(currency.decimal_separator());
            out.push_str(fraction);
        }
        out
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes supported by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    USD,
    GBP,
    CLP,
}

impl CurrencyCode {
    /// Display symbol placed before the amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::EUR => "€",
            Self::USD | Self::CLP => "$",
            Self::GBP => "£",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EUR => "EUR",
            Self::USD => "USD",
            Self::GBP => "GBP",
            Self::CLP => "CLP",
        }
    }

    /// Number of digits after the decimal point.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Self::EUR | Self::USD | Self::GBP => 2,
            Self::CLP => 0,
        }
    }

    const fn group_separator(self) -> char {
        match self {
            Self::EUR | Self::USD | Self::GBP => ',',
            Self::CLP => '.',
        }
    }

    const fn decimal_separator(self) -> char {
        match self {
            Self::EUR | Self::USD | Self::GBP => '.',
            Self::CLP => ',',
        }
    }

    /// Round an amount to this currency's minor units (half away from zero).
    #[must_use]
    pub fn round(self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.minor_units(), RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Self::EUR),
            "USD" => Ok(Self::USD),
            "GBP" => Ok(Self::GBP),
            "CLP" => Ok(Self::CLP),
            _ => Err(CurrencyError(s.to_string())),
        }
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
