//! Monetary amounts and the lenient parsing used for cart line totals.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use crate::numbers::{MICROS_PER_CENT, major_to_micros, micros_to_cents, micros_to_major};

static LEADING_DECIMAL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^-?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)").ok());

/// An amount of money in millionths of the major unit.
///
/// Sums stay exact at sub-cent precision; rounding to cents happens only
/// when the amount is rendered.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    micros: i64,
}

impl Money {
    pub const ZERO: Self = Self { micros: 0 };

    #[must_use]
    pub const fn from_micros(micros: i64) -> Self {
        Self { micros }
    }

    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self::from_micros(cents.saturating_mul(MICROS_PER_CENT))
    }

    /// Build an amount from a major-unit value (dollars).
    #[must_use]
    pub fn from_major(value: f64) -> Self {
        Self::from_micros(major_to_micros(value))
    }

    #[must_use]
    pub const fn micros(self) -> i64 {
        self.micros
    }

    /// Whole cents, rounded half away from zero.
    #[must_use]
    pub fn cents(self) -> i64 {
        micros_to_cents(self.micros)
    }

    #[must_use]
    pub fn to_major(self) -> f64 {
        micros_to_major(self.micros)
    }

    /// Two-decimal rendering without a currency symbol, e.g. `1234.56`.
    #[must_use]
    pub fn amount_text(self) -> String {
        let cents = self.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        let whole = abs / 100;
        let frac = abs % 100;
        format!("{sign}{whole}.{frac:02}")
    }

    /// Symbol-prefixed rendering, e.g. `$1234.56`.
    #[must_use]
    pub fn currency_text(self, symbol: &str) -> String {
        format!("{symbol}{}", self.amount_text())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.amount_text())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_micros(self.micros.saturating_add(rhs.micros))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_micros(self.micros.saturating_sub(rhs.micros))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Parse a line-total value leniently.
///
/// Every character other than digits, `.` and `-` is dropped, then the longest
/// leading decimal number is read. Anything unreadable is zero.
#[must_use]
pub fn parse_amount(raw: &str) -> Money {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();
    let Some(pattern) = LEADING_DECIMAL.as_ref() else {
        return Money::ZERO;
    };
    pattern
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map_or(Money::ZERO, Money::from_major)
}

/// Reads the first `<symbol><digits>` amount out of displayed text.
///
/// Thousands separators are stripped, so `"Total: $1,234.56"` yields `"1234.56"`.
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    pattern: Regex,
}

impl AmountExtractor {
    /// # Errors
    ///
    /// Returns an error if the pattern built around `symbol` fails to compile.
    pub fn for_symbol(symbol: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(r"{}([0-9,.]+)", regex::escape(symbol)))?;
        Ok(Self { pattern })
    }

    #[must_use]
    pub fn extract(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        Some(caps.get(1)?.as_str().replace(',', ""))
    }
}
