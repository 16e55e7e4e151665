//! Amount type for handling Rupiah values that may arrive as numbers or as formatted text.
//!
//! Form fields and spreadsheet cells often carry amounts like `Rp 1.500.000` or `1,500,000.00`.
//! `Amount` strips the currency symbol and the grouping separators and keeps the numeric value.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use std::str::FromStr;

const SYMBOL: &str = "Rp";

/// Represents an amount of money in Rupiah.
///
/// # Examples
///
/// Parsing currency-formatted text:
/// ```
/// # use hospital_finance::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("Rp 1.500.000").unwrap();
/// assert_eq!(amount.to_string(), "Rp1.500.000");
/// ```
///
/// Parsing with comma grouping and decimals:
/// ```
/// # use hospital_finance::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("-1,250.50").unwrap();
/// assert_eq!(amount.to_string(), "-Rp1.250,50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// The amount as plain digits with a `.` decimal point, e.g. `1500000` or `-1250.5`.
    pub fn plain(&self) -> String {
        self.0.normalize().to_string()
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(String);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        // Remove the currency symbol, e.g. "Rp", "Rp.", "IDR"
        let rest = strip_symbol(rest);
        let digits = normalize_separators(rest)
            .ok_or_else(|| AmountError(format!("Invalid amount '{s}'")))?;

        let value = Decimal::from_str(&digits).map_err(|e| AmountError(format!("{e} '{s}'")))?;
        Ok(Amount(if negative { -value } else { value }))
    }
}

fn strip_symbol(s: &str) -> &str {
    let lower = s.to_ascii_lowercase();
    let rest = if lower.starts_with("idr") {
        &s[3..]
    } else if lower.starts_with("rp") {
        &s[2..]
    } else {
        s
    };
    rest.trim_start_matches('.').trim()
}

/// Turns grouped digits into a string `Decimal` can parse.
///
/// When both `.` and `,` are present, the one that comes last is the decimal separator. When only
/// one kind is present, it is a grouping separator if it repeats or if exactly three digits follow
/// it, otherwise it is the decimal separator.
fn normalize_separators(s: &str) -> Option<String> {
    let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }
    let last_dot = s.rfind('.');
    let last_comma = s.rfind(',');
    let decimal = match (last_dot, last_comma) {
        (Some(d), Some(c)) => Some(if d > c { '.' } else { ',' }),
        (Some(_), None) => single_kind_decimal(&s, '.'),
        (None, Some(_)) => single_kind_decimal(&s, ','),
        (None, None) => None,
    };
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match (c, decimal) {
            ('.' | ',', Some(d)) if c == d => out.push('.'),
            ('.' | ',', _) => {}
            _ => out.push(c),
        }
    }
    Some(out)
}

fn single_kind_decimal(s: &str, sep: char) -> Option<char> {
    if s.matches(sep).count() > 1 {
        return None;
    }
    let after = s.rsplit(sep).next().unwrap_or_default();
    if after.len() == 3 {
        None
    } else {
        Some(sep)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.abs();
        let pattern_out = if abs.fract().is_zero() {
            format_num::format_num!(",.0f", abs.to_f64().unwrap_or_default())
        } else {
            format_num::format_num!(",.2f", abs.to_f64().unwrap_or_default())
        };
        // Indonesian grouping: swap the separators.
        let grouped: String = pattern_out
            .chars()
            .map(|c| match c {
                ',' => '.',
                '.' => ',',
                other => other,
            })
            .collect();
        write!(f, "{sign}{SYMBOL}{grouped}")
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // The backend stores plain numbers.
        if self.0.fract().is_zero() {
            if let Some(i) = self.0.to_i64() {
                return serializer.serialize_i64(i);
            }
        }
        serializer.serialize_f64(self.0.to_f64().unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a currency-formatted string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Decimal::try_from(v)
            .map(Amount)
            .map_err(|e| E::custom(format!("invalid amount {v}: {e}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::from_str(v).map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::ZERO)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(Decimal::from(value))
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount(Decimal::from(value))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl Mul<Decimal> for Amount {
    type Output = Amount;

    fn mul(self, rhs: Decimal) -> Amount {
        Amount(self.0 * rhs)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}
