// src/utils/token_conversion.rs
use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, Zero};
use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::paths::utils::deserialization_helpers::number_to_string;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("{op}: invalid amount {amount:?}")]
    InvalidAmount { op: &'static str, amount: String },

    #[error("{op}: {reason}")]
    ArithmeticFailure { op: &'static str, reason: String },
}

/// Non-negative integer amount in a token's smallest unit (`human * 10^decimals`).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BaseUnitAmount(BigInt);

impl BaseUnitAmount {
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<u64> for BaseUnitAmount {
    fn from(value: u64) -> Self {
        Self(BigInt::from(value))
    }
}

impl FromStr for BaseUnitAmount {
    type Err = AmountError;

    /// Accepts plain decimal digits only; no sign, no fraction.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AmountError::InvalidAmount {
            op: "BaseUnitAmount::from_str",
            amount: s.to_string(),
        };
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        BigInt::from_str(s).map(Self).map_err(|_| invalid())
    }
}

impl Add for BaseUnitAmount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl fmt::Display for BaseUnitAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for BaseUnitAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BaseUnitAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = number_to_string(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Display options for [`format_balance`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    pub symbol: Option<String>,
    pub precision: Option<u32>,
    pub commify: bool,
}

impl FormatOptions {
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn commified(mut self) -> Self {
        self.commify = true;
        self
    }
}

/// Anything [`format_balance`] can read as a number.
pub trait ToBalanceDecimal {
    fn to_balance_decimal(&self) -> Option<BigDecimal>;
}

impl ToBalanceDecimal for str {
    fn to_balance_decimal(&self) -> Option<BigDecimal> {
        BigDecimal::from_str(self).ok()
    }
}

impl ToBalanceDecimal for String {
    fn to_balance_decimal(&self) -> Option<BigDecimal> {
        self.as_str().to_balance_decimal()
    }
}

impl ToBalanceDecimal for BigDecimal {
    fn to_balance_decimal(&self) -> Option<BigDecimal> {
        Some(self.clone())
    }
}

impl ToBalanceDecimal for BigInt {
    fn to_balance_decimal(&self) -> Option<BigDecimal> {
        Some(BigDecimal::new(self.clone(), 0))
    }
}

impl ToBalanceDecimal for BaseUnitAmount {
    fn to_balance_decimal(&self) -> Option<BigDecimal> {
        self.0.to_balance_decimal()
    }
}

/// Splits `"12.34"` into `("12", "34")`. Either side may be empty, not both.
fn split_decimal(amount: &str) -> Option<(&str, &str)> {
    let (integer, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let empty = integer.is_empty() && fraction.is_empty();
    if empty || !all_digits(integer) || !all_digits(fraction) {
        return None;
    }
    Some((integer, fraction))
}

fn ten_pow(exponent: u32) -> BigDecimal {
    BigDecimal::new(BigInt::from(1), -i64::from(exponent))
}

/// Decimal string (e.g. `"1.5"`) → base units, dropping fractional digits past `decimals`.
pub fn parse_units(amount: &str, decimals: u32) -> Result<BaseUnitAmount, AmountError> {
    const OP: &str = "parse_units";
    let invalid = || AmountError::InvalidAmount {
        op: OP,
        amount: amount.to_string(),
    };

    let (integer, fraction) = split_decimal(amount).ok_or_else(invalid)?;
    let integer = if integer.is_empty() { "0" } else { integer };
    let kept = &fraction[..fraction.len().min(decimals as usize)];
    let truncated = if kept.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, kept)
    };

    let parsed = BigDecimal::from_str(&truncated).map_err(|_| invalid())?;
    let scaled = parsed * ten_pow(decimals);
    if !scaled.is_integer() {
        return Err(AmountError::ArithmeticFailure {
            op: OP,
            reason: format!("{} scaled by 10^{} is not an integer", truncated, decimals),
        });
    }

    let (digits, _) = scaled.with_scale(0).into_bigint_and_exponent();
    Ok(BaseUnitAmount(digits))
}

/// `floor(log10(value))` for a positive decimal, computed from its digits and scale.
fn floor_log10(value: &BigDecimal) -> i64 {
    let (digits, scale) = value.as_bigint_and_exponent();
    let digit_count = digits.magnitude().to_string().len() as i64;
    digit_count - 1 - scale
}

fn truncate_fraction(amount: &str, digits: usize) -> &str {
    match amount.find('.') {
        None => amount,
        Some(point) if digits == 0 => &amount[..point],
        Some(point) => &amount[..(point + 1 + digits).min(amount.len())],
    }
}

fn commify(amount: &str) -> String {
    let (integer, fraction) = match amount.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (amount, None),
    };

    let mut grouped = String::with_capacity(amount.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Base units → display string.
///
/// Non-positive and unparsable amounts render as `"0"`. Without an explicit
/// precision, the number of fractional digits is `2 - floor(log10(value))`,
/// so small values keep more digits than large ones. Precision is clamped to
/// `[0, decimals]` and excess digits are truncated, never rounded.
pub fn format_balance<A>(amount: &A, decimals: u32, options: &FormatOptions) -> String
where
    A: ToBalanceDecimal + ?Sized,
{
    let value = match amount.to_balance_decimal() {
        Some(value) => value,
        None => {
            debug!("format_balance: amount is not a number, rendering 0");
            return "0".to_string();
        }
    };
    if value.cmp(&BigDecimal::zero()) != Ordering::Greater {
        return "0".to_string();
    }

    let (digits, scale) = value.into_bigint_and_exponent();
    let human = BigDecimal::new(digits, scale + i64::from(decimals)).normalized();

    let truncate_at = options
        .precision
        .map(i64::from)
        .unwrap_or_else(|| 2 - floor_log10(&human))
        .clamp(0, i64::from(decimals)) as usize;

    let plain = human.to_plain_string();
    let truncated = truncate_fraction(&plain, truncate_at);
    let body = if options.commify {
        commify(truncated)
    } else {
        truncated.to_string()
    };

    match options.symbol.as_deref() {
        Some(symbol) if !symbol.is_empty() => format!("{} {}", body, symbol),
        _ => body,
    }
}

/// Sums two base-unit strings of the same token. Any invalid operand yields `"0"`.
pub fn add_token_balances(amount1: &str, amount2: &str) -> String {
    match (parse_units(amount1, 0), parse_units(amount2, 0)) {
        (Ok(a), Ok(b)) => (a + b).to_string(),
        (a, b) => {
            debug!(
                "add_token_balances: falling back to 0 ({:?}, {:?})",
                a.err(),
                b.err()
            );
            "0".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_decimal_accepts_bare_point_sides() {
        assert_eq!(split_decimal("12.5"), Some(("12", "5")));
        assert_eq!(split_decimal(".5"), Some(("", "5")));
        assert_eq!(split_decimal("5."), Some(("5", "")));
        assert_eq!(split_decimal("."), None);
        assert_eq!(split_decimal("1.2.3"), None);
        assert_eq!(split_decimal("-1"), None);
        assert_eq!(split_decimal("1e5"), None);
    }

    #[test]
    fn floor_log10_is_exact_at_powers_of_ten() {
        assert_eq!(floor_log10(&BigDecimal::from_str("1000").unwrap()), 3);
        assert_eq!(floor_log10(&BigDecimal::from_str("999.99").unwrap()), 2);
        assert_eq!(floor_log10(&BigDecimal::from_str("1").unwrap()), 0);
        assert_eq!(floor_log10(&BigDecimal::from_str("0.01").unwrap()), -2);
        assert_eq!(floor_log10(&BigDecimal::from_str("0.0099").unwrap()), -3);
        assert_eq!(floor_log10(&BigDecimal::from_str("5000").unwrap().normalized()), 3);
    }

    #[test]
    fn truncate_fraction_drops_point_at_zero() {
        assert_eq!(truncate_fraction("12.345", 0), "12");
        assert_eq!(truncate_fraction("12.345", 2), "12.34");
        assert_eq!(truncate_fraction("12.3", 5), "12.3");
        assert_eq!(truncate_fraction("12", 3), "12");
    }

    #[test]
    fn commify_groups_integer_part_only() {
        assert_eq!(commify("1"), "1");
        assert_eq!(commify("123"), "123");
        assert_eq!(commify("1234"), "1,234");
        assert_eq!(commify("1234567.123456"), "1,234,567.123456");
        assert_eq!(commify("123456"), "123,456");
    }
}
