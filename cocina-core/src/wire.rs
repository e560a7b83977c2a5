//! Numbers as the web client sends them.
//!
//! The front end is inconsistent: the same field arrives as `4`, `4.0` or `"4"`
//! depending on the form it came from, so numeric fields are read through
//! [`WireNumber`] and converted here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest headcount a menu line accepts (five decimal digits).
pub const MAX_MENU_PEOPLE: i64 = 99_999;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum WireNumber {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl WireNumber {
    /// Integral value. Decimals are accepted only when they have no fractional part.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            WireNumber::Integer(n) => Some(*n),
            WireNumber::Decimal(x) => {
                (x.is_finite() && x.fract() == 0.0 && x.abs() < i64::MAX as f64)
                    .then_some(*x as i64)
            }
            WireNumber::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_decimal(&self) -> Option<f64> {
        let value = match self {
            WireNumber::Integer(n) => *n as f64,
            WireNumber::Decimal(x) => *x,
            WireNumber::Text(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for WireNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireNumber::Integer(n) => write!(f, "{}", n),
            WireNumber::Decimal(x) => write!(f, "{}", x),
            WireNumber::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for WireNumber {
    fn from(value: i64) -> Self {
        WireNumber::Integer(value)
    }
}

impl From<f64> for WireNumber {
    fn from(value: f64) -> Self {
        WireNumber::Decimal(value)
    }
}

impl From<&str> for WireNumber {
    fn from(value: &str) -> Self {
        WireNumber::Text(value.to_string())
    }
}

/// Identifier of a stored record.
pub fn parse_id(value: &WireNumber) -> Option<i32> {
    value.as_integer().and_then(|n| i32::try_from(n).ok())
}

/// Headcount for a menu line: positive, at most five digits.
pub fn parse_menu_people(value: &WireNumber) -> Option<u32> {
    value
        .as_integer()
        .filter(|n| (1..=MAX_MENU_PEOPLE).contains(n))
        .map(|n| n as u32)
}

/// Headcount for a purchase report: any positive integer that fits in `u32`.
pub fn parse_report_people(value: &WireNumber) -> Option<u32> {
    value
        .as_integer()
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok())
}

/// Non-negative decimal such as a cost or a quantity.
pub fn parse_non_negative(value: &WireNumber) -> Option<f64> {
    value.as_decimal().filter(|x| *x >= 0.0)
}
