//! Token coercion into typed values
//!
//! This module converts trimmed text tokens into [`Value`]s according to a
//! field's declared [`ValueType`]. Every function is pure; a failed parse
//! returns [`Error::TypeCoercion`] naming the token and the target type.

use crate::config::TimestampLayout;
use crate::models::Value;
use crate::schema::ValueType;
use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Coerce a token into the declared value type
pub fn coerce(token: &str, value_type: ValueType, layout: &TimestampLayout) -> Result<Value> {
    match value_type {
        ValueType::String => Ok(Value::String(token.to_string())),
        ValueType::Integer => parse_integer(token).map(Value::Integer),
        ValueType::Float => parse_float(token).map(Value::Float),
        ValueType::Timestamp => parse_timestamp(token, layout).map(Value::Timestamp),
    }
}

/// Parse a signed 64-bit integer
///
/// Accepts an optional sign followed by decimal digits, or by a `0x`, `0o`
/// or `0b` prefixed hexadecimal, octal or binary literal.
pub fn parse_integer(token: &str) -> Result<i64> {
    let invalid = || Error::type_coercion(token, ValueType::Integer);

    let (negative, unsigned) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let (radix, digits) = split_radix_prefix(unsigned);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(invalid());
    }

    // Parse with the sign attached so i64::MIN stays in range
    let result = if negative {
        i64::from_str_radix(&format!("-{}", digits), radix)
    } else {
        i64::from_str_radix(digits, radix)
    };

    result.map_err(|_| invalid())
}

fn split_radix_prefix(unsigned: &str) -> (u32, &str) {
    let bytes = unsigned.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' {
        match bytes[1] {
            b'x' | b'X' => return (16, &unsigned[2..]),
            b'o' | b'O' => return (8, &unsigned[2..]),
            b'b' | b'B' => return (2, &unsigned[2..]),
            _ => {}
        }
    }
    (10, unsigned)
}

/// Parse a decimal floating-point literal
pub fn parse_float(token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| Error::type_coercion(token, ValueType::Float))
}

/// Parse a timestamp against the configured layout
///
/// Patterns without an offset are read as UTC, and date-only patterns as
/// midnight UTC.
pub fn parse_timestamp(token: &str, layout: &TimestampLayout) -> Result<DateTime<FixedOffset>> {
    let parsed = match layout {
        TimestampLayout::Rfc3339 => DateTime::parse_from_rfc3339(token).ok(),
        TimestampLayout::Rfc2822 => DateTime::parse_from_rfc2822(token).ok(),
        TimestampLayout::Pattern(pattern) => {
            if let Ok(dt) = DateTime::parse_from_str(token, pattern) {
                Some(dt)
            } else if let Ok(naive_dt) = NaiveDateTime::parse_from_str(token, pattern) {
                Some(naive_utc(naive_dt))
            } else if let Ok(date) = NaiveDate::parse_from_str(token, pattern) {
                Some(naive_utc(date.and_time(NaiveTime::MIN)))
            } else {
                None
            }
        }
    };

    parsed.ok_or_else(|| Error::type_coercion(token, ValueType::Timestamp))
}

fn naive_utc(naive_dt: NaiveDateTime) -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_naive_utc_and_offset(naive_dt, Utc).fixed_offset()
}
