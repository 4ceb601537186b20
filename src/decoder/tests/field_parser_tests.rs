//! Tests for token coercion

use chrono::{FixedOffset, TimeZone};

use crate::config::TimestampLayout;
use crate::decoder::field_parsers::{coerce, parse_float, parse_integer, parse_timestamp};
use crate::models::Value;
use crate::schema::ValueType;
use crate::Error;

#[test]
fn test_integer_coercion() {
    assert_eq!(parse_integer("42").unwrap(), 42);
    assert_eq!(parse_integer("-17").unwrap(), -17);
    assert_eq!(parse_integer("+8").unwrap(), 8);
    assert_eq!(parse_integer("007").unwrap(), 7);
    assert_eq!(parse_integer("9223372036854775807").unwrap(), i64::MAX);
    assert_eq!(parse_integer("-9223372036854775808").unwrap(), i64::MIN);
}

#[test]
fn test_integer_base_prefixes() {
    assert_eq!(parse_integer("0x1F").unwrap(), 31);
    assert_eq!(parse_integer("-0x10").unwrap(), -16);
    assert_eq!(parse_integer("0o17").unwrap(), 15);
    assert_eq!(parse_integer("0B101").unwrap(), 5);
}

#[test]
fn test_integer_failures() {
    for token in ["abc", "", "1.5", "0x", "--1", "+-1", "0x-1", "1_000", "9223372036854775808", "12abc"] {
        match parse_integer(token) {
            Err(Error::TypeCoercion { token: t, target_type }) => {
                assert_eq!(t, token);
                assert_eq!(target_type, ValueType::Integer);
            }
            other => panic!("expected failure for {:?}, got {:?}", token, other),
        }
    }
}

#[test]
fn test_integer_error_message() {
    let err = parse_integer("abc").unwrap_err();
    assert_eq!(err.to_string(), "Cannot parse 'abc' as integer");
}

#[test]
fn test_float_coercion() {
    assert_eq!(parse_float("3.25").unwrap(), 3.25);
    assert_eq!(parse_float("-0.5").unwrap(), -0.5);
    assert_eq!(parse_float("1e3").unwrap(), 1000.0);
    assert_eq!(parse_float("7").unwrap(), 7.0);

    assert!(matches!(
        parse_float("1,5"),
        Err(Error::TypeCoercion { target_type: ValueType::Float, .. })
    ));
    assert!(parse_float("").is_err());
}

#[test]
fn test_rfc3339_timestamp() {
    let parsed = parse_timestamp("2024-03-01T09:30:00+02:00", &TimestampLayout::Rfc3339).unwrap();
    let expected = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
        .unwrap();
    assert_eq!(parsed, expected);

    let zulu = parse_timestamp("2024-03-01T07:30:00Z", &TimestampLayout::Rfc3339).unwrap();
    assert_eq!(zulu, expected);
}

#[test]
fn test_rfc2822_timestamp() {
    let parsed =
        parse_timestamp("Fri, 01 Mar 2024 09:30:00 +0000", &TimestampLayout::Rfc2822).unwrap();
    assert_eq!(parsed.to_rfc3339(), "2024-03-01T09:30:00+00:00");
}

#[test]
fn test_pattern_timestamp_with_and_without_offset() {
    let with_offset = TimestampLayout::Pattern("%Y-%m-%d %H:%M:%S %z".to_string());
    let parsed = parse_timestamp("2023-01-01 09:00:00 +0100", &with_offset).unwrap();
    assert_eq!(parsed.offset().local_minus_utc(), 3600);

    let naive = TimestampLayout::Pattern("%Y-%m-%d %H:%M:%S".to_string());
    let parsed = parse_timestamp("2023-01-01 09:00:00", &naive).unwrap();
    assert_eq!(parsed.offset().local_minus_utc(), 0);
    assert_eq!(parsed.to_rfc3339(), "2023-01-01T09:00:00+00:00");
}

#[test]
fn test_date_only_pattern_is_midnight_utc() {
    let date_only = TimestampLayout::Pattern("%Y-%m-%d".to_string());
    let parsed = parse_timestamp("2024-03-01", &date_only).unwrap();
    assert_eq!(parsed.to_rfc3339(), "2024-03-01T00:00:00+00:00");

    assert!(matches!(
        parse_timestamp("2024-03-01 10:00", &date_only),
        Err(Error::TypeCoercion { target_type: ValueType::Timestamp, .. })
    ));
}

#[test]
fn test_timestamp_mismatch() {
    match parse_timestamp("01/03/2024", &TimestampLayout::Rfc3339) {
        Err(Error::TypeCoercion { token, target_type }) => {
            assert_eq!(token, "01/03/2024");
            assert_eq!(target_type, ValueType::Timestamp);
        }
        other => panic!("expected TypeCoercion, got {:?}", other),
    }
}

#[test]
fn test_coerce_dispatch() {
    let layout = TimestampLayout::default();

    assert_eq!(
        coerce("He said \"hi\"", ValueType::String, &layout).unwrap(),
        Value::String("He said \"hi\"".to_string())
    );
    assert_eq!(coerce("", ValueType::String, &layout).unwrap(), Value::String(String::new()));
    assert_eq!(coerce("42", ValueType::Integer, &layout).unwrap(), Value::Integer(42));
    assert_eq!(coerce("2.5", ValueType::Float, &layout).unwrap(), Value::Float(2.5));
    assert_eq!(
        coerce("2024-03-01T00:00:00Z", ValueType::Timestamp, &layout)
            .unwrap()
            .value_type(),
        ValueType::Timestamp
    );
}
