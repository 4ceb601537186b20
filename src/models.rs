//! Typed values produced by coercion.
//!
//! Defines the [`Value`] enum, the [`FieldValue`] conversions from values into
//! concrete Rust field types, and the dynamic [`Row`] produced for explicitly
//! registered schemas.

use crate::schema::ValueType;
use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

/// A coerced field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Timestamp(DateTime<FixedOffset>),
}

impl Value {
    /// Type this value was coerced to
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::Timestamp(_) => ValueType::Timestamp,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::Timestamp(t) => Some(t),
            _ => None,
        }
    }
}

/// Rust field types that can receive a coerced [`Value`]
pub trait FieldValue: Sized {
    /// Declared type for fields of this Rust type
    const VALUE_TYPE: ValueType;

    /// Convert a coerced value into the field type
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatched(expected: ValueType, value: &Value) -> Error {
    Error::invalid_destination(format!(
        "field expects a {} value, found {}",
        expected,
        value.value_type()
    ))
}

impl FieldValue for String {
    const VALUE_TYPE: ValueType = ValueType::String;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(mismatched(Self::VALUE_TYPE, &other)),
        }
    }
}

impl FieldValue for i64 {
    const VALUE_TYPE: ValueType = ValueType::Integer;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Integer(i) => Ok(i),
            other => Err(mismatched(Self::VALUE_TYPE, &other)),
        }
    }
}

// Narrower integer fields: an out-of-range value is a coercion failure.
// Integers are decoded as i64 first, so u64 and usize fields top out at
// i64::MAX.
macro_rules! narrow_integer_field {
    ($($ty:ty),+) => {
        $(
            impl FieldValue for $ty {
                const VALUE_TYPE: ValueType = ValueType::Integer;

                fn from_value(value: Value) -> Result<Self> {
                    let wide = i64::from_value(value)?;
                    <$ty>::try_from(wide)
                        .map_err(|_| Error::type_coercion(wide.to_string(), ValueType::Integer))
                }
            }
        )+
    };
}

narrow_integer_field!(i8, i16, i32, u8, u16, u32, u64, usize);

impl FieldValue for f64 {
    const VALUE_TYPE: ValueType = ValueType::Float;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float(f) => Ok(f),
            other => Err(mismatched(Self::VALUE_TYPE, &other)),
        }
    }
}

impl FieldValue for f32 {
    const VALUE_TYPE: ValueType = ValueType::Float;

    fn from_value(value: Value) -> Result<Self> {
        f64::from_value(value).map(|f| f as f32)
    }
}

impl FieldValue for DateTime<FixedOffset> {
    const VALUE_TYPE: ValueType = ValueType::Timestamp;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Timestamp(t) => Ok(t),
            other => Err(mismatched(Self::VALUE_TYPE, &other)),
        }
    }
}

impl FieldValue for DateTime<Utc> {
    const VALUE_TYPE: ValueType = ValueType::Timestamp;

    fn from_value(value: Value) -> Result<Self> {
        DateTime::<FixedOffset>::from_value(value).map(|t| t.with_timezone(&Utc))
    }
}

/// Wall-clock time as written in the source, offset discarded
impl FieldValue for NaiveDateTime {
    const VALUE_TYPE: ValueType = ValueType::Timestamp;

    fn from_value(value: Value) -> Result<Self> {
        DateTime::<FixedOffset>::from_value(value).map(|t| t.naive_local())
    }
}

/// Source location of one coerced value
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldOrigin {
    pub line_number: usize,
    pub column_position: usize,
    pub column_name: String,
}

/// Coerced values of one row, in field-index order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldValues {
    values: VecDeque<Value>,
    origins: VecDeque<FieldOrigin>,
}

impl FieldValues {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values: values.into(),
            origins: VecDeque::new(),
        }
    }

    pub(crate) fn with_origins(values: Vec<Value>, origins: Vec<FieldOrigin>) -> Self {
        Self {
            values: values.into(),
            origins: origins.into(),
        }
    }

    /// Take the next field's value converted to `T`
    ///
    /// A conversion that fails on the value itself (such as an integer that
    /// overflows a narrower field) is reported with the value's line and column.
    pub fn take_next<T: FieldValue>(&mut self) -> Result<T> {
        let value = self.values.pop_front().ok_or_else(|| {
            Error::invalid_destination("record reads more fields than it declares")
        })?;
        let origin = self.origins.pop_front();

        T::from_value(value).map_err(|e| match (e, origin) {
            (e @ Error::TypeCoercion { .. }, Some(origin)) => Error::row_decode(
                origin.line_number,
                origin.column_position,
                origin.column_name,
                e,
            ),
            (e, _) => e,
        })
    }

    /// Number of values not taken yet
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// Take every remaining value
    pub fn drain(&mut self) -> Vec<Value> {
        self.origins.clear();
        self.values.drain(..).collect()
    }
}

/// A decoded row for an explicitly registered [`Schema`](crate::Schema)
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Value of a declared column
    pub fn get(&self, column_name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column_name)
            .and_then(|index| self.values.get(index))
    }

    /// Value at a field index
    pub fn value(&self, field_index: usize) -> Option<&Value> {
        self.values.get(field_index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_take_next_in_order() {
        let mut values = FieldValues::new(vec![
            Value::String("Alice".to_string()),
            Value::Integer(30),
        ]);

        assert_eq!(values.take_next::<String>().unwrap(), "Alice");
        assert_eq!(values.take_next::<i64>().unwrap(), 30);
        assert_eq!(values.remaining(), 0);
        assert!(matches!(
            values.take_next::<i64>(),
            Err(Error::InvalidDestinationType { .. })
        ));
    }

    #[test]
    fn test_mismatched_value_type() {
        let mut values = FieldValues::new(vec![Value::Float(1.5)]);
        assert!(matches!(
            values.take_next::<String>(),
            Err(Error::InvalidDestinationType { .. })
        ));
    }

    #[test]
    fn test_narrow_integer_overflow() {
        assert_eq!(i32::from_value(Value::Integer(-7)).unwrap(), -7);
        assert_eq!(u8::from_value(Value::Integer(255)).unwrap(), 255);

        match u8::from_value(Value::Integer(256)) {
            Err(Error::TypeCoercion { token, target_type }) => {
                assert_eq!(token, "256");
                assert_eq!(target_type, ValueType::Integer);
            }
            other => panic!("expected TypeCoercion, got {:?}", other),
        }
        assert!(u32::from_value(Value::Integer(-1)).is_err());
    }

    #[test]
    fn test_unsigned_wide_fields_top_out_at_i64_max() {
        assert_eq!(
            u64::from_value(Value::Integer(i64::MAX)).unwrap(),
            i64::MAX as u64
        );
        assert!(u64::from_value(Value::Integer(-1)).is_err());
        assert!(usize::from_value(Value::Integer(-1)).is_err());
    }

    #[test]
    fn test_overflow_reports_origin() {
        let mut values = FieldValues::with_origins(
            vec![Value::Integer(1000)],
            vec![FieldOrigin {
                line_number: 4,
                column_position: 2,
                column_name: "count".to_string(),
            }],
        );

        match values.take_next::<i8>() {
            Err(Error::RowDecode {
                line_number,
                column_position,
                column_name,
                source,
            }) => {
                assert_eq!((line_number, column_position), (4, 2));
                assert_eq!(column_name, "count");
                assert!(matches!(*source, Error::TypeCoercion { .. }));
            }
            other => panic!("expected RowDecode, got {:?}", other),
        }
    }

    #[test]
    fn test_timestamp_conversions() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 3, 1, 11, 30, 0).unwrap();

        let utc = DateTime::<Utc>::from_value(Value::Timestamp(local)).unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());

        let naive = NaiveDateTime::from_value(Value::Timestamp(local)).unwrap();
        assert_eq!(naive.to_string(), "2024-03-01 11:30:00");
    }

    #[test]
    fn test_row_lookup() {
        let columns: Arc<[String]> = vec!["name".to_string(), "age".to_string()].into();
        let row = Row::new(
            columns,
            vec![Value::String("Bob".to_string()), Value::Integer(25)],
        );

        assert_eq!(row.get("age").and_then(Value::as_i64), Some(25));
        assert_eq!(row.get("name").and_then(Value::as_str), Some("Bob"));
        assert_eq!(row.get("email"), None);
        assert_eq!(row.value(0), Some(&Value::String("Bob".to_string())));
    }
}
