//! Test utilities for decoder testing
//!
//! This module provides record types and input helpers shared across the
//! decoder test modules.

use chrono::{DateTime, FixedOffset};

use crate::impl_record;
use crate::schema::{FieldDeclaration, Record};

mod field_parser_tests;
mod stats_tests;

/// Two-column record used by most decoding tests
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i64,
}

impl_record!(Person {
    name: String => "name",
    age: i64 => "age",
});

/// Record covering every value type, with one column defaulting to its field name
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub station: String,
    pub reading: f64,
    pub count: i32,
    pub taken_at: DateTime<FixedOffset>,
}

impl_record!(Measurement {
    station: String => "station_id",
    reading: f64,
    count: i32 => "n",
    taken_at: DateTime<FixedOffset> => "time",
});

/// Hand-written record whose declarations are out of declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct Reversed {
    pub first: String,
    pub second: i64,
}

impl Record for Reversed {
    fn declarations() -> Vec<FieldDeclaration> {
        vec![
            FieldDeclaration::new("b", 1, crate::ValueType::Integer),
            FieldDeclaration::new("a", 0, crate::ValueType::String),
        ]
    }

    fn from_values(values: &mut crate::FieldValues) -> crate::Result<Self> {
        Ok(Self {
            first: values.take_next()?,
            second: values.take_next()?,
        })
    }
}

/// Record that declares the same column twice
#[derive(Debug)]
pub struct DuplicateColumns {
    pub left: String,
    pub right: String,
}

impl_record!(DuplicateColumns {
    left: String => "value",
    right: String => "value",
});

/// Header plus data lines joined with newlines
pub fn csv_input(lines: &[&str]) -> String {
    let mut input = lines.join("\n");
    input.push('\n');
    input
}

/// Split a `&str` line with the default delimiter
pub fn split(line: &str) -> Vec<String> {
    super::line_splitter::split_line(line.as_bytes(), b',')
        .unwrap()
        .into_inner()
}
