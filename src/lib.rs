//! Typed CSV Decoder Library
//!
//! A Rust library for decoding delimited text rows onto statically declared
//! record types. Each record field declares the column that feeds it, and
//! every token is coerced from text into the field's declared type.
//!
//! This library provides tools for:
//! - Splitting raw lines into fields with quote and escaped-quote handling
//! - Resolving header columns against a record's field declarations once per session
//! - Coercing tokens into strings, integers, floats and timestamps
//! - Streaming decoded records in input order with line/column error context
//!
//! ## Usage
//!
//! ```rust
//! use typed_csv::{Decoder, impl_record};
//!
//! #[derive(Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i64,
//! }
//!
//! impl_record!(Person {
//!     name: String => "name",
//!     age: i64 => "age",
//! });
//!
//! # fn main() -> typed_csv::Result<()> {
//! let input = "name,age\nAlice,30\n\"Bo,b\",25\n";
//! let people: Vec<Person> = Decoder::default().read_all(input.as_bytes())?;
//!
//! assert_eq!(people[1].name, "Bo,b");
//! assert_eq!(people[1].age, 25);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod decoder;
pub mod models;
pub mod schema;

// Re-export commonly used types
pub use config::{DecoderConfig, TimestampLayout};
pub use decoder::line_splitter::{RawRow, SplitError, split_line};
pub use decoder::{ColumnMapping, DecodeStats, Decoder, LineSource, RecordSink, Records, Rows};
pub use models::{FieldValue, FieldValues, Row, Value};
pub use schema::{FieldDeclaration, Record, Schema, SchemaBuilder, ValueType};

/// Result type alias for the decoder
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for a decode session
///
/// Every variant is terminal for the session that produced it.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The destination record type cannot be decoded into
    #[error("Invalid destination type: {reason}")]
    InvalidDestinationType { reason: String },

    /// Input ended before a header line was read
    #[error("Missing header: input ended before the header line")]
    MissingHeader,

    /// A declared column is absent from the header
    #[error("Column '{column_name}' was not found in the header")]
    UnresolvedColumn { column_name: String },

    /// A data row has a different number of fields than the header
    #[error("Line {line_number}: expected {expected} fields, found {actual}")]
    RowWidthMismatch {
        line_number: usize,
        expected: usize,
        actual: usize,
    },

    /// A token could not be converted to its declared type
    #[error("Cannot parse '{token}' as {target_type}")]
    TypeCoercion {
        token: String,
        target_type: ValueType,
    },

    /// A declared field type has no coercion rule
    #[error("Unsupported field type: {value_type}")]
    UnsupportedFieldType { value_type: String },

    /// A field of a data row failed to decode
    ///
    /// `line_number` counts physical lines from 1 with the header as line 1.
    /// `column_position` is the 1-based position of the column in the source
    /// row, not the field's position in the record.
    #[error("Line {line_number} column {column_position} ('{column_name}'): {source}")]
    RowDecode {
        line_number: usize,
        column_position: usize,
        column_name: String,
        #[source]
        source: Box<Error>,
    },

    /// A raw line could not be split into fields
    #[error("Line {line_number}: {source}")]
    MalformedLine {
        line_number: usize,
        #[source]
        source: SplitError,
    },

    /// I/O operation on the line source failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid destination type error
    pub fn invalid_destination(reason: impl Into<String>) -> Self {
        Self::InvalidDestinationType {
            reason: reason.into(),
        }
    }

    /// Create an unresolved column error
    pub fn unresolved_column(column_name: impl Into<String>) -> Self {
        Self::UnresolvedColumn {
            column_name: column_name.into(),
        }
    }

    /// Create a type coercion error
    pub fn type_coercion(token: impl Into<String>, target_type: ValueType) -> Self {
        Self::TypeCoercion {
            token: token.into(),
            target_type,
        }
    }

    /// Create an unsupported field type error
    pub fn unsupported_field_type(value_type: impl Into<String>) -> Self {
        Self::UnsupportedFieldType {
            value_type: value_type.into(),
        }
    }

    /// Wrap a coercion failure with row and column context
    pub fn row_decode(
        line_number: usize,
        column_position: usize,
        column_name: impl Into<String>,
        source: Error,
    ) -> Self {
        Self::RowDecode {
            line_number,
            column_position,
            column_name: column_name.into(),
            source: Box::new(source),
        }
    }

    /// Line number the error points at, for row-level failures
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::RowWidthMismatch { line_number, .. }
            | Self::RowDecode { line_number, .. }
            | Self::MalformedLine { line_number, .. } => Some(*line_number),
            _ => None,
        }
    }
}
