//! Streaming CSV decoder for typed records
//!
//! This module turns a line-oriented byte source into records of a
//! statically declared type. A session reads the header once, binds each
//! declared field to a header column, and then coerces every data row.
//!
//! ## Architecture
//!
//! The decoder is organized into logical components:
//! - [`parser`] - Session orchestration, line sources and sinks
//! - [`line_splitter`] - Quote-aware splitting of one raw line into fields
//! - [`header`] - Header line column names
//! - [`column_mapping`] - Header column to record field binding
//! - [`record_parser`] - Coercion of one data row
//! - [`field_parsers`] - Coercion of single tokens into typed values
//! - [`stats`] - Session statistics
//!
//! ## Usage
//!
//! ```rust
//! use typed_csv::{Decoder, DecoderConfig, impl_record};
//!
//! struct Reading {
//!     station: String,
//!     celsius: f64,
//! }
//!
//! impl_record!(Reading {
//!     station: String => "station",
//!     celsius: f64 => "temp",
//! });
//!
//! # fn main() -> typed_csv::Result<()> {
//! let decoder = Decoder::new(DecoderConfig::default().with_delimiter(b';'))?;
//! let input = "temp;station\n12.5;north\n-3.0;south\n";
//!
//! let mut records = decoder.records::<Reading, _>(input.as_bytes())?;
//! let first = records.next().unwrap()?;
//! assert_eq!(first.station, "north");
//! assert_eq!(first.celsius, 12.5);
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod header;
pub mod line_splitter;
pub mod parser;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::{ColumnMapping, MappingEntry};
pub use header::HeaderRow;
pub use parser::{Decoder, LineSource, RecordSink, Records, Rows};
pub use stats::DecodeStats;
