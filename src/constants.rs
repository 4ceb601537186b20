//! Decoder constants
//!
//! Default values and fixed bytes used by the line splitter and the
//! decoder configuration.

// =============================================================================
// Line Splitting
// =============================================================================

/// Default field delimiter
pub const DEFAULT_DELIMITER: u8 = b',';

/// Quote character; not configurable
pub const QUOTE: u8 = b'"';

/// Bytes trimmed from both ends of every field
pub const TRIM_BYTES: &[u8] = b" \t";

/// Bytes that can never be used as a delimiter
pub const FORBIDDEN_DELIMITERS: &[u8] = &[QUOTE, b'\r', b'\n'];

// =============================================================================
// Coercion
// =============================================================================

/// Names accepted for each value type when declarations are registered at runtime
pub mod type_names {
    pub const STRING: &[&str] = &["string", "str", "text"];
    pub const INTEGER: &[&str] = &["integer", "int", "i64"];
    pub const FLOAT: &[&str] = &["float", "f64", "double"];
    pub const TIMESTAMP: &[&str] = &["timestamp", "datetime", "time"];
}
