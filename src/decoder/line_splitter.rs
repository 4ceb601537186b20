//! Field splitting for single raw lines
//!
//! One left-to-right scan with a single "inside quotes" state. Escaped quote
//! pairs are collapsed into a per-field output buffer; the input line is never
//! modified.

use crate::constants::{QUOTE, TRIM_BYTES};
use thiserror::Error;

/// Failure to split a raw line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// The line ended while a quoted field was still open
    #[error("unterminated quoted field starting at byte {position}")]
    UnterminatedQuote { position: usize },

    /// A field's bytes are not valid UTF-8
    #[error("field {field} is not valid UTF-8")]
    InvalidUtf8 { field: usize },
}

/// Trimmed, unquoted tokens of one input line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    fields: Vec<String>,
}

impl RawRow {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.fields
    }
}

impl From<Vec<String>> for RawRow {
    fn from(fields: Vec<String>) -> Self {
        Self { fields }
    }
}

/// Split one raw line into fields
///
/// Delimiters inside double quotes do not split, `""` inside quotes becomes a
/// literal `"`, and every field is trimmed of spaces and tabs before one layer
/// of surrounding quotes is removed. An empty line yields no fields; a line
/// ending in a delimiter yields a trailing empty field.
pub fn split_line(line: &[u8], delimiter: u8) -> Result<RawRow, SplitError> {
    let mut fields = Vec::new();
    if line.is_empty() {
        return Ok(RawRow { fields });
    }

    let mut buffer = Vec::with_capacity(line.len());
    let mut inside_quotes = false;
    let mut quote_opened_at = 0;
    let mut i = 0;

    while i < line.len() {
        let byte = line[i];

        if byte == QUOTE {
            if inside_quotes && line.get(i + 1) == Some(&QUOTE) {
                // Escaped quote: keep one byte of the pair
                buffer.push(QUOTE);
                i += 2;
                continue;
            }
            if !inside_quotes {
                quote_opened_at = i;
            }
            inside_quotes = !inside_quotes;
            buffer.push(QUOTE);
        } else if byte == delimiter && !inside_quotes {
            fields.push(finish_field(&buffer, fields.len())?);
            buffer.clear();
        } else {
            buffer.push(byte);
        }

        i += 1;
    }

    if inside_quotes {
        return Err(SplitError::UnterminatedQuote {
            position: quote_opened_at,
        });
    }

    fields.push(finish_field(&buffer, fields.len())?);
    Ok(RawRow { fields })
}

/// Trim spaces/tabs, then strip one layer of surrounding quotes
fn finish_field(raw: &[u8], field: usize) -> Result<String, SplitError> {
    let trimmed = trim(raw);
    let unquoted = match trimmed {
        [QUOTE, inner @ .., QUOTE] => inner,
        _ => trimmed,
    };

    std::str::from_utf8(unquoted)
        .map(str::to_owned)
        .map_err(|_| SplitError::InvalidUtf8 { field })
}

fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !TRIM_BYTES.contains(b))
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !TRIM_BYTES.contains(b))
        .map_or(start, |p| p + 1);
    &bytes[start..end]
}
