//! Decoder configuration and validation.
//!
//! Provides the per-decoder settings (delimiter, timestamp layout, blank line
//! policy). A configuration is fixed when the decoder is built and stays
//! immutable for every session it runs.

use crate::constants::{DEFAULT_DELIMITER, FORBIDDEN_DELIMITERS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Textual layout used to coerce timestamp fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampLayout {
    /// RFC 3339 internet date-time, e.g. `2024-03-01T09:30:00Z`
    #[default]
    Rfc3339,
    /// RFC 2822 date-time, e.g. `Fri, 01 Mar 2024 09:30:00 +0000`
    Rfc2822,
    /// strftime-style pattern; patterns without an offset are read as UTC
    Pattern(String),
}

/// Main configuration for a decoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Single-byte field delimiter
    pub delimiter: u8,

    /// Layout applied to every timestamp field
    pub timestamp_layout: TimestampLayout,

    /// Skip empty data lines instead of rejecting them as width mismatches
    pub skip_blank_lines: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            timestamp_layout: TimestampLayout::default(),
            skip_blank_lines: false,
        }
    }
}

impl DecoderConfig {
    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the timestamp layout
    pub fn with_timestamp_layout(mut self, layout: TimestampLayout) -> Self {
        self.timestamp_layout = layout;
        self
    }

    /// Use a strftime pattern as the timestamp layout
    pub fn with_timestamp_pattern(self, pattern: impl Into<String>) -> Self {
        self.with_timestamp_layout(TimestampLayout::Pattern(pattern.into()))
    }

    /// Skip empty data lines
    pub fn with_skip_blank_lines(mut self) -> Self {
        self.skip_blank_lines = true;
        self
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            return Err(Error::configuration(format!(
                "Delimiter must be an ASCII byte, got 0x{:02x}",
                self.delimiter
            )));
        }

        if FORBIDDEN_DELIMITERS.contains(&self.delimiter) {
            return Err(Error::configuration(format!(
                "Delimiter {:?} is reserved",
                self.delimiter as char
            )));
        }

        if let TimestampLayout::Pattern(pattern) = &self.timestamp_layout {
            if pattern.trim().is_empty() {
                return Err(Error::configuration("Timestamp pattern must not be empty"));
            }
        }

        debug!(
            "Decoder configuration validated: delimiter={:?}, timestamp_layout={:?}",
            self.delimiter as char, self.timestamp_layout
        );
        Ok(())
    }
}
