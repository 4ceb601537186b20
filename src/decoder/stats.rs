//! Decode session statistics

use serde::{Deserialize, Serialize};

/// Counters for one decode session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeStats {
    /// Lines read from the source, header included
    pub lines_read: usize,

    /// Records handed to the caller
    pub records_decoded: usize,

    /// Empty data lines skipped (only when blank lines are skipped)
    pub blank_lines_skipped: usize,
}

impl DecodeStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Data lines read, header excluded
    pub fn data_lines(&self) -> usize {
        self.lines_read.saturating_sub(1)
    }

    /// Share of data lines that became records, as a percentage
    pub fn success_rate(&self) -> f64 {
        let considered = self.data_lines() - self.blank_lines_skipped.min(self.data_lines());
        if considered == 0 {
            0.0
        } else {
            (self.records_decoded as f64 / considered as f64) * 100.0
        }
    }
}
