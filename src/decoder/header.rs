//! Header line parsing
//!
//! The first line of every input names the columns; its width is the
//! expected width of every data row.

use super::line_splitter::{RawRow, split_line};
use crate::{Error, Result};

/// Column names of the header line, in positional order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRow {
    columns: RawRow,
}

impl HeaderRow {
    /// Split a raw header line into column names
    pub fn parse(line: &[u8], delimiter: u8) -> Result<Self> {
        let columns = split_line(line, delimiter).map_err(|source| Error::MalformedLine {
            line_number: 1,
            source,
        })?;
        Ok(Self { columns })
    }

    /// Position of the first column named exactly `name`
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Number of columns every data row must have
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter()
    }
}

impl From<RawRow> for HeaderRow {
    fn from(columns: RawRow) -> Self {
        Self { columns }
    }
}
