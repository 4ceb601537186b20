//! Column mapping between header positions and record fields
//!
//! Built once per decode session from the header line. Resolution is
//! all-or-nothing: every declared column must appear in the header.

use super::header::HeaderRow;
use crate::schema::{FieldDeclaration, ValueType};
use crate::{Error, Result};

/// One resolved field binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// Position of the field within the record
    pub field_index: usize,

    /// Position of the feeding column within each row
    pub column_index: usize,

    /// Declared column name, kept for diagnostics
    pub column_name: String,

    /// Declared type of the field
    pub value_type: ValueType,
}

/// Resolved column-to-field binding for one decode session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: Vec<MappingEntry>,
    expected_width: usize,
}

impl ColumnMapping {
    /// Resolve declarations against header columns
    ///
    /// Declarations are processed in order and bind to the first header
    /// column with an exact, case-sensitive name match.
    pub fn resolve(declarations: &[FieldDeclaration], header: &HeaderRow) -> Result<Self> {
        let mut entries = Vec::with_capacity(declarations.len());

        for declaration in declarations {
            let column_index = header
                .position_of(&declaration.column_name)
                .ok_or_else(|| Error::unresolved_column(&declaration.column_name))?;

            entries.push(MappingEntry {
                field_index: declaration.field_index,
                column_index,
                column_name: declaration.column_name.clone(),
                value_type: declaration.value_type,
            });
        }

        Ok(ColumnMapping {
            entries,
            expected_width: header.width(),
        })
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Column count every data row must match
    pub fn expected_width(&self) -> usize {
        self.expected_width
    }

    /// Column index bound to a field, if any
    pub fn column_for_field(&self, field_index: usize) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.field_index == field_index)
            .map(|entry| entry.column_index)
    }

    /// Number of fields, total header columns, and header columns left unused
    pub fn stats(&self) -> (usize, usize, usize) {
        (
            self.entries.len(),
            self.expected_width,
            self.expected_width.saturating_sub(self.entries.len()),
        )
    }
}
