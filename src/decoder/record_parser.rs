//! Per-row coercion
//!
//! Turns one width-checked [`RawRow`] into the coerced values of every mapped
//! field. Nothing is handed to the record builder until the whole row has
//! coerced, so a failing row leaves no partial record behind.

use tracing::trace;

use super::column_mapping::ColumnMapping;
use super::field_parsers::coerce;
use super::line_splitter::RawRow;
use crate::config::TimestampLayout;
use crate::models::{FieldOrigin, FieldValues, Value};
use crate::{Error, Result};

/// Coerce every mapped token of a row into field-index order
pub fn coerce_row(
    row: &RawRow,
    mapping: &ColumnMapping,
    layout: &TimestampLayout,
    line_number: usize,
) -> Result<FieldValues> {
    let mut slots: Vec<Option<(Value, FieldOrigin)>> = vec![None; mapping.entries().len()];

    for entry in mapping.entries() {
        let token = row.get(entry.column_index).ok_or(Error::RowWidthMismatch {
            line_number,
            expected: mapping.expected_width(),
            actual: row.len(),
        })?;

        let value = coerce(token, entry.value_type, layout).map_err(|cause| {
            Error::row_decode(line_number, entry.column_index + 1, &entry.column_name, cause)
        })?;

        trace!(
            "Line {}: column '{}' -> field {} = {:?}",
            line_number, entry.column_name, entry.field_index, value
        );
        let slot = slots.get_mut(entry.field_index).ok_or_else(|| {
            Error::invalid_destination(format!("field index {} is out of range", entry.field_index))
        })?;
        *slot = Some((
            value,
            FieldOrigin {
                line_number,
                column_position: entry.column_index + 1,
                column_name: entry.column_name.clone(),
            },
        ));
    }

    let mut values = Vec::with_capacity(slots.len());
    let mut origins = Vec::with_capacity(slots.len());
    for (field_index, slot) in slots.into_iter().enumerate() {
        let (value, origin) = slot.ok_or_else(|| {
            Error::invalid_destination(format!("field {} has no mapped column", field_index))
        })?;
        values.push(value);
        origins.push(origin);
    }

    Ok(FieldValues::with_origins(values, origins))
}
