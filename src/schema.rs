//! Record schemas and field declarations.
//!
//! A destination record type describes itself as an ordered list of
//! [`FieldDeclaration`]s, either through the [`Record`] trait (usually
//! generated with [`impl_record!`](crate::impl_record)) or through an
//! explicitly registered [`Schema`].

use crate::constants::type_names;
use crate::models::FieldValues;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Value types a field can be declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueType {
    String,
    Integer,
    Float,
    Timestamp,
}

impl ValueType {
    /// Canonical lowercase name, as used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.as_str();

        if type_names::STRING.contains(&name) {
            Ok(ValueType::String)
        } else if type_names::INTEGER.contains(&name) {
            Ok(ValueType::Integer)
        } else if type_names::FLOAT.contains(&name) {
            Ok(ValueType::Float)
        } else if type_names::TIMESTAMP.contains(&name) {
            Ok(ValueType::Timestamp)
        } else {
            Err(Error::unsupported_field_type(s.trim()))
        }
    }
}

impl TryFrom<String> for ValueType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ValueType> for String {
    fn from(value: ValueType) -> Self {
        value.as_str().to_string()
    }
}

/// Static description of one destination field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    /// Header column that feeds this field
    pub column_name: String,

    /// Position of the field within the record
    pub field_index: usize,

    /// Declared type of the field
    pub value_type: ValueType,
}

impl FieldDeclaration {
    pub fn new(column_name: impl Into<String>, field_index: usize, value_type: ValueType) -> Self {
        Self {
            column_name: column_name.into(),
            field_index,
            value_type,
        }
    }
}

/// A flat record type that rows can be decoded into
///
/// `declarations` must list every field exactly once with field indices
/// `0..n`. `from_values` is only called once every field of a row has been
/// coerced, so a failed row never yields a partially populated record.
pub trait Record: Sized {
    /// Ordered field declarations for this record type
    fn declarations() -> Vec<FieldDeclaration>;

    /// Build a record from values in field-index order
    fn from_values(values: &mut FieldValues) -> Result<Self>;
}

/// Check that a declaration set describes a flat, decodable record
///
/// Runs before any input is read.
pub fn validate_declarations(declarations: &[FieldDeclaration]) -> Result<()> {
    if declarations.is_empty() {
        return Err(Error::invalid_destination("record declares no fields"));
    }

    let mut columns = HashSet::new();
    let mut indices = HashSet::new();

    for declaration in declarations {
        if declaration.column_name.is_empty() {
            return Err(Error::invalid_destination(format!(
                "field {} declares an empty column name",
                declaration.field_index
            )));
        }

        if !columns.insert(declaration.column_name.as_str()) {
            return Err(Error::invalid_destination(format!(
                "column '{}' is declared more than once",
                declaration.column_name
            )));
        }

        if declaration.field_index >= declarations.len() || !indices.insert(declaration.field_index)
        {
            return Err(Error::invalid_destination(format!(
                "field indices must be unique and within 0..{}, got {}",
                declarations.len(),
                declaration.field_index
            )));
        }
    }

    Ok(())
}

/// Explicitly registered record schema for dynamic [`Row`](crate::Row)s
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schema {
    declarations: Vec<FieldDeclaration>,
}

impl Schema {
    /// Start building a schema column by column
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Build a schema from `(column name, type name)` pairs
    ///
    /// Type names are resolved through [`ValueType::from_str`], so an unknown
    /// type fails with [`Error::UnsupportedFieldType`].
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut builder = Self::builder();
        for (column_name, type_name) in pairs {
            builder = builder.column(column_name, type_name.parse()?);
        }
        builder.build()
    }

    pub fn declarations(&self) -> &[FieldDeclaration] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Field index declared for a column
    pub fn field_index(&self, column_name: &str) -> Option<usize> {
        self.declarations
            .iter()
            .find(|d| d.column_name == column_name)
            .map(|d| d.field_index)
    }

    /// Column names in field-index order
    pub fn column_names(&self) -> Vec<String> {
        let mut declarations: Vec<&FieldDeclaration> = self.declarations.iter().collect();
        declarations.sort_by_key(|d| d.field_index);
        declarations
            .into_iter()
            .map(|d| d.column_name.clone())
            .collect()
    }
}

/// Builder for [`Schema`]; field indices follow registration order
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    declarations: Vec<FieldDeclaration>,
}

impl SchemaBuilder {
    /// Register the next column
    pub fn column(mut self, column_name: impl Into<String>, value_type: ValueType) -> Self {
        let field_index = self.declarations.len();
        self.declarations
            .push(FieldDeclaration::new(column_name, field_index, value_type));
        self
    }

    /// Validate and finish the schema
    pub fn build(self) -> Result<Schema> {
        validate_declarations(&self.declarations)?;
        Ok(Schema {
            declarations: self.declarations,
        })
    }
}

/// Implement [`Record`] for a plain struct
///
/// Each entry names a struct field and its type. A field feeds from the
/// column with its own name unless `=> "column"` is given. Every field of the
/// struct must be listed, and every type must implement
/// [`FieldValue`](crate::FieldValue).
///
/// ```rust
/// use chrono::{DateTime, FixedOffset};
/// use typed_csv::impl_record;
///
/// struct Trade {
///     symbol: String,
///     price: f64,
///     executed_at: DateTime<FixedOffset>,
/// }
///
/// impl_record!(Trade {
///     symbol: String => "Symbol",
///     price: f64,
///     executed_at: DateTime<FixedOffset> => "time",
/// });
/// ```
#[macro_export]
macro_rules! impl_record {
    ($record:ident { $($field:ident : $ty:ty $(=> $column:literal)?),+ $(,)? }) => {
        impl $crate::Record for $record {
            fn declarations() -> ::std::vec::Vec<$crate::FieldDeclaration> {
                let mut declarations = ::std::vec::Vec::new();
                $(
                    declarations.push($crate::FieldDeclaration::new(
                        $crate::impl_record!(@column $field $(, $column)?),
                        declarations.len(),
                        <$ty as $crate::FieldValue>::VALUE_TYPE,
                    ));
                )+
                declarations
            }

            fn from_values(values: &mut $crate::FieldValues) -> $crate::Result<Self> {
                Ok(Self {
                    $( $field: values.take_next::<$ty>()?, )+
                })
            }
        }
    };
    (@column $field:ident) => {
        stringify!($field)
    };
    (@column $field:ident, $column:literal) => {
        $column
    };
}
