//! Decoded result rows.

use std::fmt;

use crate::error::MapError;
use crate::value::{ColumnValue, FromColumnValue};

/// A decoded result row: column name to [`ColumnValue`], in select order.
///
/// Rows are immutable once built by the executor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataRow {
    entries: Vec<(String, ColumnValue)>,
}

impl DataRow {
    /// Builds a row from `(name, value)` pairs.
    #[must_use]
    pub fn new(entries: Vec<(String, ColumnValue)>) -> Self {
        Self { entries }
    }

    /// Returns the raw value of a column, if the row has it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColumnValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Column names in select order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads a column that must not be NULL.
    ///
    /// # Errors
    ///
    /// [`MapError::NullViolation`] if the column is absent or NULL,
    /// [`MapError::TypeMismatch`] if it holds another storage class.
    pub fn required<T: FromColumnValue>(&self, name: &str) -> Result<T, MapError> {
        self.optional(name)?.ok_or_else(|| MapError::NullViolation {
            column: name.to_string(),
        })
    }

    /// Reads a nullable column. Absent columns read as `None`.
    ///
    /// # Errors
    ///
    /// [`MapError::TypeMismatch`] if the column holds another storage class.
    pub fn optional<T: FromColumnValue>(&self, name: &str) -> Result<Option<T>, MapError> {
        match self.get(name) {
            None | Some(ColumnValue::Null) => Ok(None),
            Some(value) => T::from_column_value(value)
                .map(Some)
                .ok_or_else(|| MapError::TypeMismatch {
                    column: name.to_string(),
                    expected: T::EXPECTED,
                    found: value.kind(),
                }),
        }
    }
}

impl fmt::Display for DataRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DataRow(")?;
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value:?}")?;
        }
        f.write_str(")")
    }
}
