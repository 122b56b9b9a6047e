//! Row mappers and entities.

use crate::error::MapError;
use crate::row::DataRow;

/// Converts a decoded row into a typed value.
///
/// Closures of the form `Fn(&DataRow) -> Result<T, MapError>` are mappers
/// too, so ad-hoc projections need no named type.
pub trait RowMapper<T> {
    /// Maps one row.
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] if a column is NULL where a value is required
    /// or holds an unexpected storage class.
    fn map(&self, row: &DataRow) -> Result<T, MapError>;
}

impl<T, F> RowMapper<T> for F
where
    F: Fn(&DataRow) -> Result<T, MapError>,
{
    fn map(&self, row: &DataRow) -> Result<T, MapError> {
        self(row)
    }
}

/// A typed entity bound to one table through its type id.
///
/// Implemented by generated code; `TYPE_ID` is the key under which the
/// table is registered in the [`crate::registry::OrmRegistry`].
pub trait Entity: Sized {
    /// Stable type id of the backing table.
    const TYPE_ID: &'static str;

    /// Maps a row of the backing table.
    ///
    /// # Errors
    ///
    /// Same as [`RowMapper::map`].
    fn from_row(row: &DataRow) -> Result<Self, MapError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ColumnValue;

    #[derive(Debug, PartialEq)]
    struct Tag {
        id: i64,
        label: Option<String>,
    }

    impl Entity for Tag {
        const TYPE_ID: &'static str = "Tag";

        fn from_row(row: &DataRow) -> Result<Self, MapError> {
            Ok(Self {
                id: row.required("id")?,
                label: row.optional("label")?,
            })
        }
    }

    fn apply<T>(mapper: &impl RowMapper<T>, row: &DataRow) -> Result<T, MapError> {
        mapper.map(row)
    }

    #[test]
    fn test_entity_fn_is_a_mapper() {
        let row = DataRow::new(vec![
            ("id".into(), ColumnValue::Integer(3)),
            ("label".into(), ColumnValue::Null),
        ]);
        let tag = apply(&Tag::from_row, &row).unwrap();
        assert_eq!(tag, Tag { id: 3, label: None });
    }

    #[test]
    fn test_closure_mapper() {
        let row = DataRow::new(vec![("n".into(), ColumnValue::Integer(41))]);
        let plus_one = |r: &DataRow| r.required::<i64>("n").map(|n| n + 1);
        assert_eq!(apply(&plus_one, &row).unwrap(), 42);
    }
}
