//! Statement execution: argument binding and row decoding.

use rowcast_core::{Affinity, ColumnValue, DataRow, SqlStatement, SqlValue, TableMeta};

use crate::driver::{PreparedStatement, SqlCursor, SqlDriver};
use crate::error::Result;

/// Binds `args` by 0-based index.
pub fn bind_args(stmt: &mut dyn PreparedStatement, args: &[SqlValue]) {
    for (index, arg) in args.iter().enumerate() {
        match arg {
            SqlValue::Null => stmt.bind_null(index),
            SqlValue::Bool(b) => stmt.bind_long(index, i64::from(*b)),
            SqlValue::Int(i) => stmt.bind_long(index, *i),
            SqlValue::Float(f) => stmt.bind_double(index, *f),
            SqlValue::Text(s) => stmt.bind_string(index, s),
            SqlValue::Blob(b) => stmt.bind_bytes(index, b),
        }
    }
}

/// Reads column `index` according to its affinity.
///
/// A value the affinity getter cannot convert is returned in its stored
/// class, so only a stored NULL decodes as [`ColumnValue::Null`]. UNKNOWN
/// always keeps the stored class.
pub fn read_column<C: SqlCursor>(cursor: &C, index: usize, affinity: Affinity) -> ColumnValue {
    let converted = match affinity {
        Affinity::Integer => cursor.get_long(index).map(ColumnValue::Integer),
        Affinity::Real => cursor.get_double(index).map(ColumnValue::Real),
        Affinity::Text | Affinity::Numeric => cursor.get_string(index).map(ColumnValue::Text),
        Affinity::Blob => cursor.get_bytes(index).map(ColumnValue::Blob),
        Affinity::Unknown => None,
    };
    converted
        .or_else(|| read_stored(cursor, index))
        .unwrap_or(ColumnValue::Null)
}

/// Tries long, double, string, then bytes. Each getter converts only from
/// classes earlier in that order, so the first hit is the stored class.
fn read_stored<C: SqlCursor>(cursor: &C, index: usize) -> Option<ColumnValue> {
    cursor
        .get_long(index)
        .map(ColumnValue::Integer)
        .or_else(|| cursor.get_double(index).map(ColumnValue::Real))
        .or_else(|| cursor.get_string(index).map(ColumnValue::Text))
        .or_else(|| cursor.get_bytes(index).map(ColumnValue::Blob))
}

/// Decodes a row selected with the table's full column list.
pub fn decode_row<C: SqlCursor>(cursor: &C, table: &TableMeta) -> DataRow {
    let entries = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            (
                column.name.to_string(),
                read_column(cursor, index, column.affinity),
            )
        })
        .collect();
    DataRow::new(entries)
}

/// Runs a SELECT over all columns of `table` and decodes every row.
///
/// # Errors
///
/// Returns the driver error if the query fails.
pub fn execute_select<D: SqlDriver>(
    driver: &D,
    table: &TableMeta,
    stmt: &SqlStatement,
) -> Result<Vec<DataRow>> {
    let rows = driver.execute_query(&stmt.sql, stmt.args.len(), &|prepared| {
        bind_args(prepared, &stmt.args);
    })?;
    Ok(rows.iter().map(|row| decode_row(row, table)).collect())
}

/// Runs a single-value query such as `SELECT COUNT(*)` and reads column 0
/// of the first row. No row reads as 0.
///
/// # Errors
///
/// Returns the driver error if the query fails.
pub fn execute_scalar<D: SqlDriver>(driver: &D, stmt: &SqlStatement) -> Result<i64> {
    let rows = driver.execute_query(&stmt.sql, stmt.args.len(), &|prepared| {
        bind_args(prepared, &stmt.args);
    })?;
    Ok(rows.first().and_then(|row| row.get_long(0)).unwrap_or(0))
}
