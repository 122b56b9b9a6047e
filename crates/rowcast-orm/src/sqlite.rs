//! Blocking SQLite driver on top of sqlx.
//!
//! [`SqliteDriver`] owns a current-thread tokio runtime and a pool holding a
//! single connection that is never recycled, so an in-memory database lives
//! as long as the driver. Every call blocks on the runtime; do not call it
//! from inside another async runtime.

use std::path::Path;
use std::str::FromStr;

use rowcast_core::{ColumnValue, SqlValue};
use sqlx::query::Query;
use sqlx::sqlite::{
    Sqlite, SqliteArguments, SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions,
    SqliteRow,
};
use sqlx::{Row, TypeInfo, ValueRef};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::driver::{Binder, PreparedStatement, SqlCursor, SqlDriver};

/// A synchronous SQLite driver.
#[derive(Debug)]
pub struct SqliteDriver {
    runtime: Runtime,
    pool: SqlitePool,
}

impl SqliteDriver {
    /// Opens a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime or the connection cannot be created.
    pub fn in_memory() -> Result<Self, sqlx::Error> {
        Self::connect(SqliteConnectOptions::from_str("sqlite::memory:")?)
    }

    /// Opens a database file, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime or the connection cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, sqlx::Error> {
        Self::connect(
            SqliteConnectOptions::new()
                .filename(path.as_ref())
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Delete),
        )
    }

    /// Opens an existing database file read-only.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self, sqlx::Error> {
        Self::connect(
            SqliteConnectOptions::new()
                .filename(path.as_ref())
                .read_only(true),
        )
    }

    fn connect(options: SqliteConnectOptions) -> Result<Self, sqlx::Error> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let pool = runtime.block_on(
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options),
        )?;
        debug!("Opened SQLite connection");
        Ok(Self { runtime, pool })
    }
}

impl Drop for SqliteDriver {
    fn drop(&mut self) {
        self.runtime.block_on(self.pool.close());
    }
}

impl SqlDriver for SqliteDriver {
    type Row = StoredRow;

    fn execute_query(
        &self,
        sql: &str,
        parameters: usize,
        binder: Binder<'_>,
    ) -> Result<Vec<StoredRow>, sqlx::Error> {
        let query = build_query(sql, collect_arguments(parameters, binder));
        let rows = self.runtime.block_on(query.fetch_all(&self.pool))?;
        rows.iter().map(StoredRow::decode).collect()
    }

    fn execute_statement(
        &self,
        sql: &str,
        parameters: usize,
        binder: Binder<'_>,
    ) -> Result<u64, sqlx::Error> {
        let query = build_query(sql, collect_arguments(parameters, binder));
        let result = self.runtime.block_on(query.execute(&self.pool))?;
        Ok(result.rows_affected())
    }
}

/// Argument slots filled by a binder; unbound slots stay NULL.
struct ArgumentSlots {
    values: Vec<SqlValue>,
}

impl ArgumentSlots {
    fn set(&mut self, index: usize, value: SqlValue) {
        if index >= self.values.len() {
            self.values.resize(index + 1, SqlValue::Null);
        }
        self.values[index] = value;
    }
}

impl PreparedStatement for ArgumentSlots {
    fn bind_null(&mut self, index: usize) {
        self.set(index, SqlValue::Null);
    }

    fn bind_long(&mut self, index: usize, value: i64) {
        self.set(index, SqlValue::Int(value));
    }

    fn bind_double(&mut self, index: usize, value: f64) {
        self.set(index, SqlValue::Float(value));
    }

    fn bind_string(&mut self, index: usize, value: &str) {
        self.set(index, SqlValue::Text(value.to_string()));
    }

    fn bind_bytes(&mut self, index: usize, value: &[u8]) {
        self.set(index, SqlValue::Blob(value.to_vec()));
    }
}

fn collect_arguments(parameters: usize, binder: Binder<'_>) -> Vec<SqlValue> {
    let mut slots = ArgumentSlots {
        values: vec![SqlValue::Null; parameters],
    };
    binder(&mut slots);
    slots.values
}

fn build_query(sql: &str, values: Vec<SqlValue>) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    values
        .into_iter()
        .fold(sqlx::query(sql), |query, value| match value {
            SqlValue::Null => query.bind(Option::<i64>::None),
            SqlValue::Bool(b) => query.bind(i64::from(b)),
            SqlValue::Int(i) => query.bind(i),
            SqlValue::Float(f) => query.bind(f),
            SqlValue::Text(s) => query.bind(s),
            SqlValue::Blob(b) => query.bind(b),
        })
}

/// A result row decoded eagerly from SQLite storage classes.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow(Vec<ColumnValue>);

impl StoredRow {
    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let mut values = Vec::with_capacity(row.len());
        for idx in 0..row.len() {
            let storage = {
                let raw = row.try_get_raw(idx)?;
                if raw.is_null() {
                    None
                } else {
                    Some(raw.type_info().name().to_ascii_uppercase())
                }
            };
            let value = match storage.as_deref() {
                None => ColumnValue::Null,
                Some("INTEGER" | "BOOLEAN") => {
                    ColumnValue::Integer(row.try_get_unchecked::<i64, _>(idx)?)
                }
                Some("REAL") => ColumnValue::Real(row.try_get_unchecked::<f64, _>(idx)?),
                Some("BLOB") => ColumnValue::Blob(row.try_get_unchecked::<Vec<u8>, _>(idx)?),
                Some(_) => ColumnValue::Text(row.try_get_unchecked::<String, _>(idx)?),
            };
            values.push(value);
        }
        Ok(Self(values))
    }

    /// The decoded values in select order.
    #[must_use]
    pub fn values(&self) -> &[ColumnValue] {
        &self.0
    }
}

impl From<Vec<ColumnValue>> for StoredRow {
    fn from(values: Vec<ColumnValue>) -> Self {
        Self(values)
    }
}

impl SqlCursor for StoredRow {
    fn column_count(&self) -> usize {
        self.0.len()
    }

    // Text is never parsed into a number.
    fn get_long(&self, index: usize) -> Option<i64> {
        match self.0.get(index)? {
            ColumnValue::Integer(i) => Some(*i),
            ColumnValue::Real(_)
            | ColumnValue::Text(_)
            | ColumnValue::Null
            | ColumnValue::Blob(_) => None,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn get_double(&self, index: usize) -> Option<f64> {
        match self.0.get(index)? {
            ColumnValue::Real(f) => Some(*f),
            ColumnValue::Integer(i) => Some(*i as f64),
            ColumnValue::Text(_) | ColumnValue::Null | ColumnValue::Blob(_) => None,
        }
    }

    fn get_string(&self, index: usize) -> Option<String> {
        match self.0.get(index)? {
            ColumnValue::Text(s) => Some(s.clone()),
            ColumnValue::Integer(i) => Some(i.to_string()),
            ColumnValue::Real(f) => Some(f.to_string()),
            ColumnValue::Null | ColumnValue::Blob(_) => None,
        }
    }

    fn get_bytes(&self, index: usize) -> Option<Vec<u8>> {
        match self.0.get(index)? {
            ColumnValue::Blob(b) => Some(b.clone()),
            ColumnValue::Text(s) => Some(s.clone().into_bytes()),
            ColumnValue::Null | ColumnValue::Integer(_) | ColumnValue::Real(_) => None,
        }
    }
}
