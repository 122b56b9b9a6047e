//! Statement logging decorator.

use std::cell::RefCell;

use rowcast_core::SqlValue;
use tracing::debug;

use crate::driver::{Binder, PreparedStatement, SqlDriver};

/// Wraps a driver and reports every statement with its bound arguments.
///
/// Statements are logged at DEBUG level under the `rowcast::sql` target
/// once the inner driver returns, with the SQL text, the arguments as they
/// were bound, and the row count or error.
#[derive(Debug)]
pub struct LoggingDriver<D> {
    inner: D,
}

impl<D: SqlDriver> LoggingDriver<D> {
    /// Wraps `inner`.
    pub const fn new(inner: D) -> Self {
        Self { inner }
    }

    /// The wrapped driver.
    pub const fn inner(&self) -> &D {
        &self.inner
    }

    /// Unwraps the decorator.
    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: SqlDriver> SqlDriver for LoggingDriver<D> {
    type Row = D::Row;

    fn execute_query(
        &self,
        sql: &str,
        parameters: usize,
        binder: Binder<'_>,
    ) -> Result<Vec<Self::Row>, sqlx::Error> {
        let (result, args) = capture(parameters, binder, |recording| {
            self.inner.execute_query(sql, parameters, recording)
        });
        let args = render_arguments(&args);
        match &result {
            Ok(rows) => {
                debug!(target: "rowcast::sql", sql = %sql, args = %args, rows = rows.len(), "Query");
            }
            Err(e) => {
                debug!(target: "rowcast::sql", sql = %sql, args = %args, error = %e, "Query failed");
            }
        }
        result
    }

    fn execute_statement(
        &self,
        sql: &str,
        parameters: usize,
        binder: Binder<'_>,
    ) -> Result<u64, sqlx::Error> {
        let (result, args) = capture(parameters, binder, |recording| {
            self.inner.execute_statement(sql, parameters, recording)
        });
        let args = render_arguments(&args);
        match &result {
            Ok(affected) => {
                debug!(target: "rowcast::sql", sql = %sql, args = %args, affected, "Statement");
            }
            Err(e) => {
                debug!(target: "rowcast::sql", sql = %sql, args = %args, error = %e, "Statement failed");
            }
        }
        result
    }
}

/// Forwards binds to the real statement and records each value.
struct Recorder<'a, 's> {
    inner: &'a mut (dyn PreparedStatement + 's),
    values: &'a mut Vec<SqlValue>,
}

impl Recorder<'_, '_> {
    fn record(&mut self, index: usize, value: SqlValue) {
        if index >= self.values.len() {
            self.values.resize(index + 1, SqlValue::Null);
        }
        self.values[index] = value;
    }
}

impl PreparedStatement for Recorder<'_, '_> {
    fn bind_null(&mut self, index: usize) {
        self.inner.bind_null(index);
        self.record(index, SqlValue::Null);
    }

    fn bind_long(&mut self, index: usize, value: i64) {
        self.inner.bind_long(index, value);
        self.record(index, SqlValue::Int(value));
    }

    fn bind_double(&mut self, index: usize, value: f64) {
        self.inner.bind_double(index, value);
        self.record(index, SqlValue::Float(value));
    }

    fn bind_string(&mut self, index: usize, value: &str) {
        self.inner.bind_string(index, value);
        self.record(index, SqlValue::Text(value.to_string()));
    }

    fn bind_bytes(&mut self, index: usize, value: &[u8]) {
        self.inner.bind_bytes(index, value);
        self.record(index, SqlValue::Blob(value.to_vec()));
    }
}

/// Runs `execute` with a binder that records what `binder` binds.
fn capture<R>(
    parameters: usize,
    binder: Binder<'_>,
    execute: impl FnOnce(Binder<'_>) -> R,
) -> (R, Vec<SqlValue>) {
    let captured = RefCell::new(vec![SqlValue::Null; parameters]);
    let recording = |stmt: &mut dyn PreparedStatement| {
        let mut values = captured.borrow_mut();
        binder(&mut Recorder {
            inner: stmt,
            values: &mut *values,
        });
    };
    let result = execute(&recording);
    (result, captured.into_inner())
}

/// Renders arguments as `[1, 'a', NULL, [bytes 3]]`.
#[must_use]
pub fn render_arguments(args: &[SqlValue]) -> String {
    let parts: Vec<String> = args.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
