//! Storage driver surface.
//!
//! The executor talks to storage only through these traits. Statements are
//! prepared with `?` placeholders and bound by 0-based index from a binder
//! callback, which the driver invokes exactly once per execution.

/// Positional parameter binding.
pub trait PreparedStatement {
    /// Binds SQL NULL.
    fn bind_null(&mut self, index: usize);
    /// Binds a 64-bit integer.
    fn bind_long(&mut self, index: usize, value: i64);
    /// Binds a double.
    fn bind_double(&mut self, index: usize, value: f64);
    /// Binds text.
    fn bind_string(&mut self, index: usize, value: &str);
    /// Binds a blob.
    fn bind_bytes(&mut self, index: usize, value: &[u8]);
}

/// Typed access to the columns of one result row.
///
/// Getters return `None` for NULL. A value of another storage class is
/// converted only when the conversion is exact; otherwise the getter
/// returns `None` as well.
pub trait SqlCursor {
    /// Number of columns in the row.
    fn column_count(&self) -> usize;
    /// Reads an INTEGER column; `None` for NULL or any other storage class.
    fn get_long(&self, index: usize) -> Option<i64>;
    /// Reads a REAL or INTEGER column as a double. Text is not parsed.
    fn get_double(&self, index: usize) -> Option<f64>;
    /// Reads TEXT, rendering numbers as text. Blobs read as `None`.
    fn get_string(&self, index: usize) -> Option<String>;
    /// Reads a column as a blob.
    fn get_bytes(&self, index: usize) -> Option<Vec<u8>>;
}

/// Callback that binds all parameters of a statement.
pub type Binder<'a> = &'a dyn Fn(&mut dyn PreparedStatement);

/// Binder for statements without parameters.
pub fn no_args(_: &mut dyn PreparedStatement) {}

/// A synchronous SQL driver.
pub trait SqlDriver {
    /// Row type produced by queries.
    type Row: SqlCursor;

    /// Runs a query and returns all rows.
    ///
    /// `parameters` is the number of placeholders in `sql`; indices the
    /// binder leaves unbound are bound as NULL.
    ///
    /// # Errors
    ///
    /// Returns the driver error if preparing or running the query fails.
    fn execute_query(
        &self,
        sql: &str,
        parameters: usize,
        binder: Binder<'_>,
    ) -> Result<Vec<Self::Row>, sqlx::Error>;

    /// Runs a statement and returns the number of affected rows.
    ///
    /// # Errors
    ///
    /// Returns the driver error if preparing or running the statement fails.
    fn execute_statement(
        &self,
        sql: &str,
        parameters: usize,
        binder: Binder<'_>,
    ) -> Result<u64, sqlx::Error>;

    /// Runs a statement without parameters.
    ///
    /// # Errors
    ///
    /// Same as [`SqlDriver::execute_statement`].
    fn execute(&self, sql: &str) -> Result<u64, sqlx::Error> {
        self.execute_statement(sql, 0, &no_args)
    }
}
