//! Ordering, limits and compiled statements.

use crate::value::SqlValue;

/// One `ORDER BY` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    /// Column to order by.
    pub column: String,
    /// `true` for ASC, `false` for DESC.
    pub ascending: bool,
}

impl OrderSpec {
    /// Ascending order on `column`.
    #[must_use]
    pub fn asc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            ascending: true,
        }
    }

    /// Descending order on `column`.
    #[must_use]
    pub fn desc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            ascending: false,
        }
    }

    /// Parses `"col"` (ascending) or `"-col"` (descending).
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        if let Some(column) = spec.strip_prefix('-') {
            Self::desc(column)
        } else {
            Self::asc(spec)
        }
    }

    /// SQL keyword for the direction.
    #[must_use]
    pub const fn direction(&self) -> &'static str {
        if self.ascending {
            "ASC"
        } else {
            "DESC"
        }
    }
}

/// `LIMIT` / `OFFSET` pair. `limit` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    /// Maximum number of rows.
    pub limit: u64,
    /// Rows to skip.
    pub offset: u64,
}

impl Limit {
    /// Creates a limit; a zero `limit` is raised to 1.
    #[must_use]
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit: limit.max(1),
            offset,
        }
    }

    /// Limit without offset.
    #[must_use]
    pub fn first(limit: u64) -> Self {
        Self::new(limit, 0)
    }

    /// Limit for a 1-based page. Page and size below 1 are clamped to 1.
    #[must_use]
    pub fn page(page: i64, size: i64) -> Self {
        let page = clamp_positive(page);
        let size = clamp_positive(size);
        Self {
            limit: size,
            offset: (page - 1).saturating_mul(size),
        }
    }
}

/// Clamps to `1..` and converts to `u64`.
fn clamp_positive(n: i64) -> u64 {
    u64::try_from(n.max(1)).unwrap_or(1)
}

/// A parameterized statement: SQL with `?` placeholders and its arguments.
///
/// The arguments are in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    /// SQL text.
    pub sql: String,
    /// Positional arguments.
    pub args: Vec<SqlValue>,
}

impl SqlStatement {
    /// Creates a statement.
    #[must_use]
    pub fn new(sql: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }
}
