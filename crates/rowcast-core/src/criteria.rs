//! Criteria expressions.
//!
//! An [`Expr`] is plain data describing a predicate over one table. It has
//! no behavior of its own; [`crate::compile`] turns it into SQL.
//!
//! # Example
//!
//! ```rust
//! use rowcast_core::criteria::{col, Expr};
//!
//! let filter = col("name").eq("salih")
//!     .and(col("age").ge(18))
//!     .and(col("email").ends_with("@example.com"));
//!
//! // Fluent `and` appends to the existing node instead of nesting.
//! assert!(matches!(&filter, Expr::And(items) if items.len() == 3));
//! ```

use crate::error::CriteriaError;
use crate::value::{SqlValue, ToSqlValue};

/// A predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `col = ?`
    Eq(String, SqlValue),
    /// `col <> ?`
    Ne(String, SqlValue),
    /// `col > ?`
    Gt(String, SqlValue),
    /// `col >= ?`
    Ge(String, SqlValue),
    /// `col < ?`
    Lt(String, SqlValue),
    /// `col <= ?`
    Le(String, SqlValue),
    /// `col LIKE ?`; the pattern carries its own `%` wildcards.
    Like(String, String),
    /// `col IN (?, ...)`; must not be empty.
    InList(String, Vec<SqlValue>),
    /// `col BETWEEN ? AND ?`
    Between {
        /// Column name.
        column: String,
        /// Lower bound.
        start: SqlValue,
        /// Upper bound.
        end: SqlValue,
    },
    /// `col IS NULL`
    IsNull(String),
    /// `col IS NOT NULL`
    IsNotNull(String),
    /// Conjunction of all items.
    And(Vec<Expr>),
    /// Disjunction of all items.
    Or(Vec<Expr>),
    /// `NOT (item)`
    Not(Box<Expr>),
    /// Explicit parentheses around `item`.
    Group(Box<Expr>),
}

impl Expr {
    /// Creates an IN list, rejecting an empty value list up front.
    ///
    /// # Errors
    ///
    /// [`CriteriaError::EmptyInList`] when `values` is empty.
    pub fn try_in_list<V, I>(column: &str, values: I) -> Result<Self, CriteriaError>
    where
        V: ToSqlValue,
        I: IntoIterator<Item = V>,
    {
        let values: Vec<SqlValue> = values.into_iter().map(ToSqlValue::to_sql_value).collect();
        if values.is_empty() {
            return Err(CriteriaError::EmptyInList {
                column: column.to_string(),
            });
        }
        Ok(Self::InList(column.to_string(), values))
    }

    /// Creates a BETWEEN from a bound sequence that must hold exactly two values.
    ///
    /// # Errors
    ///
    /// [`CriteriaError::BetweenArity`] unless exactly two bounds are given.
    pub fn between_bounds<V, I>(column: &str, bounds: I) -> Result<Self, CriteriaError>
    where
        V: ToSqlValue,
        I: IntoIterator<Item = V>,
    {
        let mut bounds: Vec<SqlValue> = bounds.into_iter().map(ToSqlValue::to_sql_value).collect();
        if bounds.len() != 2 {
            return Err(CriteriaError::BetweenArity {
                column: column.to_string(),
                count: bounds.len(),
            });
        }
        let end = bounds.pop().unwrap_or(SqlValue::Null);
        let start = bounds.pop().unwrap_or(SqlValue::Null);
        Ok(Self::Between {
            column: column.to_string(),
            start,
            end,
        })
    }

    /// Combines with AND. A left-hand `And` node absorbs `other`.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::And(mut items) => {
                items.push(other);
                Self::And(items)
            }
            left => Self::And(vec![left, other]),
        }
    }

    /// Combines with OR. A left-hand `Or` node absorbs `other`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Or(mut items) => {
                items.push(other);
                Self::Or(items)
            }
            left => Self::Or(vec![left, other]),
        }
    }

    /// Negates the expression.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Wraps the expression in explicit parentheses.
    #[must_use]
    pub fn group(self) -> Self {
        Self::Group(Box::new(self))
    }
}

impl std::ops::Not for Expr {
    type Output = Self;

    fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}

/// Conjunction of `exprs`. One operand is returned unchanged.
///
/// # Errors
///
/// [`CriteriaError::EmptyCombinator`] when `exprs` is empty.
pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Result<Expr, CriteriaError> {
    combine(exprs, "and", Expr::And)
}

/// Disjunction of `exprs`. One operand is returned unchanged.
///
/// # Errors
///
/// [`CriteriaError::EmptyCombinator`] when `exprs` is empty.
pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Result<Expr, CriteriaError> {
    combine(exprs, "or", Expr::Or)
}

fn combine(
    exprs: impl IntoIterator<Item = Expr>,
    name: &'static str,
    wrap: fn(Vec<Expr>) -> Expr,
) -> Result<Expr, CriteriaError> {
    let mut items: Vec<Expr> = exprs.into_iter().collect();
    match items.len() {
        0 => Err(CriteriaError::EmptyCombinator(name)),
        1 => Ok(items.remove(0)),
        _ => Ok(wrap(items)),
    }
}

/// Creates a column reference.
#[must_use]
pub fn col(name: &str) -> Column {
    Column {
        name: String::from(name),
    }
}

/// A column reference used to start a predicate.
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name.
    pub name: String,
}

impl Column {
    /// Creates an equality expression.
    #[must_use]
    pub fn eq<T: ToSqlValue>(self, value: T) -> Expr {
        Expr::Eq(self.name, value.to_sql_value())
    }

    /// Creates an inequality expression.
    #[must_use]
    pub fn ne<T: ToSqlValue>(self, value: T) -> Expr {
        Expr::Ne(self.name, value.to_sql_value())
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt<T: ToSqlValue>(self, value: T) -> Expr {
        Expr::Gt(self.name, value.to_sql_value())
    }

    /// Creates a greater-than-or-equal expression.
    #[must_use]
    pub fn ge<T: ToSqlValue>(self, value: T) -> Expr {
        Expr::Ge(self.name, value.to_sql_value())
    }

    /// Creates a less-than expression.
    #[must_use]
    pub fn lt<T: ToSqlValue>(self, value: T) -> Expr {
        Expr::Lt(self.name, value.to_sql_value())
    }

    /// Creates a less-than-or-equal expression.
    #[must_use]
    pub fn le<T: ToSqlValue>(self, value: T) -> Expr {
        Expr::Le(self.name, value.to_sql_value())
    }

    /// Creates a LIKE expression. Use `%` for wildcard matching.
    #[must_use]
    pub fn like(self, pattern: impl Into<String>) -> Expr {
        Expr::Like(self.name, pattern.into())
    }

    /// Creates a starts-with filter (`LIKE value%`).
    #[must_use]
    pub fn starts_with(self, prefix: &str) -> Expr {
        self.like(format!("{prefix}%"))
    }

    /// Creates an ends-with filter (`LIKE %value`).
    #[must_use]
    pub fn ends_with(self, suffix: &str) -> Expr {
        self.like(format!("%{suffix}"))
    }

    /// Creates a contains filter (`LIKE %value%`).
    #[must_use]
    pub fn contains(self, needle: &str) -> Expr {
        self.like(format!("%{needle}%"))
    }

    /// Creates an IN expression. An empty list is rejected at compile time.
    #[must_use]
    pub fn in_list<T: ToSqlValue>(self, values: impl IntoIterator<Item = T>) -> Expr {
        Expr::InList(
            self.name,
            values.into_iter().map(ToSqlValue::to_sql_value).collect(),
        )
    }

    /// Creates a BETWEEN expression (`start <= col <= end`).
    #[must_use]
    pub fn between<T: ToSqlValue, U: ToSqlValue>(self, start: T, end: U) -> Expr {
        Expr::Between {
            column: self.name,
            start: start.to_sql_value(),
            end: end.to_sql_value(),
        }
    }

    /// Creates an IS NULL expression.
    #[must_use]
    pub fn is_null(self) -> Expr {
        Expr::IsNull(self.name)
    }

    /// Creates an IS NOT NULL expression.
    #[must_use]
    pub fn is_not_null(self) -> Expr {
        Expr::IsNotNull(self.name)
    }
}
