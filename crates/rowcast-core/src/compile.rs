//! SQL compiler.
//!
//! Turns `(table, criteria, order, limit)` into a [`SqlStatement`]. Every
//! function here is pure: the same input always yields byte-identical SQL
//! and arguments, so statements are safe to build from any thread.
//!
//! Identifiers are always double-quoted. Values never appear in SQL text;
//! each one becomes a `?` placeholder and the argument list follows
//! placeholder order: WHERE arguments in left-to-right tree order, then
//! LIMIT, then OFFSET.
//!
//! ```rust
//! use rowcast_core::compile::build_select;
//! use rowcast_core::criteria::col;
//! use rowcast_core::meta::{Affinity, ColumnMeta, TableMeta};
//! use rowcast_core::value::SqlValue;
//!
//! static USER_COLUMNS: [ColumnMeta; 3] = [
//!     ColumnMeta::new("id", Affinity::Integer, false, None, 1, true),
//!     ColumnMeta::new("name", Affinity::Text, false, None, 0, false),
//!     ColumnMeta::new("age", Affinity::Integer, true, None, 0, false),
//! ];
//! static USER: TableMeta = TableMeta::new("User", "User", &USER_COLUMNS);
//!
//! let criteria = col("name").eq("salih").and(col("id").eq(2));
//! let stmt = build_select(&USER, Some(&criteria), &[], None).unwrap();
//!
//! assert_eq!(
//!     stmt.sql,
//!     r#"SELECT "id","name","age" FROM "User" WHERE ("name" = ?) AND ("id" = ?)"#
//! );
//! assert_eq!(stmt.args, vec![SqlValue::Text("salih".into()), SqlValue::Int(2)]);
//! ```

use crate::criteria::Expr;
use crate::error::CriteriaError;
use crate::meta::TableMeta;
use crate::query::{Limit, OrderSpec, SqlStatement};
use crate::value::SqlValue;

/// A compiled WHERE fragment, without the `WHERE` keyword.
///
/// `sql` is `None` when there is no criteria; `args` is then empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WhereClause {
    /// Predicate SQL.
    pub sql: Option<String>,
    /// Arguments in placeholder order.
    pub args: Vec<SqlValue>,
}

/// Quotes an identifier, doubling embedded quotes.
#[must_use]
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Compiles an optional criteria tree into a WHERE fragment.
///
/// # Errors
///
/// [`CriteriaError::EmptyInList`] if any IN list is empty, and
/// [`CriteriaError::EmptyCombinator`] for an AND or OR without operands.
pub fn build_where_clause(criteria: Option<&Expr>) -> Result<WhereClause, CriteriaError> {
    let Some(expr) = criteria else {
        return Ok(WhereClause::default());
    };
    let mut args = Vec::new();
    let sql = compile_expr(expr, &mut args)?;
    Ok(WhereClause {
        sql: Some(sql),
        args,
    })
}

/// Builds `SELECT <all columns> FROM <table>` with the optional clauses.
///
/// # Errors
///
/// [`CriteriaError::EmptyInList`] if any IN list is empty, and
/// [`CriteriaError::EmptyCombinator`] for an AND or OR without operands.
pub fn build_select(
    table: &TableMeta,
    criteria: Option<&Expr>,
    order: &[OrderSpec],
    limit: Option<Limit>,
) -> Result<SqlStatement, CriteriaError> {
    let projection: Vec<String> = table.column_names().map(quote_ident).collect();

    let mut sql = String::from("SELECT ");
    sql.push_str(&projection.join(","));
    sql.push_str(" FROM ");
    sql.push_str(&quote_ident(&table.table_name));

    let WhereClause {
        sql: where_sql,
        mut args,
    } = build_where_clause(criteria)?;
    if let Some(where_sql) = where_sql {
        sql.push_str(" WHERE ");
        sql.push_str(&where_sql);
    }

    if !order.is_empty() {
        let parts: Vec<String> = order
            .iter()
            .map(|o| format!("{} {}", quote_ident(&o.column), o.direction()))
            .collect();
        sql.push_str(" ORDER BY ");
        sql.push_str(&parts.join(", "));
    }

    if let Some(limit) = limit {
        sql.push_str(" LIMIT ?");
        args.push(SqlValue::Int(saturating_i64(limit.limit)));
        if limit.offset > 0 {
            sql.push_str(" OFFSET ?");
            args.push(SqlValue::Int(saturating_i64(limit.offset)));
        }
    }

    Ok(SqlStatement { sql, args })
}

/// Builds `SELECT COUNT(*) FROM <table>` reusing a compiled WHERE fragment.
#[must_use]
pub fn build_count(table_name: &str, where_clause: &WhereClause) -> SqlStatement {
    let mut sql = String::from("SELECT COUNT(*) FROM ");
    sql.push_str(&quote_ident(table_name));
    if let Some(where_sql) = where_clause.sql.as_deref().filter(|s| !s.trim().is_empty()) {
        sql.push_str(" WHERE ");
        sql.push_str(where_sql);
    }
    SqlStatement {
        sql,
        args: where_clause.args.clone(),
    }
}

fn saturating_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn compile_expr(expr: &Expr, args: &mut Vec<SqlValue>) -> Result<String, CriteriaError> {
    let sql = match expr {
        Expr::Eq(c, v) => compare(c, "=", v, args),
        Expr::Ne(c, v) => compare(c, "<>", v, args),
        Expr::Gt(c, v) => compare(c, ">", v, args),
        Expr::Ge(c, v) => compare(c, ">=", v, args),
        Expr::Lt(c, v) => compare(c, "<", v, args),
        Expr::Le(c, v) => compare(c, "<=", v, args),
        Expr::Like(c, pattern) => {
            args.push(SqlValue::Text(pattern.clone()));
            format!("{} LIKE ?", quote_ident(c))
        }
        Expr::InList(c, values) => {
            if values.is_empty() {
                return Err(CriteriaError::EmptyInList { column: c.clone() });
            }
            let placeholders = vec!["?"; values.len()].join(", ");
            args.extend(values.iter().cloned());
            format!("{} IN ({placeholders})", quote_ident(c))
        }
        Expr::Between { column, start, end } => {
            args.push(start.clone());
            args.push(end.clone());
            format!("{} BETWEEN ? AND ?", quote_ident(column))
        }
        Expr::IsNull(c) => format!("{} IS NULL", quote_ident(c)),
        Expr::IsNotNull(c) => format!("{} IS NOT NULL", quote_ident(c)),
        Expr::And(items) => join(items, "and", " AND ", args)?,
        Expr::Or(items) => join(items, "or", " OR ", args)?,
        Expr::Not(inner) => format!("NOT ({})", compile_expr(inner, args)?),
        Expr::Group(inner) => format!("({})", compile_expr(inner, args)?),
    };
    Ok(sql)
}

fn compare(column: &str, op: &str, value: &SqlValue, args: &mut Vec<SqlValue>) -> String {
    args.push(value.clone());
    format!("{} {op} ?", quote_ident(column))
}

fn join(
    items: &[Expr],
    combinator: &'static str,
    sep: &str,
    args: &mut Vec<SqlValue>,
) -> Result<String, CriteriaError> {
    if items.is_empty() {
        return Err(CriteriaError::EmptyCombinator(combinator));
    }
    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        parts.push(format!("({})", compile_expr(item, args)?));
    }
    Ok(parts.join(sep))
}
