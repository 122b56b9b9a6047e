//! # rowcast-core
//!
//! Driver-agnostic building blocks of the rowcast ORM.
//!
//! This crate provides:
//! - Table and column metadata (`TableMeta`, `ColumnMeta`, `Affinity`)
//! - A criteria expression tree built with [`col`]
//! - A pure SQL compiler producing parameterized statements
//! - Decoded rows (`DataRow`) and typed mapping (`RowMapper`, `Entity`)
//! - The process-wide table registry installed by generated code
//!
//! It has no database dependency; `rowcast-orm` executes the statements
//! compiled here.
//!
//! ## Compiling a query
//!
//! ```rust
//! use rowcast_core::{build_select, col, Affinity, ColumnMeta, Limit, OrderSpec, TableMeta};
//!
//! static POST_COLUMNS: [ColumnMeta; 2] = [
//!     ColumnMeta::new("id", Affinity::Integer, false, None, 1, true),
//!     ColumnMeta::new("title", Affinity::Text, false, None, 0, false),
//! ];
//! static POST: TableMeta = TableMeta::new("post", "Post", &POST_COLUMNS);
//!
//! let stmt = build_select(
//!     &POST,
//!     Some(&col("title").contains("rust")),
//!     &[OrderSpec::parse("-id")],
//!     Some(Limit::page(2, 20)),
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     stmt.sql,
//!     r#"SELECT "id","title" FROM "post" WHERE "title" LIKE ? ORDER BY "id" DESC LIMIT ? OFFSET ?"#
//! );
//! assert_eq!(stmt.args.len(), 3);
//! ```

pub mod compile;
pub mod criteria;
pub mod error;
pub mod mapper;
pub mod meta;
pub mod query;
pub mod registry;
pub mod row;
pub mod value;

pub use compile::{build_count, build_select, build_where_clause, quote_ident, WhereClause};
pub use criteria::{col, Column, Expr};
pub use error::{CriteriaError, MapError, RegistryError};
pub use mapper::{Entity, RowMapper};
pub use meta::{Affinity, ColumnMeta, TableMeta};
pub use query::{Limit, OrderSpec, SqlStatement};
pub use registry::{OrmRegistry, Registry};
pub use row::DataRow;
pub use value::{ColumnValue, FromColumnValue, SqlValue, ToSqlValue};
