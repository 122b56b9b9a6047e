//! # rowcast-orm
//!
//! Runs the statements compiled by `rowcast-core` against a storage driver.
//!
//! This crate provides:
//! - The driver surface (`SqlDriver`, `PreparedStatement`, `SqlCursor`)
//! - `SqliteDriver`, a blocking SQLite driver built on sqlx
//! - `LoggingDriver`, which reports every statement through `tracing`
//! - Typed and generic selects, COUNT and pagination
//! - `QuerySet` for lazy, chainable entity queries
//!
//! ## Quick Start
//!
//! ```ignore
//! use rowcast_core::col;
//! use rowcast_orm::{api, PageRequest, QuerySet, SqliteDriver};
//!
//! generated::init()?;
//! let driver = SqliteDriver::open("app.db")?;
//!
//! // One page of users older than 30, with the total count
//! let page = api::page::<User, _>(
//!     &driver,
//!     Some(&col("age").gt(30)),
//!     &[],
//!     PageRequest::new(2, 10).with_total(),
//! )?;
//!
//! // The same through a QuerySet
//! let newest = QuerySet::<User>::new().order_by("-id").first(&driver)?;
//! ```

pub mod api;
pub mod driver;
mod error;
pub mod executor;
mod logging;
mod page;
mod queryset;
mod sqlite;

pub use driver::{no_args, Binder, PreparedStatement, SqlCursor, SqlDriver};
pub use error::{OrmError, Result};
pub use logging::{render_arguments, LoggingDriver};
pub use page::{Page, PageRequest};
pub use queryset::QuerySet;
pub use sqlite::{SqliteDriver, StoredRow};

// Re-export commonly used types from rowcast-core
pub use rowcast_core::{
    col, ColumnValue, DataRow, Entity, Expr, Limit, OrderSpec, RowMapper, SqlValue, TableMeta,
};
