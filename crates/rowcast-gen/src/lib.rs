//! Build-time generator for rowcast.
//!
//! `rowcast-gen` turns a directory of SQL schema and migration files (or an
//! existing database snapshot) into Rust source declaring typed table
//! metadata, entity structs and row mappers for the `rowcast-orm` runtime.
//!
//! # Pipeline
//!
//! - **Source** - collects schema files and extracts the DDL statements
//! - **Materialize** - replays the DDL into an in-memory database, skipping
//!   statements that fail
//! - **Introspect** - reads tables and columns back from the catalog
//! - **Types** - resolves the Rust type of every column
//! - **Codegen** - renders the final source file
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use rowcast_gen::{generate, GeneratorConfig, SchemaSource};
//!
//! let source = SchemaSource::Directory(PathBuf::from("src/main/sqldelight"));
//! let code = generate(&source, &GeneratorConfig::default()).unwrap();
//! std::fs::write("src/schema.rs", code).unwrap();
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Generate Rust source from a schema directory
//! rowcast-gen generate --schema-dir schema --output src/schema.rs
//!
//! # Print the introspected tables as JSON
//! rowcast-gen inspect --schema-dir schema
//!
//! # Print the extracted DDL statements
//! rowcast-gen ddl --schema-dir schema
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod introspect;
pub mod materialize;
pub mod schema;
pub mod source;
pub mod types;

use rowcast_orm::SqliteDriver;
use tracing::info;

pub use config::GeneratorConfig;
pub use error::{GenError, Result};
pub use materialize::{MaterializeReport, SkippedStatement};
pub use schema::{Column, Table};
pub use source::SchemaSource;

/// Reads the schema from `source` and returns its tables.
///
/// A directory is replayed in memory first and the replay report is
/// returned alongside the tables; a snapshot is opened read-only and has
/// no report.
///
/// # Errors
///
/// Missing directory or snapshot, IO errors, or a catalog query failure.
/// DDL statements that fail to apply are not errors.
pub fn load_schema(
    source: &SchemaSource,
    config: &GeneratorConfig,
) -> Result<(Vec<Table>, Option<MaterializeReport>)> {
    match source {
        SchemaSource::Directory(root) => {
            let statements = source::read_ddl(root, config)?;
            let (driver, report) = materialize::materialize(&statements)?;
            let tables = introspect::introspect(&driver)?;
            Ok((tables, Some(report)))
        }
        SchemaSource::Snapshot(path) => {
            if !path.is_file() {
                return Err(GenError::SnapshotNotFound(path.clone()));
            }
            info!(path = %path.display(), "Opening schema snapshot");
            let driver = SqliteDriver::open_read_only(path)?;
            Ok((introspect::introspect(&driver)?, None))
        }
    }
}

/// Runs the whole pipeline and returns the generated source.
///
/// # Errors
///
/// Same as [`load_schema`], plus invalid type hints.
pub fn generate(source: &SchemaSource, config: &GeneratorConfig) -> Result<String> {
    let (tables, _) = load_schema(source, config)?;
    let code = codegen::render(&tables, config)?;
    info!(tables = tables.len(), "Generated source");
    Ok(code)
}
