//! Best-effort DDL replay into an empty in-memory database.

use rowcast_orm::{SqlDriver, SqliteDriver};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;

/// A statement that failed to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedStatement {
    /// 0-based position in the replayed list.
    pub index: usize,
    /// The statement text.
    pub sql: String,
    /// Driver error message.
    pub error: String,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterializeReport {
    /// Statements applied successfully.
    pub applied: usize,
    /// Statements that failed and were skipped.
    pub skipped: Vec<SkippedStatement>,
}

/// Opens a fresh in-memory database and replays `statements` into it.
///
/// # Errors
///
/// Only if the database cannot be opened; failing statements are
/// reported in the [`MaterializeReport`] instead.
pub fn materialize(statements: &[String]) -> Result<(SqliteDriver, MaterializeReport)> {
    let driver = SqliteDriver::in_memory()?;
    driver.execute("PRAGMA foreign_keys = ON")?;
    let report = apply(&driver, statements);
    Ok((driver, report))
}

/// Applies `statements` in order, logging and skipping the ones that fail.
pub fn apply<D: SqlDriver>(driver: &D, statements: &[String]) -> MaterializeReport {
    let mut report = MaterializeReport::default();
    for (index, sql) in statements.iter().enumerate() {
        match driver.execute(sql) {
            Ok(_) => report.applied += 1,
            Err(e) => {
                warn!(index, error = %e, "Skipping DDL statement that failed to apply");
                report.skipped.push(SkippedStatement {
                    index,
                    sql: sql.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    info!(
        applied = report.applied,
        skipped = report.skipped.len(),
        "Materialized schema"
    );
    report
}
