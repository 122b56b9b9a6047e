//! Reads tables and columns back out of a materialized database.

use rowcast_orm::{no_args, SqlCursor, SqlDriver};
use tracing::{debug, info};

use crate::error::Result;
use crate::schema::{Column, Table};

const TABLES_SQL: &str = "SELECT name, sql FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name <> 'android_metadata' \
     ORDER BY name";

const COLUMNS_SQL: &str = "SELECT cid, name, type, \"notnull\", dflt_value, pk \
     FROM pragma_table_info(?) ORDER BY cid";

/// Lists user tables with their columns, ordered by table name.
///
/// # Errors
///
/// Returns the driver error if a catalog query fails.
pub fn introspect<D: SqlDriver>(driver: &D) -> Result<Vec<Table>> {
    let rows = driver.execute_query(TABLES_SQL, 0, &no_args)?;
    let mut tables = Vec::with_capacity(rows.len());
    for row in &rows {
        let Some(name) = row.get_string(0) else {
            continue;
        };
        let create_sql = row.get_string(1).unwrap_or_default();
        let table = read_table(driver, &name, &create_sql)?;
        debug!(table = %table.name, columns = table.columns.len(), "Introspected table");
        tables.push(table);
    }
    info!(count = tables.len(), "Introspected tables");
    Ok(tables)
}

fn read_table<D: SqlDriver>(driver: &D, name: &str, create_sql: &str) -> Result<Table> {
    let rows = driver.execute_query(COLUMNS_SQL, 1, &|stmt| stmt.bind_string(0, name))?;
    let columns = rows
        .iter()
        .map(|row| {
            let mut column = Column::new(
                row.get_string(1).unwrap_or_default(),
                row.get_string(2).as_deref(),
            );
            column.nullable = row.get_long(3).unwrap_or(0) == 0;
            column.default_value = row.get_string(4);
            column.primary_key_ordinal = row
                .get_long(5)
                .and_then(|pk| u32::try_from(pk).ok())
                .unwrap_or(0);
            column
        })
        .collect();

    let mut table = Table::new(name, columns);
    if has_autoincrement(create_sql) {
        let candidate = table.auto_increment_candidate().map(|c| c.name.clone());
        if let Some(candidate) = candidate {
            if let Some(column) = table.columns.iter_mut().find(|c| c.name == candidate) {
                column.auto_increment = true;
            }
        }
    }
    Ok(table)
}

fn has_autoincrement(create_sql: &str) -> bool {
    create_sql.to_ascii_uppercase().contains("AUTOINCREMENT")
}
