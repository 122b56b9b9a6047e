//! Select, count and pagination entry points.
//!
//! Generic functions work on any [`TableMeta`] and return [`DataRow`]s or
//! whatever a [`RowMapper`] produces. Typed functions take an [`Entity`]
//! type and resolve its table through the registry.

use rowcast_core::registry::{self, OrmRegistry};
use rowcast_core::{
    build_count, build_select, build_where_clause, DataRow, Entity, Expr, Limit, MapError,
    OrderSpec, RegistryError, RowMapper, TableMeta,
};
use tracing::debug;

use crate::driver::SqlDriver;
use crate::error::Result;
use crate::executor::{execute_scalar, execute_select};
use crate::page::{Page, PageRequest};

/// Selects all columns of `table` as generic rows.
///
/// # Errors
///
/// Returns an error if the criteria cannot be compiled or the query fails.
pub fn select_rows<D: SqlDriver>(
    driver: &D,
    table: &TableMeta,
    criteria: Option<&Expr>,
    order: &[OrderSpec],
    limit: Option<Limit>,
) -> Result<Vec<DataRow>> {
    let stmt = build_select(table, criteria, order, limit)?;
    execute_select(driver, table, &stmt)
}

/// Selects rows of `table` and maps each with `mapper`.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be mapped.
pub fn select_mapped<T, D: SqlDriver>(
    driver: &D,
    table: &TableMeta,
    mapper: &impl RowMapper<T>,
    criteria: Option<&Expr>,
    order: &[OrderSpec],
    limit: Option<Limit>,
) -> Result<Vec<T>> {
    let rows = select_rows(driver, table, criteria, order, limit)?;
    rows.iter()
        .map(|row| mapper.map(row).map_err(Into::into))
        .collect()
}

/// Selects entities, resolving their table through the global registry.
///
/// # Errors
///
/// Returns an error if the registry is not installed, the type id is
/// unknown, the query fails or a row cannot be mapped.
pub fn select<T: Entity, D: SqlDriver>(
    driver: &D,
    criteria: Option<&Expr>,
    order: &[OrderSpec],
    limit: Option<Limit>,
) -> Result<Vec<T>> {
    select_in(driver, registry::global()?, criteria, order, limit)
}

/// Selects entities, resolving their table through `registry`.
///
/// # Errors
///
/// Same as [`select`].
pub fn select_in<T: Entity, D: SqlDriver>(
    driver: &D,
    registry: &dyn OrmRegistry,
    criteria: Option<&Expr>,
    order: &[OrderSpec],
    limit: Option<Limit>,
) -> Result<Vec<T>> {
    let table = table_for::<T>(registry)?;
    select_mapped(driver, table, &T::from_row, criteria, order, limit)
}

/// Counts the rows of `table` matching `criteria`.
///
/// # Errors
///
/// Returns an error if the criteria cannot be compiled or the query fails.
pub fn count<D: SqlDriver>(driver: &D, table: &TableMeta, criteria: Option<&Expr>) -> Result<u64> {
    let where_clause = build_where_clause(criteria)?;
    let stmt = build_count(&table.table_name, &where_clause);
    let n = execute_scalar(driver, &stmt)?;
    Ok(u64::try_from(n).unwrap_or(0))
}

/// Fetches one page of generic rows.
///
/// # Errors
///
/// Returns an error if the criteria cannot be compiled or a query fails.
pub fn page_rows<D: SqlDriver>(
    driver: &D,
    table: &TableMeta,
    criteria: Option<&Expr>,
    order: &[OrderSpec],
    request: PageRequest,
) -> Result<Page<DataRow>> {
    let identity = |row: &DataRow| -> std::result::Result<DataRow, MapError> { Ok(row.clone()) };
    page_mapped(driver, table, &identity, criteria, order, request)
}

/// Fetches one page mapped with `mapper`.
///
/// The COUNT query, when requested, reuses the WHERE fragment and
/// arguments of the page query.
///
/// # Errors
///
/// Returns an error if a query fails or a row cannot be mapped.
pub fn page_mapped<T, D: SqlDriver>(
    driver: &D,
    table: &TableMeta,
    mapper: &impl RowMapper<T>,
    criteria: Option<&Expr>,
    order: &[OrderSpec],
    request: PageRequest,
) -> Result<Page<T>> {
    let limit = request.limit();
    let items = select_mapped(driver, table, mapper, criteria, order, Some(limit))?;
    let total = if request.include_total {
        Some(count(driver, table, criteria)?)
    } else {
        None
    };
    let page = Page::new(items, limit, total);
    debug!(
        table = %table.table_name,
        page = page.page,
        size = page.size,
        items = page.items.len(),
        has_next = page.has_next,
        "Fetched page"
    );
    Ok(page)
}

/// Fetches one page of entities through the global registry.
///
/// # Errors
///
/// Same as [`select`].
pub fn page<T: Entity, D: SqlDriver>(
    driver: &D,
    criteria: Option<&Expr>,
    order: &[OrderSpec],
    request: PageRequest,
) -> Result<Page<T>> {
    let table = table_for::<T>(registry::global()?)?;
    page_mapped(driver, table, &T::from_row, criteria, order, request)
}

pub(crate) fn table_for<T: Entity>(registry: &dyn OrmRegistry) -> Result<&TableMeta> {
    registry
        .by_type_id(T::TYPE_ID)
        .ok_or_else(|| RegistryError::UnknownTypeId(T::TYPE_ID.to_string()).into())
}
