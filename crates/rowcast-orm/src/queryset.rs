//! QuerySet implementation for lazy, chainable entity queries.
//!
//! QuerySets are lazy: nothing runs until a terminal method such as
//! `fetch()`, `first()` or `count()` is called with a driver.

use std::fmt;
use std::marker::PhantomData;

use rowcast_core::criteria::and;
use rowcast_core::registry::{self, OrmRegistry};
use rowcast_core::{build_select, Entity, Expr, Limit, OrderSpec, TableMeta};

use crate::api::{count, page_mapped, table_for};
use crate::driver::SqlDriver;
use crate::error::{OrmError, Result};
use crate::executor::execute_select;
use crate::page::{Page, PageRequest};

/// A lazy, chainable query over one entity type.
///
/// # Example
///
/// ```ignore
/// let adults = QuerySet::<User>::new()
///     .filter(col("age").ge(18))
///     .exclude(col("name").starts_with("test"))
///     .order_by("-age")
///     .limit(10)
///     .fetch(&driver)?;
/// ```
pub struct QuerySet<'r, T: Entity> {
    /// Explicit registry; the global one when `None`.
    registry: Option<&'r dyn OrmRegistry>,
    /// Filter expressions (combined with AND)
    filters: Vec<Expr>,
    /// Exclude expressions (each negated, then AND-ed)
    excludes: Vec<Expr>,
    order_by: Vec<OrderSpec>,
    limit: Option<u64>,
    offset: Option<u64>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> fmt::Debug for QuerySet<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuerySet")
            .field("type_id", &T::TYPE_ID)
            .field("filters", &self.filters)
            .field("excludes", &self.excludes)
            .field("order_by", &self.order_by)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

// Manual Clone implementation to avoid T: Clone bound
impl<T: Entity> Clone for QuerySet<'_, T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry,
            filters: self.filters.clone(),
            excludes: self.excludes.clone(),
            order_by: self.order_by.clone(),
            limit: self.limit,
            offset: self.offset,
            _marker: PhantomData,
        }
    }
}

impl<T: Entity> Default for QuerySet<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r, T: Entity> QuerySet<'r, T> {
    /// Creates an empty QuerySet resolving its table through the global
    /// registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registry: None,
            filters: Vec::new(),
            excludes: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            _marker: PhantomData,
        }
    }

    /// Creates an empty QuerySet resolving its table through `registry`.
    #[must_use]
    pub fn with_registry(registry: &'r dyn OrmRegistry) -> Self {
        let mut qs = Self::new();
        qs.registry = Some(registry);
        qs
    }

    /// Adds a filter. Multiple filters are combined with AND.
    #[must_use]
    pub fn filter(mut self, expr: Expr) -> Self {
        self.filters.push(expr);
        self
    }

    /// Excludes rows matching `expr`.
    #[must_use]
    pub fn exclude(mut self, expr: Expr) -> Self {
        self.excludes.push(expr);
        self
    }

    /// Appends an ordering. Use a `-` prefix for descending order.
    #[must_use]
    pub fn order_by(mut self, spec: &str) -> Self {
        self.order_by.push(OrderSpec::parse(spec));
        self
    }

    /// Limits the number of results.
    #[must_use]
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Skips the first `n` results.
    #[must_use]
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// The combined criteria, or `None` when nothing filters the rows.
    #[must_use]
    pub fn criteria(&self) -> Option<Expr> {
        let conditions = self
            .filters
            .iter()
            .cloned()
            .chain(self.excludes.iter().cloned().map(Expr::not));
        and(conditions).ok()
    }

    fn bounds(&self) -> Option<Limit> {
        match (self.limit, self.offset) {
            (Some(limit), offset) => Some(Limit::new(limit, offset.unwrap_or(0))),
            // SQLite needs a LIMIT before OFFSET; it is saturated to i64::MAX.
            (None, Some(offset)) => Some(Limit::new(u64::MAX, offset)),
            (None, None) => None,
        }
    }

    fn table(&self) -> Result<&'r TableMeta> {
        match self.registry {
            Some(registry) => table_for::<T>(registry),
            None => Ok(registry::lookup_by_type_id(T::TYPE_ID)?),
        }
    }

    /// Executes the query and returns all matching entities.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be resolved, the query fails
    /// or a row cannot be mapped.
    pub fn fetch<D: SqlDriver>(&self, driver: &D) -> Result<Vec<T>> {
        let table = self.table()?;
        let criteria = self.criteria();
        let stmt = build_select(table, criteria.as_ref(), &self.order_by, self.bounds())?;
        execute_select(driver, table, &stmt)?
            .iter()
            .map(|row| T::from_row(row).map_err(OrmError::from))
            .collect()
    }

    /// Returns the first matching entity, if any.
    ///
    /// # Errors
    ///
    /// Same as [`QuerySet::fetch`].
    pub fn first<D: SqlDriver>(&self, driver: &D) -> Result<Option<T>> {
        let items = self.clone().limit(1).fetch(driver)?;
        Ok(items.into_iter().next())
    }

    /// Returns exactly one matching entity.
    ///
    /// # Errors
    ///
    /// [`OrmError::NotFound`] or [`OrmError::MultipleObjectsReturned`] when
    /// zero or several rows match, otherwise as [`QuerySet::fetch`].
    pub fn get<D: SqlDriver>(&self, driver: &D) -> Result<T> {
        let mut items = self.clone().limit(2).fetch(driver)?;
        match items.len() {
            0 => Err(OrmError::NotFound),
            1 => items.pop().ok_or(OrmError::NotFound),
            _ => Err(OrmError::MultipleObjectsReturned),
        }
    }

    /// Counts matching rows. Ordering, limit and offset are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be resolved or the query fails.
    pub fn count<D: SqlDriver>(&self, driver: &D) -> Result<u64> {
        count(driver, self.table()?, self.criteria().as_ref())
    }

    /// Returns whether any row matches.
    ///
    /// # Errors
    ///
    /// Same as [`QuerySet::count`].
    pub fn exists<D: SqlDriver>(&self, driver: &D) -> Result<bool> {
        Ok(self.count(driver)? > 0)
    }

    /// Fetches one page. The QuerySet's own limit and offset are replaced
    /// by the page bounds.
    ///
    /// # Errors
    ///
    /// Same as [`QuerySet::fetch`].
    pub fn page<D: SqlDriver>(&self, driver: &D, request: PageRequest) -> Result<Page<T>> {
        let criteria = self.criteria();
        page_mapped(
            driver,
            self.table()?,
            &T::from_row,
            criteria.as_ref(),
            &self.order_by,
            request,
        )
    }
}
