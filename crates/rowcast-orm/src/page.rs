//! Pagination results.

use rowcast_core::Limit;

/// A page request. Page and size below 1 are clamped to 1 when executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    /// Items per page.
    pub size: i64,
    /// Whether to run a COUNT query for the total.
    pub include_total: bool,
}

impl PageRequest {
    /// Requests `page` of `size` items without a total.
    #[must_use]
    pub const fn new(page: i64, size: i64) -> Self {
        Self {
            page,
            size,
            include_total: false,
        }
    }

    /// Also counts the total number of matching rows.
    #[must_use]
    pub const fn with_total(mut self) -> Self {
        self.include_total = true;
        self
    }

    /// The `LIMIT`/`OFFSET` for this page.
    #[must_use]
    pub fn limit(&self) -> Limit {
        Limit::page(self.page, self.size)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based page number, after clamping.
    pub page: u64,
    /// Page size, after clamping.
    pub size: u64,
    /// Total matching rows, when requested.
    pub total: Option<u64>,
    /// Whether another page follows.
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Builds a page from the items fetched with `limit`.
    ///
    /// With a total, `has_next` compares the end of this page against it;
    /// without one, a full page is assumed to have a successor. A zero
    /// `limit` is numbered as a page size of 1 and never has a successor
    /// unless the total says so.
    #[must_use]
    pub fn new(items: Vec<T>, limit: Limit, total: Option<u64>) -> Self {
        let fetched = items.len() as u64;
        let has_next = match total {
            Some(total) => limit.offset.saturating_add(fetched) < total,
            None => limit.limit > 0 && fetched == limit.limit,
        };
        Self {
            items,
            page: limit.offset / limit.limit.max(1) + 1,
            size: limit.limit,
            total,
            has_next,
        }
    }

    /// Maps the items, keeping the paging fields.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total: self.total,
            has_next: self.has_next,
        }
    }
}
