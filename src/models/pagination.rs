//! Page-based pagination shared by list endpoints.

use serde::Serialize;

use crate::config::PaginationConfig;

/// A resolved page request: 1-based page number and a bounded page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Page {
    /// Resolve raw `page`/`limit` query values against the configured bounds.
    ///
    /// Missing or zero `page` becomes 1; missing or zero `limit` becomes the
    /// default, and any limit is capped at `max_limit`.
    pub fn resolve(page: Option<u32>, limit: Option<u32>, cfg: &PaginationConfig) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(cfg.default_limit)
            .min(cfg.max_limit);
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }

    pub fn limit(&self) -> i64 {
        self.limit as i64
    }
}

/// List response envelope: `{ data, total, page, limit }`.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, page: Page) -> Self {
        Self {
            data,
            total,
            page: page.page,
            limit: page.limit,
        }
    }
}
