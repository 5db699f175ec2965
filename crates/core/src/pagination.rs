//! Page arithmetic for story listings.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PAGE_LIMIT;

/// Sanitised page position derived from raw caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub offset: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub current_page: u64,
}

/// Generic paginated result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub total_pages: u64,
    pub current_page: u64,
}

impl<T> Paginated<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total_count: u64, page: PageInfo) -> Self {
        Self { items, total_count, total_pages: page.total_pages, current_page: page.current_page }
    }
}

/// [`paginate_with_default`] using [`DEFAULT_PAGE_LIMIT`].
#[must_use]
pub fn paginate(page: i64, limit: i64, total_count: u64) -> PageInfo {
    paginate_with_default(page, limit, total_count, DEFAULT_PAGE_LIMIT)
}

/// Never fails. `page <= 0` becomes 1, `limit <= 0` becomes `default_limit`.
/// Pages past the end are allowed and simply select nothing.
#[must_use]
pub fn paginate_with_default(
    page: i64,
    limit: i64,
    total_count: u64,
    default_limit: u64,
) -> PageInfo {
    let current_page = u64::try_from(page).ok().filter(|p| *p > 0).unwrap_or(1);
    let limit =
        u64::try_from(limit).ok().filter(|l| *l > 0).unwrap_or_else(|| default_limit.max(1));
    let offset = (current_page - 1).saturating_mul(limit);
    let total_pages = total_count.div_ceil(limit);
    PageInfo { offset, limit, total_pages, current_page }
}
