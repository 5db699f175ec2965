//! Request/query types (Deserialize)

use readoku_core::MAX_PAGE_LIMIT;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ListStoriesQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListStoriesQuery {
    /// Raw page; non-positive or absent values are clamped downstream.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    /// Cap limit to prevent unbounded listings. Absent means the configured default.
    pub fn capped_limit(&self) -> i64 {
        let max = i64::try_from(MAX_PAGE_LIMIT).unwrap_or(i64::MAX);
        self.limit.map_or(0, |l| l.min(max))
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateStoryRequest {
    pub prompt: String,
}
