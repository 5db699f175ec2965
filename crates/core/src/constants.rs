//! Shared constants for readoku.

/// Stories a user may generate per calendar day when not configured.
pub const DEFAULT_DAILY_GENERATION_LIMIT: u32 = 10;

/// Length of the zero-filled daily series in the statistics snapshot.
pub const DEFAULT_STATS_DAYS: u32 = 7;

/// Upper bound for the daily series (a year plus a leap day).
pub const MAX_STATS_DAYS: u32 = 366;

/// Page size used when the caller passes a non-positive limit.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Maximum page size accepted from HTTP callers (DoS protection).
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Reference timezone offset east of UTC, in seconds (`+09:00`).
pub const DEFAULT_TZ_OFFSET_SECS: i32 = 9 * 3600;

/// Maximum prompt length in characters accepted for story generation.
pub const MAX_PROMPT_CHARS: usize = 500;

/// Format of the keys in the daily word-count series.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;
