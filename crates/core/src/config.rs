//! Domain configuration loaded once at startup.

use chrono::FixedOffset;

use crate::clock::ReferenceClock;
use crate::constants::{
    DEFAULT_DAILY_GENERATION_LIMIT, DEFAULT_PAGE_LIMIT, DEFAULT_STATS_DAYS, MAX_STATS_DAYS,
};
use crate::env_config::{parse_or_default, parse_strict};
use crate::error::CoreError;
use crate::quota::DailyLimit;

pub const ENV_DAILY_GENERATION_LIMIT: &str = "DAILY_GENERATION_LIMIT";
pub const ENV_STATS_DAYS: &str = "READOKU_STATS_DAYS";
pub const ENV_TZ_OFFSET: &str = "READOKU_TZ_OFFSET";
pub const ENV_DEFAULT_PAGE_LIMIT: &str = "READOKU_DEFAULT_PAGE_LIMIT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    pub daily_limit: DailyLimit,
    /// Length of the zero-filled daily series.
    pub stats_days: u32,
    pub clock: ReferenceClock,
    pub default_page_limit: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            daily_limit: DailyLimit::default(),
            stats_days: DEFAULT_STATS_DAYS,
            clock: ReferenceClock::default(),
            default_page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl LedgerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load from an arbitrary variable lookup.
    ///
    /// A malformed or non-positive daily limit, stats length or timezone
    /// offset is an error; a bad page limit only warns.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let limit: i64 = parse_strict(
            ENV_DAILY_GENERATION_LIMIT,
            lookup(ENV_DAILY_GENERATION_LIMIT).as_deref(),
            i64::from(DEFAULT_DAILY_GENERATION_LIMIT),
        )?;
        let daily_limit = DailyLimit::new(limit)?;

        let stats_days: u32 =
            parse_strict(ENV_STATS_DAYS, lookup(ENV_STATS_DAYS).as_deref(), DEFAULT_STATS_DAYS)?;
        if !(1..=MAX_STATS_DAYS).contains(&stats_days) {
            return Err(CoreError::Config {
                var: ENV_STATS_DAYS,
                reason: format!("must be between 1 and {MAX_STATS_DAYS}, got {stats_days}"),
            });
        }

        let clock = parse_offset(lookup(ENV_TZ_OFFSET).as_deref())?;

        let mut default_page_limit: u64 = parse_or_default(
            ENV_DEFAULT_PAGE_LIMIT,
            lookup(ENV_DEFAULT_PAGE_LIMIT).as_deref(),
            DEFAULT_PAGE_LIMIT,
        );
        if default_page_limit == 0 {
            tracing::warn!(
                var = ENV_DEFAULT_PAGE_LIMIT,
                "page limit must be positive, using default"
            );
            default_page_limit = DEFAULT_PAGE_LIMIT;
        }

        Ok(Self { daily_limit, stats_days, clock, default_page_limit })
    }
}

fn parse_offset(raw: Option<&str>) -> Result<ReferenceClock, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(ReferenceClock::default()),
        Some("Z" | "UTC" | "utc") => Ok(ReferenceClock::utc()),
        Some(v) => v.parse::<FixedOffset>().map(ReferenceClock::new).map_err(|e| {
            CoreError::Config { var: ENV_TZ_OFFSET, reason: format!("{v:?}: {e}") }
        }),
    }
}
