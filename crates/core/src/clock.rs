//! Reference timezone and half-open time windows.
//!
//! Every day boundary in the system (quota reset, today/week/month/year
//! windows, daily buckets) is computed through one `ReferenceClock`, so the
//! quota tracker and the statistics engine can never disagree on when a day
//! starts. `now` is always passed in by the caller.

use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveTime, Offset, TimeDelta, Utc,
};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TZ_OFFSET_SECS;
use crate::error::CoreError;

/// Fixed-offset timezone that defines calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceClock {
    offset: FixedOffset,
}

impl Default for ReferenceClock {
    fn default() -> Self {
        match FixedOffset::east_opt(DEFAULT_TZ_OFFSET_SECS) {
            Some(offset) => Self { offset },
            None => Self::utc(),
        }
    }
}

impl ReferenceClock {
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    #[must_use]
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Seconds east of UTC.
    #[must_use]
    pub fn offset_secs(&self) -> i32 {
        self.offset.local_minus_utc()
    }

    /// Calendar date of `t` in the reference timezone.
    #[must_use]
    pub fn local_date(&self, t: DateTime<Utc>) -> NaiveDate {
        t.with_timezone(&self.offset).date_naive()
    }

    /// The instant local midnight of `date` begins.
    #[must_use]
    pub fn start_of_date(&self, date: NaiveDate) -> DateTime<Utc> {
        let local_midnight = date.and_time(NaiveTime::MIN);
        let utc_naive = local_midnight - TimeDelta::seconds(i64::from(self.offset_secs()));
        DateTime::from_naive_utc_and_offset(utc_naive, Utc)
    }

    /// Local midnight of the day containing `t`.
    #[must_use]
    pub fn day_start(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        self.start_of_date(self.local_date(t))
    }
}

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }
}

/// The aggregation windows around one `now`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingWindows {
    pub today: TimeRange,
    /// Monday-start ISO week.
    pub week: TimeRange,
    pub month: TimeRange,
    pub year: TimeRange,
    /// Span of the daily series: `[today - (n-1) days, tomorrow)`.
    pub recent: TimeRange,
    /// Dates of the daily series, oldest first, ending today.
    pub recent_dates: Vec<NaiveDate>,
}

impl ReadingWindows {
    /// Compute every window for `now` with a daily series of `days` entries.
    pub fn at(clock: &ReferenceClock, now: DateTime<Utc>, days: u32) -> Result<Self, CoreError> {
        let today = clock.local_date(now);
        let tomorrow = add_days(today, 1)?;

        let weekday = today.weekday().number_from_monday();
        let week_start = sub_days(today, u64::from(weekday - 1))?;
        let week_end = add_days(week_start, 7)?;

        let month_start = today.with_day(1).ok_or(CoreError::DateOutOfRange)?;
        let next_month =
            month_start.checked_add_months(Months::new(1)).ok_or(CoreError::DateOutOfRange)?;

        let year_start =
            NaiveDate::from_ymd_opt(today.year(), 1, 1).ok_or(CoreError::DateOutOfRange)?;
        let next_year =
            year_start.checked_add_months(Months::new(12)).ok_or(CoreError::DateOutOfRange)?;

        let recent_dates = match days.checked_sub(1) {
            Some(back) => {
                let first = sub_days(today, u64::from(back))?;
                first.iter_days().take(days as usize).collect()
            },
            None => Vec::new(),
        };
        let recent_start = recent_dates.first().copied().unwrap_or(tomorrow);

        let range = |from: NaiveDate, to: NaiveDate| {
            TimeRange::new(clock.start_of_date(from), clock.start_of_date(to))
        };

        Ok(Self {
            today: range(today, tomorrow),
            week: range(week_start, week_end),
            month: range(month_start, next_month),
            year: range(year_start, next_year),
            recent: range(recent_start, tomorrow),
            recent_dates,
        })
    }
}

fn add_days(date: NaiveDate, n: u64) -> Result<NaiveDate, CoreError> {
    date.checked_add_days(Days::new(n)).ok_or(CoreError::DateOutOfRange)
}

fn sub_days(date: NaiveDate, n: u64) -> Result<NaiveDate, CoreError> {
    date.checked_sub_days(Days::new(n)).ok_or(CoreError::DateOutOfRange)
}
