use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::ISO_DATE_FORMAT;
use crate::ledger::DailyWordCount;

/// Reading volume of one user, recomputed per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_word_count: u64,
    pub today_word_count: u64,
    pub weekly_word_count: u64,
    pub monthly_word_count: u64,
    pub yearly_word_count: u64,
    /// `YYYY-MM-DD` → words, one key per day of the series, zeros included.
    pub daily_word_count_last_n_days: BTreeMap<String, u64>,
}

impl StatsSnapshot {
    /// `today <= week <= month <= year <= total`.
    ///
    /// Only holds for snapshots read from a consistent store: the week may
    /// straddle a month or year boundary, so `week <= month` is not checked.
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        self.today_word_count <= self.weekly_word_count
            && self.today_word_count <= self.monthly_word_count
            && self.monthly_word_count <= self.yearly_word_count
            && self.yearly_word_count <= self.total_word_count
    }
}

/// Build the daily series: every date present, days without rows mapped to 0.
///
/// Rows for dates outside `dates` are ignored.
#[must_use]
pub fn zero_filled_series(dates: &[NaiveDate], rows: &[DailyWordCount]) -> BTreeMap<String, u64> {
    let mut series: BTreeMap<NaiveDate, u64> = dates.iter().map(|d| (*d, 0)).collect();
    for row in rows {
        if let Some(slot) = series.get_mut(&row.date) {
            *slot = slot.saturating_add(row.word_count);
        }
    }
    series.into_iter().map(|(d, n)| (d.format(ISO_DATE_FORMAT).to_string(), n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn fills_missing_days_with_zero() {
        let dates = [date("2024-01-30"), date("2024-01-31"), date("2024-02-01")];
        let rows = [DailyWordCount { date: date("2024-01-31"), word_count: 120 }];
        let series = zero_filled_series(&dates, &rows);
        assert_eq!(series.len(), 3);
        assert_eq!(series["2024-01-30"], 0);
        assert_eq!(series["2024-01-31"], 120);
        assert_eq!(series["2024-02-01"], 0);
    }

    #[test]
    fn ignores_rows_outside_series() {
        let dates = [date("2024-01-31")];
        let rows = [
            DailyWordCount { date: date("2024-01-01"), word_count: 5 },
            DailyWordCount { date: date("2024-01-31"), word_count: 7 },
        ];
        let series = zero_filled_series(&dates, &rows);
        assert_eq!(series.len(), 1);
        assert_eq!(series["2024-01-31"], 7);
    }

    #[test]
    fn keys_serialize_in_date_order() {
        let dates = [date("2023-12-31"), date("2024-01-01")];
        let snapshot = StatsSnapshot {
            daily_word_count_last_n_days: zero_filled_series(&dates, &[]),
            ..StatsSnapshot::default()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let first = json.find("2023-12-31").unwrap();
        let second = json.find("2024-01-01").unwrap();
        assert!(first < second);
    }

    #[test]
    fn nesting_check() {
        let ok = StatsSnapshot {
            total_word_count: 10,
            today_word_count: 1,
            weekly_word_count: 2,
            monthly_word_count: 3,
            yearly_word_count: 4,
            ..StatsSnapshot::default()
        };
        assert!(ok.is_nested());
        let bad = StatsSnapshot { today_word_count: 5, ..ok };
        assert!(!bad.is_nested());
    }
}
