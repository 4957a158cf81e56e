use crate::errors::ValidationError;
use crate::models::{DayRecord, Source};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Store and display format for dates (day-first).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// The authoritative set of per-date submission records. The map key is the
/// primary key, so there is never more than one record per calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    days: BTreeMap<NaiveDate, DayRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = (NaiveDate, DayRecord)>) -> Self {
        Self {
            days: records.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<DayRecord> {
        self.days.get(&date).copied()
    }

    /// Records in ascending date order.
    pub fn records(&self) -> impl Iterator<Item = (NaiveDate, DayRecord)> + '_ {
        self.days.iter().map(|(date, record)| (*date, *record))
    }

    /// Merge one day's count into the ledger. Manual entries accumulate
    /// across repeated calls on the same date; synced entries are cumulative
    /// daily totals from the remote source, so the merge keeps the max and
    /// re-fetching the same history is a no-op.
    pub fn upsert(
        &mut self,
        date: NaiveDate,
        count: i64,
        source: Source,
    ) -> Result<(), ValidationError> {
        let count = u64::try_from(count).map_err(|_| ValidationError::NegativeCount(count))?;
        let record = self.days.entry(date).or_default();
        match source {
            Source::Manual => record.manual_count = record.manual_count.saturating_add(count),
            Source::Synced => record.count = record.count.max(count),
        }
        Ok(())
    }

    /// Consecutive days ending at `as_of` whose record has a nonzero total.
    /// With `allow_today_pending`, an unlogged `as_of` does not break the
    /// streak: the walk starts at the day before instead.
    pub fn current_streak(&self, as_of: NaiveDate, allow_today_pending: bool) -> u32 {
        let mut day = as_of;
        if allow_today_pending && !self.qualifies(day) {
            day -= Duration::days(1);
        }

        let mut streak = 0;
        while self.qualifies(day) {
            streak += 1;
            day -= Duration::days(1);
        }
        streak
    }

    fn qualifies(&self, date: NaiveDate) -> bool {
        self.days.get(&date).is_some_and(|record| record.total() > 0)
    }

    /// Dates in `[as_of - window_days, as_of - 1]` with no record at all,
    /// most recent first. `as_of` itself is never reported.
    pub fn missed_days(&self, as_of: NaiveDate, window_days: u32) -> Vec<NaiveDate> {
        (1..=i64::from(window_days))
            .map(|offset| as_of - Duration::days(offset))
            .filter(|date| !self.days.contains_key(date))
            .collect()
    }

    /// Inclusive sum of synced plus manual counts over `[start, end]`.
    pub fn windowed_sum(&self, start: NaiveDate, end: NaiveDate) -> u64 {
        self.days
            .range(start..=end)
            .map(|(_, record)| record.total())
            .sum()
    }

    pub fn total_sum(&self) -> u64 {
        self.days.values().map(DayRecord::total).sum()
    }
}

pub fn parse_day_first(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn synced_merge_keeps_max_in_either_order() {
        let day = date(2024, 4, 1);

        let mut ledger = Ledger::new();
        ledger.upsert(day, 2, Source::Synced).unwrap();
        ledger.upsert(day, 5, Source::Synced).unwrap();
        assert_eq!(ledger.get(day).unwrap().count, 5);

        let mut ledger = Ledger::new();
        ledger.upsert(day, 5, Source::Synced).unwrap();
        ledger.upsert(day, 2, Source::Synced).unwrap();
        assert_eq!(ledger.get(day).unwrap().count, 5);
    }

    #[test]
    fn synced_merge_is_idempotent() {
        let day = date(2024, 4, 1);
        let mut ledger = Ledger::new();
        ledger.upsert(day, 3, Source::Synced).unwrap();
        ledger.upsert(day, 3, Source::Synced).unwrap();
        assert_eq!(ledger.get(day).unwrap().count, 3);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn manual_entries_accumulate() {
        let day = date(2024, 4, 1);
        let mut ledger = Ledger::new();
        ledger.upsert(day, 3, Source::Manual).unwrap();
        ledger.upsert(day, 3, Source::Manual).unwrap();
        assert_eq!(ledger.get(day).unwrap().manual_count, 6);
        assert_eq!(ledger.get(day).unwrap().count, 0);
    }

    #[test]
    fn manual_and_synced_counts_are_tracked_separately() {
        let day = date(2024, 4, 1);
        let mut ledger = Ledger::new();
        ledger.upsert(day, 5, Source::Manual).unwrap();
        assert_eq!(ledger.total_sum(), 5);

        // 3 compares against the synced field only, which starts at 0
        ledger.upsert(day, 3, Source::Synced).unwrap();
        assert_eq!(ledger.get(day).unwrap().count, 3);
        assert_eq!(ledger.get(day).unwrap().manual_count, 5);
        assert_eq!(ledger.total_sum(), 8);
    }

    #[test]
    fn no_duplicate_dates_after_mixed_upserts() {
        let day = date(2024, 4, 1);
        let mut ledger = Ledger::new();
        ledger.upsert(day, 1, Source::Manual).unwrap();
        ledger.upsert(day, 4, Source::Synced).unwrap();
        ledger.upsert(day, 2, Source::Manual).unwrap();
        ledger.upsert(day, 4, Source::Synced).unwrap();
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn negative_count_is_rejected_without_mutation() {
        let day = date(2024, 4, 1);
        let mut ledger = Ledger::new();
        let err = ledger.upsert(day, -1, Source::Manual).unwrap_err();
        assert!(matches!(err, ValidationError::NegativeCount(-1)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn records_iterate_in_ascending_date_order() {
        let mut ledger = Ledger::new();
        ledger.upsert(date(2024, 4, 3), 1, Source::Synced).unwrap();
        ledger.upsert(date(2024, 4, 1), 1, Source::Synced).unwrap();
        ledger.upsert(date(2024, 4, 2), 1, Source::Synced).unwrap();
        let dates: Vec<_> = ledger.records().map(|(d, _)| d).collect();
        assert_eq!(
            dates,
            vec![date(2024, 4, 1), date(2024, 4, 2), date(2024, 4, 3)]
        );
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let today = date(2024, 4, 10);
        let mut ledger = Ledger::new();
        for offset in 0..3 {
            ledger
                .upsert(today - Duration::days(offset), 1, Source::Synced)
                .unwrap();
        }
        assert_eq!(ledger.current_streak(today, false), 3);
    }

    #[test]
    fn streak_stops_at_first_gap() {
        let today = date(2024, 4, 10);
        let mut ledger = Ledger::new();
        ledger.upsert(today, 1, Source::Synced).unwrap();
        ledger
            .upsert(today - Duration::days(5), 1, Source::Synced)
            .unwrap();
        assert_eq!(ledger.current_streak(today, false), 1);
    }

    #[test]
    fn streak_is_zero_when_today_is_unlogged_under_strict_policy() {
        let today = date(2024, 4, 10);
        let mut ledger = Ledger::new();
        ledger
            .upsert(today - Duration::days(1), 1, Source::Synced)
            .unwrap();
        ledger
            .upsert(today - Duration::days(2), 1, Source::Synced)
            .unwrap();
        assert_eq!(ledger.current_streak(today, false), 0);
    }

    #[test]
    fn grace_policy_lets_yesterday_carry_the_streak() {
        let today = date(2024, 4, 10);
        let mut ledger = Ledger::new();
        ledger
            .upsert(today - Duration::days(1), 1, Source::Synced)
            .unwrap();
        ledger
            .upsert(today - Duration::days(2), 1, Source::Synced)
            .unwrap();
        assert_eq!(ledger.current_streak(today, true), 2);
    }

    #[test]
    fn grace_policy_does_not_double_count_a_logged_today() {
        let today = date(2024, 4, 10);
        let mut ledger = Ledger::new();
        ledger.upsert(today, 1, Source::Synced).unwrap();
        ledger
            .upsert(today - Duration::days(1), 1, Source::Synced)
            .unwrap();
        assert_eq!(ledger.current_streak(today, true), 2);
    }

    #[test]
    fn zero_total_records_do_not_qualify_for_streaks() {
        let today = date(2024, 4, 10);
        let mut ledger = Ledger::new();
        ledger.upsert(today, 0, Source::Synced).unwrap();
        assert_eq!(ledger.current_streak(today, false), 0);
    }

    #[test]
    fn missed_days_on_empty_ledger_cover_the_whole_window() {
        let today = date(2024, 4, 10);
        let ledger = Ledger::new();
        let missed = ledger.missed_days(today, 5);
        let expected: Vec<_> = (1..=5).map(|offset| today - Duration::days(offset)).collect();
        assert_eq!(missed, expected);
    }

    #[test]
    fn missed_days_are_most_recent_first_and_skip_recorded_dates() {
        let today = date(2024, 4, 10);
        let mut ledger = Ledger::new();
        ledger
            .upsert(today - Duration::days(2), 1, Source::Synced)
            .unwrap();
        let missed = ledger.missed_days(today, 4);
        assert_eq!(
            missed,
            vec![
                today - Duration::days(1),
                today - Duration::days(3),
                today - Duration::days(4),
            ]
        );
    }

    #[test]
    fn missed_days_never_include_the_as_of_date() {
        let today = date(2024, 4, 10);
        let ledger = Ledger::new();
        assert!(!ledger.missed_days(today, 10).contains(&today));
    }

    #[test]
    fn windowed_sum_is_inclusive_of_both_bounds() {
        let mut ledger = Ledger::new();
        ledger.upsert(date(2024, 4, 1), 2, Source::Synced).unwrap();
        ledger.upsert(date(2024, 4, 3), 3, Source::Manual).unwrap();
        ledger.upsert(date(2024, 4, 5), 7, Source::Synced).unwrap();
        assert_eq!(ledger.windowed_sum(date(2024, 4, 1), date(2024, 4, 3)), 5);
        assert_eq!(ledger.windowed_sum(date(2024, 4, 2), date(2024, 4, 4)), 3);
        assert_eq!(ledger.windowed_sum(date(2024, 4, 1), date(2024, 4, 5)), 12);
    }

    #[test]
    fn week_and_month_starts() {
        // 2024-04-10 is a Wednesday
        assert_eq!(week_start(date(2024, 4, 10)), date(2024, 4, 8));
        assert_eq!(week_start(date(2024, 4, 8)), date(2024, 4, 8));
        assert_eq!(month_start(date(2024, 4, 10)), date(2024, 4, 1));
    }

    #[test]
    fn day_first_dates_parse_and_reject() {
        assert_eq!(parse_day_first("09-04-2024").unwrap(), date(2024, 4, 9));
        assert_eq!(parse_day_first(" 01-12-2023 ").unwrap(), date(2023, 12, 1));
        assert!(parse_day_first("2024-04-09").is_err());
        assert!(parse_day_first("31-02-2024").is_err());
        assert!(parse_day_first("not a date").is_err());
    }
}
