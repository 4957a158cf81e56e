use crate::ledger::{month_start, Ledger};
use crate::models::{HistoryPoint, MonthPoint, StatsResponse};
use chrono::{Datelike, Duration, Local, NaiveDate};

const ROLLING_WINDOW: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRange {
    All,
    Last30Days,
    ThisYear,
}

impl HistoryRange {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "all" => Some(Self::All),
            "30d" => Some(Self::Last30Days),
            "year" => Some(Self::ThisYear),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Last30Days => "30d",
            Self::ThisYear => "year",
        }
    }

    fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::All => None,
            Self::Last30Days => Some(today - Duration::days(30)),
            Self::ThisYear => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        }
    }
}

pub fn build_stats(ledger: &Ledger, range: HistoryRange, target: u64) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), ledger, range, target)
}

pub fn build_stats_at(
    today: NaiveDate,
    ledger: &Ledger,
    range: HistoryRange,
    target: u64,
) -> StatsResponse {
    let cutoff = range.cutoff(today);

    let mut history = Vec::new();
    let mut window = Vec::new();
    let mut cumulative = 0u64;
    for (date, record) in ledger.records() {
        if cutoff.is_some_and(|cutoff| date < cutoff) {
            continue;
        }

        let total = record.total();
        cumulative = cumulative.saturating_add(total);
        window.push(total);

        // matches a trailing 7-row mean: undefined until the window fills
        let rolling_avg = if window.len() >= ROLLING_WINDOW {
            let sum: u64 = window[window.len() - ROLLING_WINDOW..].iter().sum();
            Some(sum as f64 / ROLLING_WINDOW as f64)
        } else {
            None
        };

        history.push(HistoryPoint {
            date: date.to_string(),
            count: record.count,
            manual_count: record.manual_count,
            total,
            rolling_avg,
            cumulative,
        });
    }

    let mut month = Vec::new();
    let mut day = month_start(today);
    while day <= today {
        month.push(MonthPoint {
            date: day.to_string(),
            total: ledger.get(day).map_or(0, |record| record.total()),
        });
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    let mut milestones: Vec<u64> = [target / 5, target / 2, target]
        .into_iter()
        .filter(|milestone| *milestone > 0)
        .collect();
    milestones.dedup();

    StatsResponse {
        range: range.as_str().to_string(),
        history,
        month,
        milestones,
    }
}
