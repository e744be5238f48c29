//! Yearly, monthly, and daily completion totals.
//!
//! T020: Implement grouped totals with densified daily series

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::records::CompletionRecord;

/// Number of completions in a calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyCount {
    pub year: i32,
    pub count: u32,
}

/// Number of completions in a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
    pub count: u32,
}

/// Number of completions on a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// Group records by the calendar year of their completion date.
///
/// Returns one entry per distinct year present, ascending by year. Empty
/// input yields an empty vector.
pub fn group_by_year(records: &[CompletionRecord]) -> Vec<YearlyCount> {
    let mut counts: BTreeMap<i32, u32> = BTreeMap::new();
    for record in records {
        *counts.entry(record.completion_day().year()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(year, count)| YearlyCount { year, count })
        .collect()
}

/// Group records by (year, month), optionally restricted to a single year.
///
/// Ascending by year then month. Only months with at least one record appear;
/// this view is sparse, unlike [`densify_daily_counts`].
pub fn group_by_year_month(
    records: &[CompletionRecord],
    year_filter: Option<i32>,
) -> Vec<MonthlyCount> {
    let mut counts: BTreeMap<(i32, u32), u32> = BTreeMap::new();
    for record in records {
        let day = record.completion_day();
        if let Some(year) = year_filter {
            if day.year() != year {
                continue;
            }
        }
        *counts.entry((day.year(), day.month())).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((year, month), count)| MonthlyCount { year, month, count })
        .collect()
}

/// Per-day completion counts for one month, with every calendar day present.
///
/// Produces exactly `days_in_month(year, month)` entries in ascending day
/// order, filling zero for days without records. Records outside the given
/// month are ignored; matching is by exact calendar date after truncating
/// time-of-day.
pub fn densify_daily_counts(
    records: &[CompletionRecord],
    year: i32,
    month: u32,
) -> Vec<DailyCount> {
    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for record in records {
        let day = record.completion_day();
        if day.year() == year && day.month() == month {
            *counts.entry(day).or_insert(0) += 1;
        }
    }

    let mut series = Vec::with_capacity(days_in_month(year, month) as usize);
    for day in 1..=days_in_month(year, month) {
        // Day numbers come straight from days_in_month, so this cannot fail
        // for any month chrono can represent.
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            series.push(DailyCount {
                date,
                count: counts.get(&date).copied().unwrap_or(0),
            });
        }
    }

    series
}

/// Number of days in the given month, accounting for leap years.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date,
        None => return 0,
    };
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    match next_month {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        None => 0,
    }
}
