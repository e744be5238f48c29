//! Dashboard overview summary.
//!
//! T023: Implement overview stats (totals, unique names, date range, rate)

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::records::CompletionRecord;

/// Headline numbers for the dashboard overview cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    /// Total number of records.
    pub total_entries: u32,
    /// Number of distinct participant names.
    pub unique_names: u32,
    /// Earliest and latest completion dates, when any records exist.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Entries per calendar month over the spanned range, inclusive.
    pub average_per_month: f64,
}

/// Compute the overview summary for a record snapshot.
pub fn overview(records: &[CompletionRecord]) -> DashboardOverview {
    let unique_names = records
        .iter()
        .map(|r| r.name.as_str())
        .collect::<BTreeSet<_>>()
        .len() as u32;

    let earliest = records.iter().map(|r| r.completion_day()).min();
    let latest = records.iter().map(|r| r.completion_day()).max();

    let (date_range, average_per_month) = match (earliest, latest) {
        (Some(first), Some(last)) => {
            let months_spanned =
                (last.year() - first.year()) * 12 + last.month() as i32 - first.month() as i32 + 1;
            let average = records.len() as f64 / months_spanned as f64;
            (Some((first, last)), average)
        }
        _ => (None, 0.0),
    };

    DashboardOverview {
        total_entries: records.len() as u32,
        unique_names,
        date_range,
        average_per_month,
    }
}
