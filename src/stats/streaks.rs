//! Streak and gap detection over completion dates.
//!
//! T021: Implement longest streak and longest gap scans
//!
//! Both scans reduce the input to its distinct set of calendar dates first,
//! so duplicate same-day records never inflate a streak or shrink a gap.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::records::CompletionRecord;

/// Longest run of consecutive calendar days each having at least one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResult {
    /// Number of consecutive represented days, not record count.
    pub length_days: u32,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl StreakResult {
    /// Result shape for an empty record set.
    pub fn empty() -> Self {
        Self {
            length_days: 0,
            start: None,
            end: None,
        }
    }
}

/// Longest run of fully-empty calendar days between two record dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapResult {
    /// Number of empty days strictly between the bounding dates.
    pub gap_days: u32,
    /// Last represented day before the gap.
    pub start: Option<NaiveDate>,
    /// First represented day after the gap.
    pub end: Option<NaiveDate>,
}

impl GapResult {
    /// Result shape when no gap exists.
    pub fn empty() -> Self {
        Self {
            gap_days: 0,
            start: None,
            end: None,
        }
    }
}

/// Distinct calendar dates across all records, ascending.
fn distinct_dates(records: &[CompletionRecord]) -> Vec<NaiveDate> {
    let set: BTreeSet<NaiveDate> = records.iter().map(|r| r.completion_day()).collect();
    set.into_iter().collect()
}

/// Find the longest streak of consecutive completion days.
///
/// A single distinct date counts as a streak of length 1. On ties, the first
/// streak reaching the maximum length wins.
pub fn longest_streak(records: &[CompletionRecord]) -> StreakResult {
    let dates = distinct_dates(records);
    if dates.is_empty() {
        return StreakResult::empty();
    }

    let mut longest = 1u32;
    let mut current = 1u32;
    let mut streak_start = dates[0];
    let mut streak_end = dates[0];
    let mut current_start = dates[0];

    for pair in dates.windows(2) {
        let day_diff = pair[1].signed_duration_since(pair[0]).num_days();

        if day_diff == 1 {
            current += 1;
        } else {
            if current > longest {
                longest = current;
                streak_start = current_start;
                streak_end = pair[0];
            }
            current = 1;
            current_start = pair[1];
        }
    }

    // The final run is never closed by the loop.
    if current > longest {
        longest = current;
        streak_start = current_start;
        streak_end = dates[dates.len() - 1];
    }

    StreakResult {
        length_days: longest,
        start: Some(streak_start),
        end: Some(streak_end),
    }
}

/// Find the longest gap between two chronologically adjacent completion days.
///
/// Adjacent calendar days yield a gap of zero. With fewer than two distinct
/// dates, or when no pair of dates has an empty day between them, the bounds
/// stay `None`. On ties, the first maximal gap wins.
pub fn longest_gap(records: &[CompletionRecord]) -> GapResult {
    let dates = distinct_dates(records);
    if dates.len() < 2 {
        return GapResult::empty();
    }

    let mut result = GapResult::empty();

    for pair in dates.windows(2) {
        let gap = pair[1].signed_duration_since(pair[0]).num_days() as u32 - 1;

        if gap > result.gap_days {
            result = GapResult {
                gap_days: gap,
                start: Some(pair[0]),
                end: Some(pair[1]),
            };
        }
    }

    result
}
