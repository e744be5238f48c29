//! Participant rankings and record lookups.
//!
//! T022: Implement top-participant ranking, fastest and youngest lookups

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::records::CompletionRecord;

/// A participant with their reported completion count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedParticipant {
    pub name: String,
    pub count: u32,
}

/// Ranks participants by completion count.
///
/// The reported count per name is the larger of the number of records seen
/// and the highest `completion_ordinal` claimed by any of them. The ordinal
/// hint compensates for historical entries that were never ingested as rows;
/// whether that is intentional business logic or a workaround for dirty data
/// is an open question upstream, so it can be switched off.
pub struct ParticipantRanker {
    /// Minimum reported count for inclusion (default: 2).
    minimum_count: u32,
    /// Whether `completion_ordinal` may raise a participant's count.
    trust_ordinal_hint: bool,
}

impl ParticipantRanker {
    /// Create with default settings (count >= 2, ordinal hint trusted).
    pub fn new() -> Self {
        Self {
            minimum_count: 2,
            trust_ordinal_hint: true,
        }
    }

    /// Set the minimum reported count for inclusion.
    pub fn with_minimum_count(mut self, minimum_count: u32) -> Self {
        self.minimum_count = minimum_count;
        self
    }

    /// Disable the ordinal hint; counts come from record occurrences alone.
    pub fn without_ordinal_hint(mut self) -> Self {
        self.trust_ordinal_hint = false;
        self
    }

    /// Rank participants with at least `minimum_count` completions,
    /// descending by count, ties broken ascending by name.
    ///
    /// Name comparison is case-sensitive `Ord` on `String`, which is stable
    /// and total.
    pub fn rank(&self, records: &[CompletionRecord]) -> Vec<RankedParticipant> {
        // occurrence count and max ordinal per name
        let mut stats: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
        for record in records {
            let entry = stats.entry(record.name.as_str()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 = entry.1.max(record.valid_ordinal().unwrap_or(1));
        }

        let mut ranked: Vec<RankedParticipant> = stats
            .into_iter()
            .map(|(name, (occurrences, max_ordinal))| {
                let count = if self.trust_ordinal_hint {
                    occurrences.max(max_ordinal)
                } else {
                    occurrences
                };
                RankedParticipant {
                    name: name.to_string(),
                    count,
                }
            })
            .filter(|p| p.count >= self.minimum_count)
            .collect();

        // BTreeMap iteration already yields names ascending, so a stable
        // sort on descending count preserves the alphabetical tie-break.
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }
}

impl Default for ParticipantRanker {
    fn default() -> Self {
        Self::new()
    }
}

/// A participant's name with their first completion date and entry count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSummary {
    pub name: String,
    /// Calendar date of the participant's earliest record.
    pub first_entry: chrono::NaiveDate,
    /// Number of records for this name (no ordinal compensation).
    pub total_entries: u32,
}

/// Per-name summaries, descending by entry count, capped at `limit`.
///
/// Ties break ascending by name so the output is deterministic. Counts come
/// from record occurrences alone; the ordinal hint belongs to
/// [`ParticipantRanker`], not this listing.
pub fn unique_names(records: &[CompletionRecord], limit: usize) -> Vec<NameSummary> {
    let mut stats: BTreeMap<&str, (chrono::NaiveDate, u32)> = BTreeMap::new();
    for record in records {
        let day = record.completion_day();
        let entry = stats.entry(record.name.as_str()).or_insert((day, 0));
        entry.0 = entry.0.min(day);
        entry.1 += 1;
    }

    let mut summaries: Vec<NameSummary> = stats
        .into_iter()
        .map(|(name, (first_entry, total_entries))| NameSummary {
            name: name.to_string(),
            first_entry,
            total_entries,
        })
        .collect();

    // BTreeMap iteration yields names ascending; the stable sort keeps that
    // as the tie-break.
    summaries.sort_by(|a, b| b.total_entries.cmp(&a.total_entries));
    summaries.truncate(limit);
    summaries
}

/// The record with the smallest present `elapsed_seconds`, if any.
///
/// Ties go to the first record in input order.
pub fn find_fastest(records: &[CompletionRecord]) -> Option<&CompletionRecord> {
    records
        .iter()
        .filter(|r| r.elapsed_seconds.is_some())
        .min_by_key(|r| r.elapsed_seconds)
}

/// The record with the smallest present `age_days`, if any.
///
/// Ties go to the first record in input order.
pub fn find_youngest(records: &[CompletionRecord]) -> Option<&CompletionRecord> {
    records
        .iter()
        .filter(|r| r.age_days.is_some())
        .min_by_key(|r| r.age_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(number: u32, name: &str) -> CompletionRecord {
        CompletionRecord::new(
            number,
            name,
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        )
    }

    fn records_named(names: &[&str]) -> Vec<CompletionRecord> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| record(i as u32 + 1, name))
            .collect()
    }

    #[test]
    fn test_rank_filters_below_minimum() {
        let records = records_named(&["Alice", "Alice", "Alice", "Bob", "Carol", "Carol"]);

        let ranked = ParticipantRanker::new().rank(&records);
        assert_eq!(
            ranked,
            vec![
                RankedParticipant { name: "Alice".to_string(), count: 3 },
                RankedParticipant { name: "Carol".to_string(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_rank_alphabetical_tie_break() {
        let records = records_named(&["Dan", "Amy", "Dan", "Amy"]);

        let ranked = ParticipantRanker::new().rank(&records);
        assert_eq!(ranked[0].name, "Amy");
        assert_eq!(ranked[1].name, "Dan");
        assert_eq!(ranked[0].count, 2);
    }

    #[test]
    fn test_rank_ordinal_hint_raises_count() {
        let mut records = records_named(&["Eve"]);
        records[0].completion_ordinal = Some(5);

        let ranked = ParticipantRanker::new().rank(&records);
        assert_eq!(
            ranked,
            vec![RankedParticipant { name: "Eve".to_string(), count: 5 }]
        );
    }

    #[test]
    fn test_rank_ordinal_hint_never_lowers_count() {
        let mut records = records_named(&["Eve", "Eve", "Eve"]);
        records[0].completion_ordinal = Some(2);

        let ranked = ParticipantRanker::new().rank(&records);
        assert_eq!(ranked[0].count, 3);
    }

    #[test]
    fn test_rank_without_ordinal_hint() {
        let mut records = records_named(&["Eve"]);
        records[0].completion_ordinal = Some(5);

        let ranked = ParticipantRanker::new().without_ordinal_hint().rank(&records);
        // A single occurrence no longer qualifies.
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_custom_minimum() {
        let records = records_named(&["Alice", "Bob"]);

        let ranked = ParticipantRanker::new().with_minimum_count(1).rank(&records);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "Alice");
    }

    #[test]
    fn test_rank_empty() {
        assert!(ParticipantRanker::new().rank(&[]).is_empty());
    }

    #[test]
    fn test_unique_names_counts_and_order() {
        let records = records_named(&["Alice", "Bob", "Alice", "Carol", "Alice", "Carol"]);

        let summaries = unique_names(&records, 20);
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].name, "Alice");
        assert_eq!(summaries[0].total_entries, 3);
        // Bob and Carol resolve by count, Carol first.
        assert_eq!(summaries[1].name, "Carol");
        assert_eq!(summaries[2].name, "Bob");
    }

    #[test]
    fn test_unique_names_first_entry_is_earliest_date() {
        let mut records = vec![
            record(1, "Alice"),
            record(2, "Alice"),
        ];
        records[0].completion_date = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        records[1].completion_date = Utc.with_ymd_and_hms(2022, 3, 15, 12, 0, 0).unwrap();

        let summaries = unique_names(&records, 20);
        assert_eq!(
            summaries[0].first_entry,
            chrono::NaiveDate::from_ymd_opt(2022, 3, 15).unwrap()
        );
        assert_eq!(summaries[0].total_entries, 2);
    }

    #[test]
    fn test_unique_names_tie_breaks_alphabetically() {
        let records = records_named(&["Dan", "Amy", "Dan", "Amy"]);

        let summaries = unique_names(&records, 20);
        assert_eq!(summaries[0].name, "Amy");
        assert_eq!(summaries[1].name, "Dan");
    }

    #[test]
    fn test_unique_names_respects_limit() {
        let records = records_named(&["A", "B", "C", "D"]);

        let summaries = unique_names(&records, 2);
        assert_eq!(summaries.len(), 2);
    }

    #[test]
    fn test_unique_names_empty() {
        assert!(unique_names(&[], 20).is_empty());
    }

    #[test]
    fn test_find_fastest() {
        let mut records = records_named(&["A", "B", "C"]);
        records[0].elapsed_seconds = Some(300);
        records[2].elapsed_seconds = Some(180);

        let fastest = find_fastest(&records).unwrap();
        assert_eq!(fastest.name, "C");
    }

    #[test]
    fn test_find_fastest_none_when_field_absent() {
        let records = records_named(&["A", "B"]);
        assert!(find_fastest(&records).is_none());
        assert!(find_fastest(&[]).is_none());
    }

    #[test]
    fn test_find_fastest_tie_goes_to_first() {
        let mut records = records_named(&["A", "B"]);
        records[0].elapsed_seconds = Some(200);
        records[1].elapsed_seconds = Some(200);

        assert_eq!(find_fastest(&records).unwrap().name, "A");
    }

    #[test]
    fn test_find_youngest() {
        let mut records = records_named(&["A", "B"]);
        records[0].age_days = Some(9000);
        records[1].age_days = Some(4500);

        assert_eq!(find_youngest(&records).unwrap().name, "B");
    }

    #[test]
    fn test_find_youngest_none_when_field_absent() {
        let records = records_named(&["A"]);
        assert!(find_youngest(&records).is_none());
        assert!(find_youngest(&[]).is_none());
    }
}
