//! Hall of Fame completion record.
//!
//! T010: Define CompletionRecord struct with optional measurement fields

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One instance of a participant finishing the challenge on a given date.
///
/// Records are immutable snapshots handed to the statistics engine; the
/// engine never mutates them. Optional fields reflect incomplete historical
/// data rather than error states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Unique positive identifier assigned at ingestion.
    pub participant_number: u32,
    /// Display name; not unique across records (repeat finishers share it).
    pub name: String,
    /// Original free-text date string as recorded. Display only.
    pub raw_date_label: String,
    /// Completion timestamp. Only the calendar date matters for aggregation.
    pub completion_date: DateTime<Utc>,
    /// Optional free-text notes.
    pub notes: Option<String>,
    /// Participant's age at completion, in days.
    pub age_days: Option<u32>,
    /// Time taken to complete the challenge, in seconds.
    pub elapsed_seconds: Option<u32>,
    /// Nth completion by this participant. May exceed the number of rows
    /// actually recorded for the name (missing historical entries).
    pub completion_ordinal: Option<u32>,
}

impl CompletionRecord {
    /// Create a record with only the required fields set.
    pub fn new(
        participant_number: u32,
        name: impl Into<String>,
        completion_date: DateTime<Utc>,
    ) -> Self {
        Self {
            participant_number,
            name: name.into(),
            raw_date_label: String::new(),
            completion_date,
            notes: None,
            age_days: None,
            elapsed_seconds: None,
            completion_ordinal: None,
        }
    }

    /// Calendar date of the completion, with time-of-day truncated.
    pub fn completion_day(&self) -> NaiveDate {
        self.completion_date.date_naive()
    }

    /// Completion ordinal usable for ranking: zero is not a valid ordinal
    /// and is treated as absent.
    pub fn valid_ordinal(&self) -> Option<u32> {
        match self.completion_ordinal {
            Some(0) => {
                tracing::warn!(
                    participant_number = self.participant_number,
                    "ignoring zero completion_ordinal"
                );
                None
            }
            other => other,
        }
    }
}
