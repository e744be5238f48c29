//! Hall of Fame entry storage operations.
//!
//! T003: Implement EntryStore for entry CRUD and snapshot queries
//!
//! The store is the engine's collaborator: it hands back read-only record
//! snapshots, optionally filtered by year or participant name. Out-of-range
//! numeric columns are demoted to absent on the way out rather than
//! propagated; upstream ingestion is untrusted.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use thiserror::Error;

use crate::records::CompletionRecord;

/// Store for Hall of Fame entries.
pub struct EntryStore<'a> {
    conn: &'a Connection,
}

impl<'a> EntryStore<'a> {
    /// Create a new entry store with a database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert an entry. Fails on duplicate participant numbers.
    pub fn insert(&self, record: &CompletionRecord) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO hall_of_fame_entries
             (participant_number, name, date_str, notes, age, elapsed_time,
              completion_count, parsed_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                record.participant_number,
                record.name,
                record.raw_date_label,
                record.notes,
                record.age_days,
                record.elapsed_seconds,
                record.completion_ordinal,
                record.completion_date.to_rfc3339(),
                now,
                now,
            ],
        )?;

        Ok(())
    }

    /// Fetch all entries, newest completion first.
    pub fn fetch_all(&self) -> Result<Vec<CompletionRecord>, StoreError> {
        self.query_records(
            "SELECT participant_number, name, date_str, notes, age, elapsed_time,
                    completion_count, parsed_date
             FROM hall_of_fame_entries
             ORDER BY parsed_date DESC",
            params![],
        )
    }

    /// Fetch entries whose completion falls in the given calendar year.
    pub fn fetch_by_year(&self, year: i32) -> Result<Vec<CompletionRecord>, StoreError> {
        self.query_records(
            "SELECT participant_number, name, date_str, notes, age, elapsed_time,
                    completion_count, parsed_date
             FROM hall_of_fame_entries
             WHERE CAST(strftime('%Y', parsed_date) AS INTEGER) = ?1
             ORDER BY parsed_date DESC",
            params![year],
        )
    }

    /// Fetch entries for a single participant name, newest first.
    pub fn fetch_by_name(&self, name: &str) -> Result<Vec<CompletionRecord>, StoreError> {
        self.query_records(
            "SELECT participant_number, name, date_str, notes, age, elapsed_time,
                    completion_count, parsed_date
             FROM hall_of_fame_entries
             WHERE name = ?1
             ORDER BY parsed_date DESC",
            params![name],
        )
    }

    /// Total number of entries.
    pub fn count(&self) -> Result<u32, StoreError> {
        let count: u32 =
            self.conn
                .query_row("SELECT COUNT(*) FROM hall_of_fame_entries", [], |row| {
                    row.get(0)
                })?;
        Ok(count)
    }

    fn query_records(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<CompletionRecord>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row??);
        }
        Ok(records)
    }
}

/// Map a result row to a record, demoting out-of-range numeric columns.
fn map_row(row: &Row<'_>) -> rusqlite::Result<Result<CompletionRecord, StoreError>> {
    let participant_number: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let raw_date_label: String = row.get(2)?;
    let notes: Option<String> = row.get(3)?;
    let age: Option<i64> = row.get(4)?;
    let elapsed: Option<i64> = row.get(5)?;
    let ordinal: Option<i64> = row.get(6)?;
    let parsed_date: String = row.get(7)?;

    Ok(build_record(
        participant_number,
        name,
        raw_date_label,
        notes,
        age,
        elapsed,
        ordinal,
        &parsed_date,
    ))
}

#[allow(clippy::too_many_arguments)]
fn build_record(
    participant_number: i64,
    name: String,
    raw_date_label: String,
    notes: Option<String>,
    age: Option<i64>,
    elapsed: Option<i64>,
    ordinal: Option<i64>,
    parsed_date: &str,
) -> Result<CompletionRecord, StoreError> {
    let completion_date = DateTime::parse_from_rfc3339(parsed_date)
        .map_err(|e| StoreError::InvalidDate(e.to_string()))?
        .with_timezone(&Utc);

    let participant_number = u32::try_from(participant_number)
        .map_err(|_| StoreError::InvalidRow(format!("participant_number {}", participant_number)))?;

    Ok(CompletionRecord {
        participant_number,
        name,
        raw_date_label,
        completion_date,
        notes,
        age_days: sanitize_field(participant_number, "age", age, 0),
        elapsed_seconds: sanitize_field(participant_number, "elapsed_time", elapsed, 0),
        completion_ordinal: sanitize_field(participant_number, "completion_count", ordinal, 1),
    })
}

/// Demote a numeric column below `minimum` to absent, with a warning.
fn sanitize_field(
    participant_number: u32,
    column: &str,
    value: Option<i64>,
    minimum: i64,
) -> Option<u32> {
    match value {
        Some(v) if v < minimum || u32::try_from(v).is_err() => {
            tracing::warn!(
                participant_number,
                column,
                value = v,
                "demoting out-of-range column to absent"
            );
            None
        }
        Some(v) => Some(v as u32),
        None => None,
    }
}

/// Errors arising from entry store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored completion date could not be parsed.
    #[error("Invalid stored date: {0}")]
    InvalidDate(String),

    /// A row violated an invariant the schema cannot express.
    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use chrono::TimeZone;

    fn sample(number: u32, name: &str, year: i32, month: u32, day: u32) -> CompletionRecord {
        let mut record = CompletionRecord::new(
            number,
            name,
            Utc.with_ymd_and_hms(year, month, day, 13, 0, 0).unwrap(),
        );
        record.raw_date_label = format!("{}/{}/{}", month, day, year);
        record
    }

    #[test]
    fn test_insert_and_fetch_all_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let store = EntryStore::new(db.connection());

        store.insert(&sample(1, "Alice", 2023, 6, 1)).unwrap();
        store.insert(&sample(2, "Bob", 2024, 2, 10)).unwrap();

        let records = store.fetch_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Bob");
        assert_eq!(records[1].name, "Alice");
    }

    #[test]
    fn test_insert_duplicate_participant_number_fails() {
        let db = Database::open_in_memory().unwrap();
        let store = EntryStore::new(db.connection());

        store.insert(&sample(1, "Alice", 2023, 6, 1)).unwrap();
        assert!(store.insert(&sample(1, "Bob", 2024, 1, 1)).is_err());
    }

    #[test]
    fn test_fetch_by_year() {
        let db = Database::open_in_memory().unwrap();
        let store = EntryStore::new(db.connection());

        store.insert(&sample(1, "Alice", 2023, 6, 1)).unwrap();
        store.insert(&sample(2, "Bob", 2024, 2, 10)).unwrap();
        store.insert(&sample(3, "Carol", 2024, 11, 30)).unwrap();

        let records = store.fetch_by_year(2024).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.completion_day().to_string().starts_with("2024")));
    }

    #[test]
    fn test_fetch_by_name() {
        let db = Database::open_in_memory().unwrap();
        let store = EntryStore::new(db.connection());

        store.insert(&sample(1, "Alice", 2023, 6, 1)).unwrap();
        store.insert(&sample(2, "Alice", 2024, 2, 10)).unwrap();
        store.insert(&sample(3, "Bob", 2024, 3, 1)).unwrap();

        let records = store.fetch_by_name("Alice").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].completion_day().to_string(), "2024-02-10");
    }

    #[test]
    fn test_optional_fields_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let store = EntryStore::new(db.connection());

        let mut record = sample(7, "Dana", 2024, 7, 4);
        record.age_days = Some(4200);
        record.elapsed_seconds = Some(311);
        record.completion_ordinal = Some(2);
        record.notes = Some("second helping".to_string());
        store.insert(&record).unwrap();

        let fetched = &store.fetch_all().unwrap()[0];
        assert_eq!(fetched.age_days, Some(4200));
        assert_eq!(fetched.elapsed_seconds, Some(311));
        assert_eq!(fetched.completion_ordinal, Some(2));
        assert_eq!(fetched.notes.as_deref(), Some("second helping"));
    }

    #[test]
    fn test_negative_columns_demoted_to_absent() {
        let db = Database::open_in_memory().unwrap();
        let store = EntryStore::new(db.connection());

        // Bypass the typed API the way a broken ingestion script would.
        db.connection()
            .execute(
                "INSERT INTO hall_of_fame_entries
                 (participant_number, name, date_str, age, elapsed_time,
                  completion_count, parsed_date, created_at, updated_at)
                 VALUES (9, 'Mallory', 'bad data', -5, -1, 0,
                         '2024-01-01T00:00:00+00:00',
                         '2024-01-01T00:00:00+00:00',
                         '2024-01-01T00:00:00+00:00')",
                [],
            )
            .unwrap();

        let records = store.fetch_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].age_days, None);
        assert_eq!(records[0].elapsed_seconds, None);
        // Zero is not a valid ordinal either.
        assert_eq!(records[0].completion_ordinal, None);
    }

    #[test]
    fn test_count() {
        let db = Database::open_in_memory().unwrap();
        let store = EntryStore::new(db.connection());
        assert_eq!(store.count().unwrap(), 0);

        store.insert(&sample(1, "Alice", 2024, 1, 1)).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }
}
