//! Database schema definitions for HofStats.
//!
//! T001: Define database schema SQL

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Hall of Fame entries
CREATE TABLE IF NOT EXISTS hall_of_fame_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    participant_number INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    date_str TEXT NOT NULL,
    notes TEXT,
    age INTEGER,
    elapsed_time INTEGER,
    completion_count INTEGER,
    parsed_date TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_entries_parsed_date
    ON hall_of_fame_entries(parsed_date);
CREATE INDEX IF NOT EXISTS idx_entries_name
    ON hall_of_fame_entries(name);
"#;

/// SQL for the schema version tracking table.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;
