//! HofStats - Hall of Fame Statistics Engine
//!
//! A library for computing dashboard statistics over Hall of Fame entries
//! for an eating challenge. Provides yearly/monthly/daily totals, streak and
//! gap detection, participant rankings, record lookups, SQLite persistence,
//! and a tag-invalidated result cache.

pub mod cache;
pub mod records;
pub mod service;
pub mod stats;
pub mod storage;

// Re-export commonly used types
pub use cache::{CacheTag, StatsCache};
pub use records::CompletionRecord;
pub use service::StatsService;
pub use stats::{
    DailyCount, DashboardOverview, GapResult, MonthlyCount, NameSummary, ParticipantRanker,
    RankedParticipant, StreakResult, YearlyCount,
};
pub use storage::{Database, DatabaseError, EntryStore};
