//! Dashboard statistics engine.
//!
//! Pure, synchronous transformations from an in-memory snapshot of
//! [`CompletionRecord`](crate::records::CompletionRecord)s to derived views:
//! - Yearly / monthly / daily totals
//! - Longest streak of consecutive completion days
//! - Longest gap between completion days
//! - Top participant rankings and per-name summaries
//! - Fastest completion and youngest participant lookups
//! - Dashboard overview summary
//!
//! No I/O and no side effects; every operation is idempotent for a given
//! snapshot and safe to call concurrently. Freshness control lives in the
//! caller's cache layer, never here.

pub mod overview;
pub mod rankings;
pub mod streaks;
pub mod totals;

// Re-exports for convenience
pub use overview::{overview, DashboardOverview};
pub use rankings::{
    find_fastest, find_youngest, unique_names, NameSummary, ParticipantRanker, RankedParticipant,
};
pub use streaks::{longest_gap, longest_streak, GapResult, StreakResult};
pub use totals::{
    days_in_month, densify_daily_counts, group_by_year, group_by_year_month, DailyCount,
    MonthlyCount, YearlyCount,
};
