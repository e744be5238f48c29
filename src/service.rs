//! Dashboard statistics service.
//!
//! T040: Implement StatsService wiring storage, cache, and engine
//!
//! One method per dashboard query. Each call checks the cache, otherwise
//! fetches a fresh snapshot from storage, runs the pure engine over it, and
//! caches the result under the query's tag. Writes invalidate every tag,
//! since a single new entry can move every view.

use thiserror::Error;

use crate::cache::{CacheError, CacheTag, StatsCache};
use crate::records::CompletionRecord;
use crate::stats::{
    self, DailyCount, DashboardOverview, GapResult, MonthlyCount, NameSummary, ParticipantRanker,
    RankedParticipant, StreakResult, YearlyCount,
};
use crate::storage::{Database, DatabaseError, EntryStore, StoreError};

/// Maximum number of names returned by the unique-names listing.
const UNIQUE_NAMES_LIMIT: usize = 20;

/// Facade over the entry database and the statistics engine.
pub struct StatsService {
    db: Database,
    cache: StatsCache,
    ranker: ParticipantRanker,
}

impl StatsService {
    /// Create a service over an open database, with default cache and ranker.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            cache: StatsCache::new(),
            ranker: ParticipantRanker::new(),
        }
    }

    /// Replace the participant ranker configuration.
    pub fn with_ranker(mut self, ranker: ParticipantRanker) -> Self {
        self.ranker = ranker;
        self
    }

    /// Replace the cache (e.g. a short TTL for tests).
    pub fn with_cache(mut self, cache: StatsCache) -> Self {
        self.cache = cache;
        self
    }

    /// All entries, newest completion first.
    pub fn all_entries(&mut self) -> Result<Vec<CompletionRecord>, ServiceError> {
        let key = StatsCache::key("get-all-entries", &[]);
        if let Some(hit) = self.cache.get(&key)? {
            return Ok(hit);
        }

        let records = self.snapshot()?;
        self.cache.put(&key, CacheTag::AllEntries, &records)?;
        Ok(records)
    }

    /// Entries for one participant name, newest first.
    pub fn entries_for_name(&mut self, name: &str) -> Result<Vec<CompletionRecord>, ServiceError> {
        let key = StatsCache::key("get-entries-for-name", &[name]);
        if let Some(hit) = self.cache.get(&key)? {
            return Ok(hit);
        }

        let records = EntryStore::new(self.db.connection()).fetch_by_name(name)?;
        self.cache.put(&key, CacheTag::AllEntries, &records)?;
        Ok(records)
    }

    /// Completion counts per calendar year.
    pub fn yearly_totals(&mut self) -> Result<Vec<YearlyCount>, ServiceError> {
        let key = StatsCache::key("get-yearly-totals", &[]);
        if let Some(hit) = self.cache.get(&key)? {
            return Ok(hit);
        }

        let result = stats::group_by_year(&self.snapshot()?);
        self.cache.put(&key, CacheTag::YearlyTotals, &result)?;
        Ok(result)
    }

    /// Completion counts per calendar month, optionally for one year.
    pub fn monthly_totals(&mut self, year: Option<i32>) -> Result<Vec<MonthlyCount>, ServiceError> {
        let year_param = year.map(|y| y.to_string());
        let params: Vec<&str> = year_param.iter().map(String::as_str).collect();
        let key = StatsCache::key("get-monthly-totals", &params);
        if let Some(hit) = self.cache.get(&key)? {
            return Ok(hit);
        }

        let result = stats::group_by_year_month(&self.snapshot()?, year);
        self.cache.put(&key, CacheTag::MonthlyTotals, &result)?;
        Ok(result)
    }

    /// Densified per-day counts for one month.
    pub fn daily_totals(&mut self, year: i32, month: u32) -> Result<Vec<DailyCount>, ServiceError> {
        let year_str = year.to_string();
        let month_str = month.to_string();
        let key = StatsCache::key("get-daily-totals", &[&year_str, &month_str]);
        if let Some(hit) = self.cache.get(&key)? {
            return Ok(hit);
        }

        let result = stats::densify_daily_counts(&self.snapshot()?, year, month);
        self.cache.put(&key, CacheTag::DailyTotals, &result)?;
        Ok(result)
    }

    /// Longest streak of consecutive completion days.
    pub fn longest_streak(&mut self) -> Result<StreakResult, ServiceError> {
        let key = StatsCache::key("get-longest-streak", &[]);
        if let Some(hit) = self.cache.get(&key)? {
            return Ok(hit);
        }

        let result = stats::longest_streak(&self.snapshot()?);
        self.cache.put(&key, CacheTag::Stats, &result)?;
        Ok(result)
    }

    /// Longest gap between completion days.
    pub fn longest_gap(&mut self) -> Result<GapResult, ServiceError> {
        let key = StatsCache::key("get-longest-gap", &[]);
        if let Some(hit) = self.cache.get(&key)? {
            return Ok(hit);
        }

        let result = stats::longest_gap(&self.snapshot()?);
        self.cache.put(&key, CacheTag::Stats, &result)?;
        Ok(result)
    }

    /// Participants with two or more completions, ranked.
    pub fn top_hall_of_famers(&mut self) -> Result<Vec<RankedParticipant>, ServiceError> {
        let key = StatsCache::key("get-top-hall-of-famers", &[]);
        if let Some(hit) = self.cache.get(&key)? {
            return Ok(hit);
        }

        let result = self.ranker.rank(&self.snapshot()?);
        self.cache.put(&key, CacheTag::Names, &result)?;
        Ok(result)
    }

    /// Per-name summaries with first-entry dates, top entries first.
    pub fn unique_names(&mut self) -> Result<Vec<NameSummary>, ServiceError> {
        let key = StatsCache::key("get-unique-names", &[]);
        if let Some(hit) = self.cache.get(&key)? {
            return Ok(hit);
        }

        let result = stats::unique_names(&self.snapshot()?, UNIQUE_NAMES_LIMIT);
        self.cache.put(&key, CacheTag::Names, &result)?;
        Ok(result)
    }

    /// The record with the fastest completion time, if any is recorded.
    pub fn fastest(&mut self) -> Result<Option<CompletionRecord>, ServiceError> {
        let key = StatsCache::key("get-fastest", &[]);
        if let Some(hit) = self.cache.get(&key)? {
            return Ok(hit);
        }

        let snapshot = self.snapshot()?;
        let result = stats::find_fastest(&snapshot).cloned();
        self.cache.put(&key, CacheTag::Stats, &result)?;
        Ok(result)
    }

    /// The youngest participant at completion, if any age is recorded.
    pub fn youngest(&mut self) -> Result<Option<CompletionRecord>, ServiceError> {
        let key = StatsCache::key("get-youngest", &[]);
        if let Some(hit) = self.cache.get(&key)? {
            return Ok(hit);
        }

        let snapshot = self.snapshot()?;
        let result = stats::find_youngest(&snapshot).cloned();
        self.cache.put(&key, CacheTag::Stats, &result)?;
        Ok(result)
    }

    /// Headline overview numbers.
    pub fn overview(&mut self) -> Result<DashboardOverview, ServiceError> {
        let key = StatsCache::key("get-overview", &[]);
        if let Some(hit) = self.cache.get(&key)? {
            return Ok(hit);
        }

        let result = stats::overview(&self.snapshot()?);
        self.cache.put(&key, CacheTag::Stats, &result)?;
        Ok(result)
    }

    /// Insert a new entry and drop every cached view.
    pub fn record_entry(&mut self, record: &CompletionRecord) -> Result<(), ServiceError> {
        EntryStore::new(self.db.connection()).insert(record)?;
        self.cache.invalidate_all();
        tracing::info!(
            participant_number = record.participant_number,
            "recorded new entry, caches invalidated"
        );
        Ok(())
    }

    /// Fresh snapshot of all records from storage.
    fn snapshot(&self) -> Result<Vec<CompletionRecord>, ServiceError> {
        Ok(EntryStore::new(self.db.connection()).fetch_all()?)
    }
}

/// Errors surfaced by the statistics service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Database open or migration failure.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Entry store query failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Cache payload serialization failure.
    #[error(transparent)]
    Cache(#[from] CacheError),
}
