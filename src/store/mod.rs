pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::{
    diary::period::{DayRange, SortDirection},
    models::{DiaryEntry, NewDiaryEntry},
    AppResult,
};

pub use postgres::PgStore;

/// Persistence for diary entries, keyed by `(owner, day)`.
///
/// Every method is scoped to a single owner. A lookup that finds nothing is
/// `Ok(None)` or an empty vector; `Err` is reserved for storage failures.
#[async_trait]
pub trait DiaryStore: Send + Sync {
    async fn find_by_day(&self, owner_id: &str, day: &DayRange) -> AppResult<Option<DiaryEntry>>;

    async fn list_by_owner(&self, owner_id: &str, sort: SortDirection) -> AppResult<Vec<DiaryEntry>>;

    async fn list_by_range(
        &self,
        owner_id: &str,
        range: &DayRange,
        sort: SortDirection,
    ) -> AppResult<Vec<DiaryEntry>>;

    /// Unanchored, case-sensitive substring match over `content`.
    async fn search_by_content(
        &self,
        owner_id: &str,
        needle: &str,
        sort: SortDirection,
    ) -> AppResult<Vec<DiaryEntry>>;

    /// Inserts the entry for its day, or replaces the mutable fields of the
    /// existing one in a single atomic step. The stored day and creation time
    /// of an existing entry are never rewritten.
    async fn upsert(&self, entry: &NewDiaryEntry) -> AppResult<()>;

    /// Returns the number of rows removed; zero is not an error.
    async fn delete_by_day(&self, owner_id: &str, day: &DayRange) -> AppResult<u64>;

    async fn count_in_range(&self, owner_id: &str, range: &DayRange) -> AppResult<i64>;
}

/// Read-only view of the theme and emotion reference catalogs.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn theme_exists(&self, name: &str) -> AppResult<bool>;

    async fn emotion_exists(&self, name: &str) -> AppResult<bool>;

    async fn all_emotion_names(&self) -> AppResult<Vec<String>>;

    async fn all_theme_names(&self) -> AppResult<Vec<String>>;
}
