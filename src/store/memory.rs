use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::{
    diary::period::{DayRange, SortDirection},
    models::{DiaryEntry, NewDiaryEntry},
    AppError, AppResult,
};

use super::{CatalogGateway, DiaryStore};

/// In-process store for exercising the service and routes without PostgreSQL.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<DiaryEntry>>,
    emotions: Vec<String>,
    themes: Vec<String>,
    next_id: AtomicI64,
    failing: AtomicBool,
    delay_ms: AtomicU64,
}

impl MemoryStore {
    pub fn with_catalog(emotions: &[&str], themes: &[&str]) -> Self {
        Self {
            emotions: emotions.iter().map(|s| s.to_string()).collect(),
            themes: themes.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Makes every subsequent call fail as if the database were unreachable.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Stalls every listing by `delay` before it touches the entries.
    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub async fn snapshot(&self) -> Vec<DiaryEntry> {
        self.entries.lock().await.clone()
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    async fn select(
        &self,
        sort: SortDirection,
        filter: impl Fn(&DiaryEntry) -> bool,
    ) -> AppResult<Vec<DiaryEntry>> {
        self.check()?;
        let delay_ms = self.delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        let mut selected: Vec<DiaryEntry> = self
            .entries
            .lock()
            .await
            .iter()
            .filter(|entry| filter(entry))
            .cloned()
            .collect();

        selected.sort_by_key(|entry| entry.day);
        if sort == SortDirection::Descending {
            selected.reverse();
        }
        Ok(selected)
    }
}

#[async_trait]
impl DiaryStore for MemoryStore {
    async fn find_by_day(&self, owner_id: &str, day: &DayRange) -> AppResult<Option<DiaryEntry>> {
        self.check()?;
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .find(|entry| entry.owner_id == owner_id && day.contains(entry.day))
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &str, sort: SortDirection) -> AppResult<Vec<DiaryEntry>> {
        self.select(sort, |entry| entry.owner_id == owner_id).await
    }

    async fn list_by_range(
        &self,
        owner_id: &str,
        range: &DayRange,
        sort: SortDirection,
    ) -> AppResult<Vec<DiaryEntry>> {
        self.select(sort, |entry| entry.owner_id == owner_id && range.contains(entry.day))
            .await
    }

    async fn search_by_content(
        &self,
        owner_id: &str,
        needle: &str,
        sort: SortDirection,
    ) -> AppResult<Vec<DiaryEntry>> {
        self.select(sort, |entry| entry.owner_id == owner_id && entry.content.contains(needle))
            .await
    }

    async fn upsert(&self, new: &NewDiaryEntry) -> AppResult<()> {
        self.check()?;
        // One lock spans match and insert, mirroring the single-statement upsert
        let mut entries = self.entries.lock().await;
        let now = Utc::now();

        match entries
            .iter_mut()
            .find(|entry| entry.owner_id == new.owner_id && entry.day == new.day)
        {
            Some(existing) => {
                existing.content = new.content.clone();
                existing.image = new.image.clone();
                existing.emotions = new.emotions.clone();
                existing.theme = new.theme.clone();
                existing.updated_at = now;
            }
            None => entries.push(DiaryEntry {
                id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                owner_id: new.owner_id.clone(),
                day: new.day,
                content: new.content.clone(),
                image: new.image.clone(),
                emotions: new.emotions.clone(),
                theme: new.theme.clone(),
                created_at: now,
                updated_at: now,
            }),
        }
        Ok(())
    }

    async fn delete_by_day(&self, owner_id: &str, day: &DayRange) -> AppResult<u64> {
        self.check()?;
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|entry| !(entry.owner_id == owner_id && day.contains(entry.day)));
        Ok((before - entries.len()) as u64)
    }

    async fn count_in_range(&self, owner_id: &str, range: &DayRange) -> AppResult<i64> {
        self.check()?;
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .filter(|entry| entry.owner_id == owner_id && range.contains(entry.day))
            .count() as i64)
    }
}

#[async_trait]
impl CatalogGateway for MemoryStore {
    async fn theme_exists(&self, name: &str) -> AppResult<bool> {
        self.check()?;
        Ok(self.themes.iter().any(|theme| theme == name))
    }

    async fn emotion_exists(&self, name: &str) -> AppResult<bool> {
        self.check()?;
        Ok(self.emotions.iter().any(|emotion| emotion == name))
    }

    async fn all_emotion_names(&self) -> AppResult<Vec<String>> {
        self.check()?;
        Ok(self.emotions.clone())
    }

    async fn all_theme_names(&self) -> AppResult<Vec<String>> {
        self.check()?;
        Ok(self.themes.clone())
    }
}
