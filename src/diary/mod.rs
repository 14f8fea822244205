pub mod period;
pub mod stats;

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    models::{DiaryEntry, NewDiaryEntry},
    store::{CatalogGateway, DiaryStore},
    AppError, AppResult,
};

use period::{day_range, Period, PeriodType, SortDirection};

/// Period types accepted by the calendar listing.
const CALENDAR_PERIODS: &[PeriodType] = &[PeriodType::Weekly, PeriodType::Monthly];
/// Period types accepted by entry counting.
const COUNT_PERIODS: &[PeriodType] = &[PeriodType::Weekly, PeriodType::Monthly, PeriodType::Yearly];
/// Period types accepted by emotion frequency.
const EMOTION_PERIODS: &[PeriodType] = &[PeriodType::Monthly, PeriodType::Yearly];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodCount {
    pub entries: i64,
    pub days: u32,
}

/// Diary operations for a single owner at a time. Holds no state of its own
/// beyond the shared store handles.
#[derive(Clone)]
pub struct DiaryService {
    store: Arc<dyn DiaryStore>,
    catalog: Arc<dyn CatalogGateway>,
}

impl DiaryService {
    pub fn new(store: Arc<dyn DiaryStore>, catalog: Arc<dyn CatalogGateway>) -> Self {
        Self { store, catalog }
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogGateway> {
        &self.catalog
    }

    /// All entries of the owner, or only those whose content contains `search`.
    pub async fn list(
        &self,
        owner_id: &str,
        sort: SortDirection,
        search: Option<&str>,
    ) -> AppResult<Vec<DiaryEntry>> {
        match search.filter(|needle| !needle.is_empty()) {
            Some(needle) => self.store.search_by_content(owner_id, needle, sort).await,
            None => self.store.list_by_owner(owner_id, sort).await,
        }
    }

    pub async fn calendar(
        &self,
        owner_id: &str,
        kind: PeriodType,
        anchor: NaiveDate,
        sort: SortDirection,
    ) -> AppResult<Vec<DiaryEntry>> {
        ensure_supported(kind, CALENDAR_PERIODS)?;
        let period = Period::resolve(kind, anchor)?;
        tracing::debug!(owner_id, period = %kind, range = %period.range, "Listing calendar entries");

        self.store.list_by_range(owner_id, &period.range, sort).await
    }

    pub async fn get(&self, owner_id: &str, day: NaiveDate) -> AppResult<DiaryEntry> {
        let range = day_range(day)?;
        self.store
            .find_by_day(owner_id, &range)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No diary entry on {}", day)))
    }

    /// Creates the entry for its day or replaces the existing one. The theme and
    /// every emotion must exist in the catalog; nothing is written otherwise.
    pub async fn write(&self, entry: NewDiaryEntry) -> AppResult<()> {
        if entry.emotions.is_empty() {
            return Err(AppError::BadRequest("At least one emotion is required".to_string()));
        }

        if !self.catalog.theme_exists(&entry.theme).await? {
            tracing::warn!(owner_id = %entry.owner_id, theme = %entry.theme, "Unknown theme");
            return Err(AppError::InvalidReference(format!(
                "Theme '{}' does not exist",
                entry.theme
            )));
        }

        for emotion in &entry.emotions {
            if !self.catalog.emotion_exists(emotion).await? {
                tracing::warn!(owner_id = %entry.owner_id, emotion = %emotion, "Unknown emotion");
                return Err(AppError::InvalidReference(format!(
                    "Emotion '{}' does not exist",
                    emotion
                )));
            }
        }

        self.store.upsert(&entry).await
    }

    /// Removing a day with no entry succeeds.
    pub async fn delete(&self, owner_id: &str, day: NaiveDate) -> AppResult<()> {
        let range = day_range(day)?;
        let removed = self.store.delete_by_day(owner_id, &range).await?;
        tracing::debug!(owner_id, day = %day, removed, "Diary entry delete");
        Ok(())
    }

    pub async fn count(
        &self,
        owner_id: &str,
        kind: PeriodType,
        anchor: NaiveDate,
    ) -> AppResult<PeriodCount> {
        ensure_supported(kind, COUNT_PERIODS)?;
        let period = Period::resolve(kind, anchor)?;
        let entries = self.store.count_in_range(owner_id, &period.range).await?;
        tracing::debug!(
            owner_id,
            period = %kind,
            range = %period.range,
            span_days = period.range.days(),
            entries,
            "Counted entries"
        );

        Ok(PeriodCount {
            entries,
            days: period.length,
        })
    }

    /// Per-emotion tag counts over the period, listing every catalog emotion.
    pub async fn emotion_frequency(
        &self,
        owner_id: &str,
        kind: PeriodType,
        anchor: NaiveDate,
    ) -> AppResult<BTreeMap<String, i64>> {
        ensure_supported(kind, EMOTION_PERIODS)?;
        let period = Period::resolve(kind, anchor)?;

        let catalog = self.catalog.all_emotion_names().await?;
        let entries = self
            .store
            .list_by_range(owner_id, &period.range, SortDirection::Ascending)
            .await?;

        Ok(stats::emotion_frequency(catalog, &entries))
    }
}

fn ensure_supported(kind: PeriodType, allowed: &[PeriodType]) -> AppResult<()> {
    if allowed.contains(&kind) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Period type '{}' is not supported here",
            kind
        )))
    }
}
