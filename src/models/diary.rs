use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A stored diary entry. At most one exists per `(owner_id, day)`.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DiaryEntry {
    pub id: i64,
    pub owner_id: String,
    pub day: NaiveDate,
    pub content: String,
    pub image: String,
    pub emotions: Vec<String>,
    pub theme: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for a create-or-replace write.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDiaryEntry {
    pub owner_id: String,
    pub day: NaiveDate,
    pub content: String,
    pub image: String,
    pub emotions: Vec<String>,
    pub theme: String,
}

/// Public representation of an entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DiaryView {
    pub content: String,
    pub image: String,
    #[schema(value_type = String, format = Date, example = "2024-03-15")]
    pub date: NaiveDate,
    pub emotions: Vec<String>,
    pub theme: String,
}

impl From<DiaryEntry> for DiaryView {
    fn from(entry: DiaryEntry) -> Self {
        Self {
            content: entry.content,
            image: entry.image,
            date: entry.day,
            emotions: entry.emotions,
            theme: entry.theme,
        }
    }
}
