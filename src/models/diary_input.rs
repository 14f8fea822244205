use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::{diary::period::parse_day, models::NewDiaryEntry, AppError};

use super::DiaryView;

/// Input for creating or replacing the entry of a given day
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpsertDiaryInput {
    pub content: String,
    pub image: String,
    pub emotions: Vec<String>,
    /// Calendar day in `YYYY-MM-DD` form
    #[schema(example = "2024-03-15")]
    pub date: String,
    pub theme: String,
}

impl UpsertDiaryInput {
    /// Checks required fields and binds the payload to its owner.
    pub fn into_new_entry(self, owner_id: &str) -> Result<NewDiaryEntry, AppError> {
        if self.content.is_empty()
            || self.image.is_empty()
            || self.emotions.is_empty()
            || self.date.is_empty()
            || self.theme.is_empty()
        {
            return Err(AppError::BadRequest(
                "content, image, emotions, date and theme are required".to_string(),
            ));
        }

        let day = parse_day(&self.date)?;

        Ok(NewDiaryEntry {
            owner_id: owner_id.to_string(),
            day,
            content: self.content,
            image: self.image,
            emotions: self.emotions,
            theme: self.theme,
        })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DiaryListResponse {
    pub diaries: Vec<DiaryView>,
}

/// Response for diary mutations
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DiaryCountResponse {
    pub diary_count: i64,
    pub day_count: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmotionCountResponse {
    pub emotions: BTreeMap<String, i64>,
}
