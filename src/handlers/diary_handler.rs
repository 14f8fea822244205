use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::{
    diary::period::{parse_day, PeriodType, SortDirection},
    extractors::AuthenticatedUser,
    models::{
        DiaryCountResponse, DiaryListResponse, DiaryView, EmotionCountResponse, MessageResponse,
        UpsertDiaryInput,
    },
    AppResult, AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListDiariesQuery {
    /// `1` for oldest first, `-1` (default) for newest first
    pub sort: Option<String>,
    /// Substring to look for in entry content
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CalendarQuery {
    /// `weekly` or `monthly`
    #[serde(rename = "type")]
    pub period: Option<String>,
    /// Anchor day, `YYYY-MM-DD`
    pub date: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PeriodQuery {
    #[serde(rename = "type")]
    pub period: Option<String>,
    /// Anchor day, `YYYY-MM-DD`
    pub date: Option<String>,
}

fn parse_period(raw: Option<&str>) -> AppResult<PeriodType> {
    raw.unwrap_or_default().parse()
}

fn parse_anchor(raw: Option<&str>) -> AppResult<chrono::NaiveDate> {
    parse_day(raw.unwrap_or_default())
}

fn into_list(entries: Vec<crate::models::DiaryEntry>) -> DiaryListResponse {
    DiaryListResponse {
        diaries: entries.into_iter().map(DiaryView::from).collect(),
    }
}

/// GET /api/diaries?sort=&search=
#[utoipa::path(
    get,
    path = "/api/diaries",
    params(ListDiariesQuery),
    responses(
        (status = 200, description = "Entries of the caller", body = DiaryListResponse),
        (status = 400, description = "Invalid sort direction"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "diary",
    security(("bearer_auth" = []))
)]
pub async fn list_diaries(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Query(query): Query<ListDiariesQuery>,
) -> AppResult<Json<DiaryListResponse>> {
    let sort = SortDirection::parse(query.sort.as_deref())?;

    let entries = state
        .diaries
        .list(&auth.user_id, sort, query.search.as_deref())
        .await?;

    Ok(Json(into_list(entries)))
}

/// GET /api/diaries/calendar?type=&date=&sort=
#[utoipa::path(
    get,
    path = "/api/diaries/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Entries within the week or month of the anchor day", body = DiaryListResponse),
        (status = 400, description = "Invalid type, date or sort"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "diary",
    security(("bearer_auth" = []))
)]
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<DiaryListResponse>> {
    let sort = SortDirection::parse(query.sort.as_deref())?;
    let period = parse_period(query.period.as_deref())?;
    let anchor = parse_anchor(query.date.as_deref())?;

    let entries = state
        .diaries
        .calendar(&auth.user_id, period, anchor, sort)
        .await?;

    Ok(Json(into_list(entries)))
}

/// GET /api/diaries/{date}
#[utoipa::path(
    get,
    path = "/api/diaries/{date}",
    params(
        ("date" = String, Path, description = "Day of the entry, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "The entry for that day", body = DiaryView),
        (status = 400, description = "Invalid date format"),
        (status = 404, description = "No entry on that day")
    ),
    tag = "diary",
    security(("bearer_auth" = []))
)]
pub async fn get_diary(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Path(date): Path<String>,
) -> AppResult<Json<DiaryView>> {
    let day = parse_day(&date)?;
    let entry = state.diaries.get(&auth.user_id, day).await?;

    Ok(Json(entry.into()))
}

/// POST /api/diaries - Create or replace the entry of a day
#[utoipa::path(
    post,
    path = "/api/diaries",
    request_body = UpsertDiaryInput,
    responses(
        (status = 200, description = "Entry saved", body = MessageResponse),
        (status = 400, description = "Missing fields, bad date, or unknown theme/emotion")
    ),
    tag = "diary",
    security(("bearer_auth" = []))
)]
pub async fn create_diary(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Json(input): Json<UpsertDiaryInput>,
) -> AppResult<Json<MessageResponse>> {
    let entry = input.into_new_entry(&auth.user_id)?;
    let day = entry.day;

    state.diaries.write(entry).await?;
    tracing::info!(owner_id = %auth.user_id, day = %day, "Diary entry saved");

    Ok(Json(MessageResponse {
        message: format!("Diary entry for {} saved", day),
    }))
}

/// DELETE /api/diaries/{date}
#[utoipa::path(
    delete,
    path = "/api/diaries/{date}",
    params(
        ("date" = String, Path, description = "Day of the entry, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Entry removed, or there was none", body = MessageResponse),
        (status = 400, description = "Invalid date format")
    ),
    tag = "diary",
    security(("bearer_auth" = []))
)]
pub async fn delete_diary(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Path(date): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let day = parse_day(&date)?;
    state.diaries.delete(&auth.user_id, day).await?;

    Ok(Json(MessageResponse {
        message: format!("Diary entry for {} deleted", day),
    }))
}

/// GET /api/diaries/count?type=&date=
#[utoipa::path(
    get,
    path = "/api/diaries/count",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Entry count and period length", body = DiaryCountResponse),
        (status = 400, description = "Invalid type or date")
    ),
    tag = "diary",
    security(("bearer_auth" = []))
)]
pub async fn count_diaries(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<DiaryCountResponse>> {
    let period = parse_period(query.period.as_deref())?;
    let anchor = parse_anchor(query.date.as_deref())?;

    let count = state.diaries.count(&auth.user_id, period, anchor).await?;

    Ok(Json(DiaryCountResponse {
        diary_count: count.entries,
        day_count: count.days,
    }))
}

/// GET /api/diaries/emotions?type=&date=
#[utoipa::path(
    get,
    path = "/api/diaries/emotions",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Tag count for every known emotion", body = EmotionCountResponse),
        (status = 400, description = "Invalid type or date")
    ),
    tag = "diary",
    security(("bearer_auth" = []))
)]
pub async fn count_emotions(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<EmotionCountResponse>> {
    let period = parse_period(query.period.as_deref())?;
    let anchor = parse_anchor(query.date.as_deref())?;

    let emotions = state
        .diaries
        .emotion_frequency(&auth.user_id, period, anchor)
        .await?;

    Ok(Json(EmotionCountResponse { emotions }))
}
