use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{AppResult, AppState};

/// GET /api/references/emotions
#[utoipa::path(
    get,
    path = "/api/references/emotions",
    responses(
        (status = 200, description = "Names of all known emotions", body = Vec<String>)
    ),
    tag = "references"
)]
pub async fn get_emotions(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<String>>> {
    let mut names = state.diaries.catalog().all_emotion_names().await?;
    names.sort();
    Ok(Json(names))
}

/// GET /api/references/themes
#[utoipa::path(
    get,
    path = "/api/references/themes",
    responses(
        (status = 200, description = "Names of all known themes", body = Vec<String>)
    ),
    tag = "references"
)]
pub async fn get_themes(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<String>>> {
    let mut names = state.diaries.catalog().all_theme_names().await?;
    names.sort();
    Ok(Json(names))
}
