use axum::Router;
use chrono::Duration;
use std::sync::Arc;

use crate::{
    auth::{issue_token, DEFAULT_TOKEN_TTL_HOURS},
    diary::DiaryService,
    handlers::metrics::detached_metrics,
    startup::build_router,
    store::memory::MemoryStore,
    AppConfig, AppState,
};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";

/// Test config, with `overrides` taking precedence over the defaults.
pub fn config_with(overrides: &[(&str, &str)]) -> AppConfig {
    AppConfig::from_source(|key| {
        if let Some((_, value)) = overrides.iter().find(|(k, _)| *k == key) {
            return Some(value.to_string());
        }
        match key {
            "DATABASE_URL" => Some("postgres://unused".to_string()),
            "JWT_SECRET" => Some(TEST_SECRET.to_string()),
            _ => None,
        }
    })
    .unwrap()
}

pub fn config() -> AppConfig {
    config_with(&[])
}

pub fn router(store: Arc<MemoryStore>) -> Router {
    router_with_config(store, config())
}

pub fn router_with_config(store: Arc<MemoryStore>, config: AppConfig) -> Router {
    let state = Arc::new(AppState {
        diaries: DiaryService::new(store.clone(), store),
        config,
        metrics: Arc::new(detached_metrics()),
    });
    build_router(state)
}

pub fn token_for(user_id: &str) -> String {
    issue_token(user_id, TEST_SECRET, Duration::hours(DEFAULT_TOKEN_TTL_HOURS)).unwrap()
}
