mod auth;
mod config;
mod db;
mod diary;
mod error;
mod extractors;
mod handlers;
mod middleware;
mod models;
mod openapi;
mod startup;
mod store;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use handlers::MetricsState;

use diary::DiaryService;
use store::PgStore;

#[derive(Clone)]
pub struct AppState {
    pub diaries: DiaryService,
    pub config: AppConfig,
    pub metrics: Arc<MetricsState>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string()) == "json";

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,dailyscoop=debug,tower_http=debug".into());

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {}", e);
        e
    })?;

    let db = db::create_pool(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to create database pool: {}", e);
        e
    })?;

    db::run_migrations(&db).await.map_err(|e| {
        tracing::error!("Failed to run migrations: {}", e);
        e
    })?;

    tracing::info!("Database ready");

    let metrics_state = Arc::new(handlers::setup_metrics_recorder().map_err(|e| {
        tracing::error!("Failed to install metrics recorder: {}", e);
        e
    })?);

    // One pooled handle serves both the diary table and the catalogs
    let store = Arc::new(PgStore::new(db));
    let diaries = DiaryService::new(store.clone(), store);

    let state = Arc::new(AppState {
        diaries,
        config: config.clone(),
        metrics: metrics_state,
    });

    let app = startup::build_router(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
