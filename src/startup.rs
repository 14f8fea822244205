use axum::{
    error_handling::HandleErrorLayer,
    http::{header, Method},
    middleware::from_fn,
    response::Html,
    routing::get,
    BoxError, Json, Router,
};
use std::sync::Arc;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{handlers, middleware, openapi::ApiDoc, AppError};

pub fn build_router(state: Arc<crate::AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true);

    // Static segments take precedence over {date}
    let diary_routes = Router::new()
        .route(
            "/api/diaries",
            get(handlers::diary_handler::list_diaries).post(handlers::diary_handler::create_diary),
        )
        .route("/api/diaries/calendar", get(handlers::diary_handler::get_calendar))
        .route("/api/diaries/count", get(handlers::diary_handler::count_diaries))
        .route("/api/diaries/emotions", get(handlers::diary_handler::count_emotions))
        .route(
            "/api/diaries/{date}",
            get(handlers::diary_handler::get_diary).delete(handlers::diary_handler::delete_diary),
        );

    let reference_routes = Router::new()
        .route("/api/references/emotions", get(handlers::references_handler::get_emotions))
        .route("/api/references/themes", get(handlers::references_handler::get_themes));

    // Dropping the handler future on timeout also drops any in-flight query
    let deadline = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_timeout))
        .layer(TimeoutLayer::new(state.config.request_timeout));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .merge(diary_routes)
        .merge(reference_routes)
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/swagger-ui", get(swagger_ui))
        .layer(deadline)
        .layer(from_fn(middleware::metrics_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .layer(cors)
        .with_state(state)
}

async fn handle_timeout(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request cancelled after exceeding its deadline");
        AppError::Timeout("Request exceeded its deadline".to_string())
    } else {
        AppError::Internal(format!("Unhandled middleware error: {}", err))
    }
}

async fn swagger_ui() -> Html<&'static str> {
    Html(r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Dailyscoop API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: '/api-docs/openapi.json',
                dom_id: '#swagger-ui',
            });
        };
    </script>
</body>
</html>
    "#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::IntoResponse,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::{store::memory::MemoryStore, test_support};

    #[tokio::test]
    async fn test_health_has_request_id() {
        let app = test_support::router(Arc::new(MemoryStore::default()));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_openapi_lists_diary_routes() {
        let app = test_support::router(Arc::new(MemoryStore::default()));

        let response = app
            .oneshot(Request::builder().uri("/api-docs/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(doc["paths"]["/api/diaries/{date}"].is_object());
        assert!(doc["paths"]["/api/diaries/emotions"].is_object());
    }

    #[tokio::test]
    async fn test_references_are_sorted() {
        let store = Arc::new(MemoryStore::with_catalog(&["joy", "anger"], &["sunny", "rainy"]));
        let app = test_support::router(store);

        let response = app
            .oneshot(Request::builder().uri("/api/references/emotions").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let names: Vec<String> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(names, vec!["anger".to_string(), "joy".to_string()]);
    }

    #[tokio::test]
    async fn test_slow_store_call_times_out() {
        let store = Arc::new(MemoryStore::with_catalog(&["joy"], &["sunny"]));
        store.set_delay(std::time::Duration::from_secs(10));
        let config = test_support::config_with(&[("REQUEST_TIMEOUT_SECS", "1")]);
        let app = test_support::router_with_config(store, config);

        let request = Request::builder()
            .uri("/api/diaries")
            .header(header::AUTHORIZATION, format!("Bearer {}", test_support::token_for("u1")))
            .body(Body::empty())
            .unwrap();
        let started = std::time::Instant::now();
        let response = app.oneshot(request).await.unwrap();

        assert!(started.elapsed() < std::time::Duration::from_secs(5));
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());
        assert!(body.get("diaries").is_none());
    }

    #[tokio::test]
    async fn test_elapsed_maps_to_timeout() {
        let err: BoxError = Box::new(tower::timeout::error::Elapsed::new());
        let response = handle_timeout(err).await.into_response();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
