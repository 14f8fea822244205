use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::Modify;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dailyscoop API",
        version = "1.0.0",
        description = "One journal entry per day, tagged with emotions and a theme, with calendar views and statistics"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // Health
        crate::handlers::health::health_check,
        crate::handlers::metrics::metrics_handler,

        // Diary
        crate::handlers::diary_handler::list_diaries,
        crate::handlers::diary_handler::get_calendar,
        crate::handlers::diary_handler::get_diary,
        crate::handlers::diary_handler::create_diary,
        crate::handlers::diary_handler::delete_diary,
        crate::handlers::diary_handler::count_diaries,
        crate::handlers::diary_handler::count_emotions,

        // References
        crate::handlers::references_handler::get_emotions,
        crate::handlers::references_handler::get_themes,
    ),
    components(
        schemas(
            crate::models::DiaryView,
            crate::models::UpsertDiaryInput,
            crate::models::DiaryListResponse,
            crate::models::MessageResponse,
            crate::models::DiaryCountResponse,
            crate::models::EmotionCountResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check and metrics"),
        (name = "diary", description = "Diary entries, calendar views and statistics"),
        (name = "references", description = "Emotion and theme catalogs"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
