use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use std::future::Future;
use std::sync::Arc;

use crate::{auth, AppError, AppState};

/// Cookie set by the web client after login.
const TOKEN_COOKIE: &str = "token";

/// Extracts the JWT from the Authorization header, falling back to the token cookie
fn extract_token_from_request(parts: &Parts) -> Option<String> {
    if let Some(bearer) = parts.headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }

    let cookie_str = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_str.split(';').find_map(|cookie| {
        cookie
            .trim()
            .strip_prefix(TOKEN_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
            .map(str::to_string)
    })
}

/// Owner identity resolved from a valid token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = extract_token_from_request(parts);
        let state = state.clone();

        async move {
            let token = token.ok_or_else(|| {
                AppError::Unauthorized(
                    "Missing authentication: no Authorization header or token cookie".to_string(),
                )
            })?;

            let claims = auth::validate_token(&token, &state.config.jwt_secret).map_err(|e| {
                tracing::debug!(error = %e, "Rejected token");
                AppError::Unauthorized(e)
            })?;

            Ok(AuthenticatedUser { user_id: claims.id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(name: header::HeaderName, value: &str) -> Parts {
        let (parts, _) = Request::builder()
            .header(name, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_token_from_bearer_header() {
        let parts = parts(header::AUTHORIZATION, "Bearer abc.def.ghi");
        assert_eq!(extract_token_from_request(&parts).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_token_from_cookie() {
        let parts = parts(header::COOKIE, "theme=dark; token=abc.def.ghi");
        assert_eq!(extract_token_from_request(&parts).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_similar_cookie_name_ignored() {
        let parts = parts(header::COOKIE, "tokenizer=nope");
        assert_eq!(extract_token_from_request(&parts), None);
    }
}
