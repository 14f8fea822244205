#[cfg(test)]
use chrono::{Duration, Utc};
#[cfg(test)]
use jsonwebtoken::{encode, EncodingKey, Header};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::claims::UserClaims;
#[cfg(test)]
use crate::AppError;

/// Lifetime of tokens issued by the login service.
#[cfg(test)]
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 720;

/// Sign an HS256 token carrying `user_id`, valid for `ttl`. Mirrors what the
/// login service hands out.
#[cfg(test)]
pub fn issue_token(user_id: &str, secret: &str, ttl: Duration) -> Result<String, AppError> {
    let claims = UserClaims {
        id: user_id.to_string(),
        exp: (Utc::now() + ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

pub fn validate_token(token: &str, secret: &str) -> Result<UserClaims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp"]);

    let token_data = decode::<UserClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| format!("JWT validation failed: {}", e))?;

    if token_data.claims.id.is_empty() {
        return Err("Token carries no user id".to_string());
    }

    Ok(token_data.claims)
}
