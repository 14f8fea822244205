pub mod claims;
pub mod jwt;

#[cfg(test)]
pub use jwt::{issue_token, DEFAULT_TOKEN_TTL_HOURS};
pub use jwt::validate_token;
