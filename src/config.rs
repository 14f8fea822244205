use axum::http::HeaderValue;
use std::env;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub cors_origin: HeaderValue,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| "DATABASE_URL must be set".to_string())?;

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| "JWT_SECRET must be set".to_string())?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = cors_origin
            .parse::<HeaderValue>()
            .map_err(|e| format!("CORS_ORIGIN is not a valid header value: {}", e))?;

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(format!(
                        "REQUEST_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    ))
                }
            },
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            cors_origin,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_source(lookup(&[
            ("DATABASE_URL", "postgres://localhost/diary"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.cors_origin, DEFAULT_CORS_ORIGIN);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_required() {
        let err = AppConfig::from_source(lookup(&[("JWT_SECRET", "secret")])).unwrap_err();
        assert!(err.contains("DATABASE_URL"));

        let err = AppConfig::from_source(lookup(&[("DATABASE_URL", "postgres://x")])).unwrap_err();
        assert!(err.contains("JWT_SECRET"));
    }

    #[test]
    fn test_invalid_timeout() {
        for raw in ["0", "-5", "soon"] {
            let result = AppConfig::from_source(lookup(&[
                ("DATABASE_URL", "postgres://x"),
                ("JWT_SECRET", "secret"),
                ("REQUEST_TIMEOUT_SECS", raw),
            ]));
            assert!(result.is_err(), "accepted {}", raw);
        }
    }
}
