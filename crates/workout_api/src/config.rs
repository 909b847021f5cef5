use std::net::SocketAddr;
use std::time::Duration;

use chrono::NaiveDateTime;
use secrecy::SecretString;
use thiserror::Error;

use crate::cors::AllowedOrigins;
use crate::transforms::parse_workout_date;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub address: SocketAddr,
    /// Earliest date a workout may carry.
    pub min_workout_date: NaiveDateTime,
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
    pub cors_allowed_origins: AllowedOrigins,
    /// HS256 secret for bearer tokens. `None` leaves the routes open.
    pub jwt_secret: Option<SecretString>,
    pub jwt_audience: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            min_workout_date: chrono::NaiveDate::from_ymd_opt(2020, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
            max_body_bytes: 1024 * 1024,
            request_timeout: Duration::from_secs(30),
            cors_allowed_origins: AllowedOrigins::default(),
            jwt_secret: None,
            jwt_audience: "api1".into(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. Absent values take defaults; present but malformed values
    /// are errors.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let address = match get("ADDRESS") {
            Some(raw) => raw.parse().map_err(|e| invalid("ADDRESS", e))?,
            None => defaults.address,
        };
        let min_workout_date = match get("WORKOUT_API_MIN_DATE") {
            Some(raw) => parse_workout_date(&raw)
                .ok_or_else(|| invalid("WORKOUT_API_MIN_DATE", format!("'{raw}' is not a date")))?,
            None => defaults.min_workout_date,
        };
        let max_body_bytes = match get("MAX_HTTP_BODY_SIZE") {
            Some(raw) => raw.parse().map_err(|e| invalid("MAX_HTTP_BODY_SIZE", e))?,
            None => defaults.max_body_bytes,
        };
        let request_timeout = match get("WORKOUT_API_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(invalid(
                        "WORKOUT_API_REQUEST_TIMEOUT_SECS",
                        "must be at least 1",
                    ));
                }
                Ok(secs) => Duration::from_secs(secs),
                Err(e) => return Err(invalid("WORKOUT_API_REQUEST_TIMEOUT_SECS", e)),
            },
            None => defaults.request_timeout,
        };
        let cors_allowed_origins = match get("CORS_ALLOWED_ORIGINS") {
            Some(raw) => {
                AllowedOrigins::parse(&raw).map_err(|e| invalid("CORS_ALLOWED_ORIGINS", e))?
            }
            None => defaults.cors_allowed_origins,
        };
        let jwt_secret = get("WORKOUT_API_JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .map(|s| SecretString::new(s.into()));
        let jwt_audience = get("WORKOUT_API_JWT_AUDIENCE").unwrap_or(defaults.jwt_audience);

        Ok(Self {
            address,
            min_workout_date,
            max_body_bytes,
            request_timeout,
            cors_allowed_origins,
            jwt_secret,
            jwt_audience,
        })
    }
}

fn invalid(key: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.to_string(),
    }
}
