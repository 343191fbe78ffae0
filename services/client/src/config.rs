//! services/client/src/config.rs
//!
//! Configuration for the attendance form client.
//!
//! The only thing the client needs to know is where the record store lives.
//! Values come from environment variables, with a `.env` file honoured for
//! local development.

use hyper::Uri;
use tracing::Level;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the record store, without a trailing slash.
    pub api_base_url: String,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        Self::from_vars(
            std::env::var("ATTENDANCE_API_URL").ok(),
            std::env::var("RUST_LOG").ok(),
        )
    }

    fn from_vars(
        api_base_url: Option<String>,
        log_level: Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_base_url = parse_base_url(
            api_base_url.as_deref().unwrap_or("http://localhost:3000"),
        )?;

        let log_level_str = log_level.unwrap_or_else(|| "WARN".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            api_base_url,
            log_level,
        })
    }
}

/// Checks that `raw` is an absolute `http` URL and strips any trailing slash.
pub fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue("ATTENDANCE_API_URL".to_string(), reason);

    let trimmed = raw.trim().trim_end_matches('/');
    let uri = trimmed
        .parse::<Uri>()
        .map_err(|e| invalid(e.to_string()))?;

    match uri.scheme_str() {
        Some("http") => {}
        Some(other) => return Err(invalid(format!("unsupported scheme '{}'", other))),
        None => return Err(invalid(format!("'{}' is not an absolute URL", raw))),
    }
    if uri.host().is_none() {
        return Err(invalid(format!("'{}' has no host", raw)));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_store() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.log_level, Level::WARN);
    }

    #[test]
    fn trailing_slash_is_dropped() {
        assert_eq!(
            parse_base_url("http://10.0.2.2:3000/").unwrap(),
            "http://10.0.2.2:3000"
        );
    }

    #[test]
    fn non_http_urls_are_rejected() {
        assert!(parse_base_url("https://attendance.example.com").is_err());
        assert!(parse_base_url("localhost:3000").is_err());
        assert!(parse_base_url("not a url").is_err());
    }
}
