use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Strength score at or above which a task counts as good-at.
    pub good_at_threshold: i32,
    /// Energy score strictly above which a task counts as energizing.
    pub energizing_threshold: i32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            good_at_threshold: optional_env("ENERGY_GOOD_AT_THRESHOLD", 2)?,
            energizing_threshold: optional_env("ENERGY_ENERGIZING_THRESHOLD", 0)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T: FromStr>(key: &str, default: T) -> Result<T> {
    parse_or_default(key, std::env::var(key).ok(), default)
}

fn parse_or_default<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{key} has an invalid value: '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_optional_uses_default() {
        assert_eq!(parse_or_default::<u16>("PORT", None, 8080).unwrap(), 8080);
    }

    #[test]
    fn test_optional_parses_negative_threshold() {
        let parsed = parse_or_default::<i32>("ENERGY_ENERGIZING_THRESHOLD", Some(" -1 ".into()), 0);
        assert_eq!(parsed.unwrap(), -1);
    }

    #[test]
    fn test_invalid_optional_names_the_variable() {
        let err = parse_or_default::<u16>("PORT", Some("eighty".into()), 8080).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
