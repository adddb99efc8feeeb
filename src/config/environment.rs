//! Environment configuration
//!
//! Everything the service reads from the process environment, with the
//! defaults used when a variable is absent.

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Which repository implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!("unknown storage backend '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub cors_origins: Vec<String>,
    pub storage_backend: StorageBackend,
    pub plan_trip_params_mutable: bool,
    /// Location criterion must equal a route tag byte-for-byte
    pub match_location_tags_case_sensitive: bool,
    pub request_timeout_secs: u64,
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parse_or("PORT", 3000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| split_list(&origins))
                .unwrap_or_default(),
            storage_backend: parse_or("STORAGE_BACKEND", StorageBackend::Postgres)?,
            plan_trip_params_mutable: parse_or("PLAN_TRIP_PARAMS_MUTABLE", false)?,
            match_location_tags_case_sensitive: parse_or("MATCH_LOCATION_TAGS_CASE_SENSITIVE", false)?,
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 30)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
