// src/config.rs

use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use url::Url;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub log_dir: String,
    /// Longest accepted fragment, in characters.
    pub max_content_length: usize,
    pub max_batch_size: usize,
    pub max_body_bytes: usize,
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            max_content_length: 100_000,
            max_batch_size: 50,
            max_body_bytes: 2 * 1024 * 1024,
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        let rust_log = env::var("RUST_LOG").unwrap_or(defaults.rust_log);

        let log_dir = env::var("LOG_DIR").unwrap_or(defaults.log_dir);

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or(defaults.cors_origins);

        Self {
            port: env_or("PORT", defaults.port),
            rust_log,
            log_dir,
            max_content_length: env_or("MAX_CONTENT_LENGTH", defaults.max_content_length),
            max_batch_size: env_or("MAX_BATCH_SIZE", defaults.max_batch_size),
            max_body_bytes: env_or("MAX_BODY_BYTES", defaults.max_body_bytes),
            cors_origins,
        }
    }
}

/// Reads and parses `key`, keeping `default` when unset or malformed.
fn env_or<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid value {:?} for {}, using {}", raw, key, default);
        default
    })
}

/// Comma-separated list of origins. Entries that are not absolute http(s)
/// URLs are skipped.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|origin| match Url::parse(origin) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
                Some(origin.trim_end_matches('/').to_string())
            }
            _ => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect()
}
