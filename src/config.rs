//! Configuration management for Unibridge.
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present) once, at first access.

use std::env;
use std::sync::OnceLock;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Copy)]
pub struct PaginationConfig {
    /// Page size used when a list request omits `limit`.
    pub default_limit: u32,
    /// Upper bound applied to any requested `limit`.
    pub max_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Maximum hits returned per entity kind by the global search.
    pub result_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { result_limit: 5 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let pagination_defaults = PaginationConfig::default();
        let default_limit = env_parse("DEFAULT_PAGE_SIZE", pagination_defaults.default_limit).max(1);
        let max_limit = env_parse("MAX_PAGE_SIZE", pagination_defaults.max_limit).max(default_limit);

        Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_parse("PORT", 8080),
                cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .map(|v| parse_list(&v))
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                path: env_or("DATABASE_PATH", "./data/unibridge.db"),
            },
            pagination: PaginationConfig {
                default_limit,
                max_limit,
            },
            search: SearchConfig {
                result_limit: env_parse("SEARCH_RESULT_LIMIT", SearchConfig::default().result_limit),
            },
            logging: LoggingConfig {
                format: match env_or("LOG_FORMAT", "pretty").to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                },
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset or malformed.
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
