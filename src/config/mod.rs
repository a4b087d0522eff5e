use once_cell::sync::Lazy;
use std::env;

/// Process configuration, loaded once from the environment.
///
/// Secrets (store URL, admin credentials, provider API key) are carried as
/// options and validated only by presence at the point of use, so a missing
/// value degrades the one feature that needs it instead of refusing to boot.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub admin_user: Option<String>,
    pub admin_pass: Option<String>,
    pub gemini_api_key: Option<String>,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    pub statement_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: parse_or("PORT", 3000),
            database_url: env::var("DATABASE_URL").ok(),
            admin_user: env::var("ADMIN_USER").ok(),
            admin_pass: env::var("ADMIN_PASS").ok(),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            database: DatabaseConfig {
                max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),
                connect_timeout_secs: parse_or("DATABASE_CONNECT_TIMEOUT_SECS", 5),
                statement_timeout_ms: parse_or("DATABASE_STATEMENT_TIMEOUT_MS", 5_000),
            },
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("ignoring unparseable {}={:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
