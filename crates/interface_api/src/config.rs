//! API configuration

use serde::Deserialize;
use std::time::Duration;

use core_kernel::Currency;
use infra_db::DatabaseConfig;

/// API configuration
///
/// Loaded from `API_*` environment variables; anything unset keeps the
/// value from [`ApiConfig::default`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Pool size ceiling
    pub db_max_connections: u32,
    /// Connections kept open while idle
    pub db_min_connections: u32,
    /// Seconds a request waits for a pooled connection
    pub db_acquire_timeout_secs: u64,
    /// Seconds before a connection is recycled
    pub db_max_lifetime_secs: u64,
    /// Seconds an unused connection stays open
    pub db_idle_timeout_secs: u64,
    /// Log level
    pub log_level: String,
    /// Directory supporting documents are written to
    pub upload_dir: String,
    /// Largest accepted request body, in bytes
    pub max_body_bytes: usize,
    /// Currency hourly rates are quoted in
    pub currency: Currency,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/claims".to_string(),
            db_max_connections: 10,
            db_min_connections: 2,
            db_acquire_timeout_secs: 30,
            db_max_lifetime_secs: 30 * 60,
            db_idle_timeout_secs: 10 * 60,
            log_level: "info".to_string(),
            upload_dir: "./uploads".to_string(),
            // Above the 5 MiB document limit so oversize files reach the validator
            max_body_bytes: 10 * 1024 * 1024,
            currency: Currency::ZAR,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("jwt_expiration_secs", defaults.jwt_expiration_secs as i64)?
            .set_default("database_url", defaults.database_url)?
            .set_default("db_max_connections", i64::from(defaults.db_max_connections))?
            .set_default("db_min_connections", i64::from(defaults.db_min_connections))?
            .set_default("db_acquire_timeout_secs", defaults.db_acquire_timeout_secs as i64)?
            .set_default("db_max_lifetime_secs", defaults.db_max_lifetime_secs as i64)?
            .set_default("db_idle_timeout_secs", defaults.db_idle_timeout_secs as i64)?
            .set_default("log_level", defaults.log_level)?
            .set_default("upload_dir", defaults.upload_dir)?
            .set_default("max_body_bytes", defaults.max_body_bytes as i64)?
            .set_default("currency", defaults.currency.code())?
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Pool settings for the claims database
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.database_url)
            .max_connections(self.db_max_connections)
            .min_connections(self.db_min_connections)
            .acquire_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
            .max_lifetime(Duration::from_secs(self.db_max_lifetime_secs))
            .idle_timeout(Duration::from_secs(self.db_idle_timeout_secs))
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.currency, Currency::ZAR);
        assert!(config.max_body_bytes > 5 * 1024 * 1024);
    }

    #[test]
    fn test_database_config_carries_pool_settings() {
        let config = ApiConfig {
            database_url: "postgres://db/claims".to_string(),
            db_max_connections: 25,
            db_min_connections: 5,
            db_acquire_timeout_secs: 3,
            ..ApiConfig::default()
        };

        let database = config.database_config();

        assert_eq!(database.url, "postgres://db/claims");
        assert_eq!(database.max_connections, 25);
        assert_eq!(database.min_connections, 5);
        assert_eq!(database.acquire_timeout, Duration::from_secs(3));
        assert_eq!(database.idle_timeout, Duration::from_secs(600));
    }
}
