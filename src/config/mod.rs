//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `PRICE_SENSITIVITY`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use price_sensitivity::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.logging.init_tracing().expect("Failed to install logging");
//! ```

mod analysis;
mod database;
mod error;
mod logging;
mod redis;

pub use analysis::AnalysisConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use redis::RedisConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields an in-memory
/// service. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Analysis engine and cache tuning
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// PostgreSQL survey store; in-memory storage when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Redis analysis cache; in-process cache when absent
    #[serde(default)]
    pub redis: Option<RedisConfig>,

    /// Log level and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PRICE_SENSITIVITY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `PRICE_SENSITIVITY__ANALYSIS__MIN_SAMPLE_SIZE=20` -> `analysis.min_sample_size = 20`
    /// - `PRICE_SENSITIVITY__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PRICE_SENSITIVITY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.analysis.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        if let Some(redis) = &self.redis {
            redis.validate()?;
        }
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::MissingIntersectionPolicy;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "PRICE_SENSITIVITY__ANALYSIS__MIN_SAMPLE_SIZE",
        "PRICE_SENSITIVITY__ANALYSIS__MISSING_INTERSECTION",
        "PRICE_SENSITIVITY__ANALYSIS__CACHE_TTL_SECS",
        "PRICE_SENSITIVITY__DATABASE__URL",
        "PRICE_SENSITIVITY__DATABASE__MAX_CONNECTIONS",
        "PRICE_SENSITIVITY__REDIS__URL",
        "PRICE_SENSITIVITY__LOGGING__FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.analysis.min_sample_size, 10);
        assert!(config.database.is_none());
        assert!(config.redis.is_none());
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_analysis_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PRICE_SENSITIVITY__ANALYSIS__MIN_SAMPLE_SIZE", "25");
        env::set_var("PRICE_SENSITIVITY__ANALYSIS__MISSING_INTERSECTION", "fail");
        env::set_var("PRICE_SENSITIVITY__ANALYSIS__CACHE_TTL_SECS", "60");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.analysis.min_sample_size, 25);
        assert_eq!(
            config.analysis.missing_intersection,
            MissingIntersectionPolicy::Fail
        );
        assert_eq!(config.analysis.cache_ttl_secs, 60);
    }

    #[test]
    fn test_infrastructure_sections() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PRICE_SENSITIVITY__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("PRICE_SENSITIVITY__DATABASE__MAX_CONNECTIONS", "4");
        env::set_var("PRICE_SENSITIVITY__REDIS__URL", "redis://localhost:6379");
        env::set_var("PRICE_SENSITIVITY__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        let database = config.database.as_ref().unwrap();
        assert_eq!(database.url, "postgresql://test@localhost/test");
        assert_eq!(database.max_connections, 4);
        assert_eq!(config.redis.as_ref().unwrap().key_prefix, "price_analysis");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_database_url() {
        let config = AppConfig {
            database: Some(DatabaseConfig {
                url: "mysql://localhost/test".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));
    }
}
