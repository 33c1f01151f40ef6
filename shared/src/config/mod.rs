//! Configuration module
//!
//! Settings are grouped by concern:
//! - `codec` - JSON field naming and temporal formatting policy
//! - `database` - Connection pool and SQL dialect configuration
//! - `environment` - Environment detection and logging configuration

pub mod codec;
pub mod database;
pub mod environment;

use ::config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use codec::{CodecConfig, NamingStrategy};
pub use database::{DatabaseConfig, SqlDialect};
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Prefix of environment variables overriding file configuration,
/// e.g. `DPS__DATABASE__MAX_CONNECTIONS=20`
pub const ENV_PREFIX: &str = "DPS";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JSON codec configuration
    #[serde(default)]
    pub codec: CodecConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig::new("postgres://localhost:5432/registry_dev"),
            codec: CodecConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig::new("postgres://registry-db:5432/registry")
                .with_max_connections(50),
            codec: CodecConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Baseline configuration for an environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Self::for_environment(Environment::from_env());
        config.database = DatabaseConfig::from_env();
        config
    }

    /// Load layered configuration
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. Built-in defaults for the detected environment
    /// 2. `config/default.toml` (optional)
    /// 3. The environment-specific file, e.g. `config/production.toml` (optional)
    /// 4. `DPS__*` environment variables, `__` separating nested keys
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let environment = Environment::from_env();
        let defaults = Self::for_environment(environment);

        Config::builder()
            .add_source(Config::try_from(&defaults)?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&environment.config_file()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_profile() {
        let config = AppConfig::production();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.database.dialect, SqlDialect::Postgres);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_staging_derives_from_development() {
        let config = AppConfig::for_environment(Environment::Staging);
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.database.url, AppConfig::development().database.url);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_codec_section_defaults_when_absent() {
        let json = serde_json::json!({
            "environment": "development",
            "database": {
                "url": "postgres://localhost/test",
                "max_connections": 4,
                "connect_timeout": 5,
                "idle_timeout": 60,
                "max_lifetime": 600
            }
        });

        let config: AppConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.codec, CodecConfig::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.database.dialect, SqlDialect::Postgres);
    }
}
