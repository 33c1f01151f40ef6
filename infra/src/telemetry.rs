//! Tracing subscriber setup

use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};
use crate::InfrastructureError;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Fails if the filter
/// does not parse or a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let builder = subscriber(config)?;

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| InfrastructureError::Config(format!("Failed to install tracing subscriber: {}", e)))
}

fn subscriber(
    config: &LoggingConfig,
) -> Result<SubscriberBuilder<DefaultFields, Format, EnvFilter>, InfrastructureError> {
    Ok(tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.level)?)
        .with_ansi(config.colored)
        .with_file(config.source_location)
        .with_line_number(config.source_location))
}

/// Filter from `RUST_LOG`, falling back to `level`
pub fn env_filter(level: &str) -> Result<EnvFilter, InfrastructureError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| InfrastructureError::Config(format!("Invalid log filter '{}': {}", level, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_accepts_directives() {
        std::env::remove_var("RUST_LOG");
        assert!(env_filter("info,sqlx=warn").is_ok());
        assert!(env_filter("dps_infra=trace").is_ok());
    }

    #[test]
    fn test_env_filter_rejects_garbage() {
        std::env::remove_var("RUST_LOG");
        assert!(matches!(env_filter("dps_infra=loudest"), Err(InfrastructureError::Config(_))));
    }

    #[test]
    fn test_second_install_fails() {
        let config = LoggingConfig {
            format: LogFormat::Compact,
            ..LoggingConfig::default()
        };

        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }
}
