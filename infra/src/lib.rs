//! # Infrastructure Layer
//!
//! Connects the conversion model of `dps_core` to PostgreSQL and JSON:
//! - **Codec**: JSON encoding with snake_case naming and ISO-8601 temporal values
//! - **Converter**: the resolver selecting converters per column and parameter
//! - **Database**: connection pool, connection provider, query configuration
//!   and row mapping using SQLx
//! - **Telemetry**: tracing subscriber setup
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use dps_core::{ConverterProvider, HostType, HostValue, Json, RecordType, SqlType, SqlValue};
//! use dps_infra::codec::JsonCodec;
//! use dps_infra::converter::ConverterResolver;
//!
//! let resolver = ConverterResolver::new(Arc::new(JsonCodec::default()));
//! let person = RecordType::new("Person")
//!     .field("firstName", HostType::String)
//!     .field("lastName", HostType::String);
//!
//! let converter = resolver.require(&SqlType::Json, &HostType::record(person)).unwrap();
//! let value = converter
//!     .decode(&SqlValue::Json(Json::value_of(r#"{"first_name":"Ann","last_name":"Lee"}"#)))
//!     .unwrap();
//! assert!(matches!(value, HostValue::Record(_)));
//! ```

pub mod codec;
pub mod converter;
pub mod database;
pub mod telemetry;

use dps_core::errors::ConversionError;

/// Configuration types consumed by the infrastructure layer
pub mod config {
    pub use dps_shared::config::{
        AppConfig, CodecConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig,
        NamingStrategy, SqlDialect, ENV_PREFIX,
    };
}

/// Load configuration, install tracing and build the query configuration
///
/// A tracing subscriber that is already installed is kept.
pub async fn initialize() -> Result<database::DslConfiguration, InfrastructureError> {
    let config = config::AppConfig::load()?;

    if let Err(e) = telemetry::init_tracing(&config.logging) {
        tracing::warn!("Keeping existing tracing setup: {}", e);
    }

    tracing::info!("Initializing infrastructure for {}", config.environment);
    let configuration = database::configure(&config).await?;
    tracing::info!("Infrastructure initialized successfully");

    Ok(configuration)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration source could not be read or deserialized
    #[error("Configuration error: {0}")]
    Settings(#[from] ::config::ConfigError),

    /// Value conversion error
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),
}
