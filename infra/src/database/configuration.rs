//! Query layer configuration
//!
//! Binds the connection provider, SQL dialect and converter provider the
//! query layer executes with.

use std::sync::Arc;

use dps_core::converter::ConverterProvider;
use dps_shared::{AppConfig, CodecConfig, SqlDialect};

use super::connection::DatabasePool;
use super::mapping::RowMapper;
use super::provider::{ConnectionProvider, DataSourceConnectionProvider};
use crate::codec::JsonCodec;
use crate::converter::ConverterResolver;
use crate::InfrastructureError;

/// Configuration handed to the query layer
#[derive(Clone)]
pub struct DslConfiguration {
    connection_provider: Arc<dyn ConnectionProvider>,
    dialect: SqlDialect,
    converter_provider: Arc<dyn ConverterProvider>,
}

impl DslConfiguration {
    /// Configuration over `connection_provider`, using the PostgreSQL dialect
    /// and the default converter resolver
    pub fn new(connection_provider: Arc<dyn ConnectionProvider>) -> Self {
        Self {
            connection_provider,
            dialect: SqlDialect::default(),
            converter_provider: Arc::new(ConverterResolver::new(Arc::new(JsonCodec::default()))),
        }
    }

    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_converter_provider(mut self, converter_provider: Arc<dyn ConverterProvider>) -> Self {
        self.converter_provider = converter_provider;
        self
    }

    /// Wire a pool and codec settings into a configuration
    pub fn from_parts(pool: DatabasePool, codec: &CodecConfig, dialect: SqlDialect) -> Self {
        let codec = Arc::new(JsonCodec::new(codec.clone()));
        Self::new(Arc::new(DataSourceConnectionProvider::new(pool)))
            .with_dialect(dialect)
            .with_converter_provider(Arc::new(ConverterResolver::new(codec)))
    }

    pub fn connection_provider(&self) -> &Arc<dyn ConnectionProvider> {
        &self.connection_provider
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    pub fn converter_provider(&self) -> &Arc<dyn ConverterProvider> {
        &self.converter_provider
    }

    /// Row mapper resolving through this configuration's converters
    pub fn row_mapper(&self) -> RowMapper {
        RowMapper::new(Arc::clone(&self.converter_provider))
    }
}

impl std::fmt::Debug for DslConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DslConfiguration")
            .field("dialect", &self.dialect)
            .finish_non_exhaustive()
    }
}

/// Build the query configuration for an application
///
/// Connections are opened lazily, so this succeeds without a reachable
/// database. Must be called from within a Tokio runtime.
pub async fn configure(config: &AppConfig) -> Result<DslConfiguration, InfrastructureError> {
    tracing::info!(
        environment = %config.environment,
        dialect = %config.database.dialect,
        "Configuring query layer"
    );

    let pool = DatabasePool::lazy(config.database.clone())?;
    let configuration = DslConfiguration::from_parts(pool, &config.codec, config.database.dialect);

    tracing::debug!(
        naming = ?config.codec.naming,
        use_annotations = config.codec.use_annotations,
        "JSON codec configured"
    );

    Ok(configuration)
}
