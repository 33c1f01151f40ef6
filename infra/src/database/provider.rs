//! Connection provider handed to the query layer

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{Postgres, Transaction};

use super::connection::DatabasePool;
use crate::InfrastructureError;

/// Source of connections for query execution
///
/// Connections return to their pool when dropped.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// Acquire a connection
    async fn acquire(&self) -> Result<PoolConnection<Postgres>, InfrastructureError>;

    /// Begin a transaction; it rolls back on drop unless committed
    async fn begin(&self) -> Result<Transaction<'static, Postgres>, InfrastructureError>;
}

/// Connection provider backed by a pooled data source
#[derive(Clone, Debug)]
pub struct DataSourceConnectionProvider {
    data_source: DatabasePool,
}

impl DataSourceConnectionProvider {
    pub fn new(data_source: DatabasePool) -> Self {
        Self { data_source }
    }

    pub fn data_source(&self) -> &DatabasePool {
        &self.data_source
    }
}

#[async_trait]
impl ConnectionProvider for DataSourceConnectionProvider {
    async fn acquire(&self) -> Result<PoolConnection<Postgres>, InfrastructureError> {
        tracing::trace!("Acquiring connection: {}", self.data_source.get_statistics());
        self.data_source
            .get_pool()
            .acquire()
            .await
            .map_err(InfrastructureError::Database)
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, InfrastructureError> {
        self.data_source.begin_transaction().await
    }
}
