//! Database module - PostgreSQL wiring using SQLx
//!
//! This module connects the converter resolver to the database:
//! - Connection pool management
//! - Connection provider handed to the query layer
//! - Query configuration (dialect, connection and converter providers)
//! - Result materialization and parameter binding

pub mod configuration;
pub mod connection;
pub mod mapping;
pub mod pg_types;
pub mod provider;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use configuration::{configure, DslConfiguration};
pub use connection::{DatabasePool, PoolStatistics};
pub use mapping::{Column, RowMapper};
pub use provider::{ConnectionProvider, DataSourceConnectionProvider};
