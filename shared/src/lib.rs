//! Shared configuration types for the database starter
//!
//! This crate holds the process-wide settings every other crate consumes:
//! - Database connection and pool configuration
//! - JSON codec naming and temporal policy
//! - Environment detection and logging configuration

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CodecConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    NamingStrategy, SqlDialect,
};
