//! # Core Conversion Model
//!
//! Types and contracts shared by every component that moves values between
//! SQL columns and host values:
//! - **Types**: the closed SQL and host type universes and their values
//! - **Converters**: paired decode/encode functions for one type pair
//! - **Providers**: strategies selecting a converter for a type pair
//! - **Errors**: the conversion error taxonomy

pub mod converter;
pub mod errors;
pub mod types;

pub use converter::{Converter, ConverterProvider, DefaultConverterProvider, EnumConverter};
pub use errors::{ConversionError, ConversionResult, MappingFailure};
pub use types::{
    EnumConstant, EnumType, FieldDef, HostType, HostValue, Json, Record, RecordType, SqlDate,
    SqlTime, SqlTimestamp, SqlType, SqlValue,
};
