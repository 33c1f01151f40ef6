//! Converters and converter providers.
//!
//! A [`Converter`] pairs two functions between one SQL type and one host
//! type. A [`ConverterProvider`] picks the converter for a type pair.

mod default_provider;
mod enum_converter;
mod provider;

pub use default_provider::DefaultConverterProvider;
pub use enum_converter::EnumConverter;
pub use provider::ConverterProvider;

use std::fmt;
use std::sync::Arc;

use crate::errors::ConversionResult;
use crate::types::{HostType, HostValue, SqlType, SqlValue};

type DecodeFn = dyn Fn(&SqlValue) -> ConversionResult<HostValue> + Send + Sync;
type EncodeFn = dyn Fn(&HostValue) -> ConversionResult<SqlValue> + Send + Sync;

/// Bidirectional conversion between a SQL type and a host type
///
/// Converters are immutable; cloning shares the underlying functions.
#[derive(Clone)]
pub struct Converter {
    from_type: SqlType,
    to_type: HostType,
    decode: Arc<DecodeFn>,
    encode: Arc<EncodeFn>,
}

impl Converter {
    /// Build a converter whose functions also receive `Null` values
    pub fn of<D, E>(from_type: SqlType, to_type: HostType, decode: D, encode: E) -> Self
    where
        D: Fn(&SqlValue) -> ConversionResult<HostValue> + Send + Sync + 'static,
        E: Fn(&HostValue) -> ConversionResult<SqlValue> + Send + Sync + 'static,
    {
        Self {
            from_type,
            to_type,
            decode: Arc::new(decode),
            encode: Arc::new(encode),
        }
    }

    /// Build a converter that maps `Null` to `Null` in both directions;
    /// the functions only ever see non-null values
    pub fn of_nullable<D, E>(from_type: SqlType, to_type: HostType, decode: D, encode: E) -> Self
    where
        D: Fn(&SqlValue) -> ConversionResult<HostValue> + Send + Sync + 'static,
        E: Fn(&HostValue) -> ConversionResult<SqlValue> + Send + Sync + 'static,
    {
        Self::of(
            from_type,
            to_type,
            move |value| match value {
                SqlValue::Null => Ok(HostValue::Null),
                value => decode(value),
            },
            move |value| match value {
                HostValue::Null => Ok(SqlValue::Null),
                value => encode(value),
            },
        )
    }

    /// SQL type this converter reads and writes
    pub fn from_type(&self) -> &SqlType {
        &self.from_type
    }

    /// Host type this converter produces and accepts
    pub fn to_type(&self) -> &HostType {
        &self.to_type
    }

    /// Convert a column value into a host value
    pub fn decode(&self, value: &SqlValue) -> ConversionResult<HostValue> {
        (self.decode)(value)
    }

    /// Convert a host value into a column or parameter value
    pub fn encode(&self, value: &HostValue) -> ConversionResult<SqlValue> {
        (self.encode)(value)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("from_type", &self.from_type)
            .field("to_type", &self.to_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
