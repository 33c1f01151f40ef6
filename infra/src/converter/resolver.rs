//! Converter resolver
//!
//! Selects the converter the query layer uses for a column or parameter.
//! Rules are checked in a fixed order and the first match wins:
//!
//! 1. target `LocalDate` - `date` column
//! 2. target `LocalTime` - `time` column
//! 3. target `LocalDateTime` - `timestamp` column
//! 4. target enum - name or ordinal lookup
//! 5. source `json` - payload mapped through the [`JsonCodec`]
//!
//! Pairs matching no rule get exactly what the fallback provider returns.

use std::sync::Arc;

use dps_core::converter::{Converter, ConverterProvider, DefaultConverterProvider, EnumConverter};
use dps_core::errors::ConversionError;
use dps_core::types::{HostType, HostValue, Json, SqlDate, SqlTime, SqlTimestamp, SqlType, SqlValue};

use crate::codec::JsonCodec;

/// One custom resolution rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRule {
    LocalDate,
    LocalTime,
    LocalDateTime,
    Enum,
    Json,
}

impl ResolutionRule {
    /// Rules in evaluation order
    pub const ORDERED: [ResolutionRule; 5] = [
        ResolutionRule::LocalDate,
        ResolutionRule::LocalTime,
        ResolutionRule::LocalDateTime,
        ResolutionRule::Enum,
        ResolutionRule::Json,
    ];

    /// First rule matching the pair, if any
    pub fn select(from: &SqlType, to: &HostType) -> Option<Self> {
        Self::ORDERED.into_iter().find(|rule| rule.matches(from, to))
    }

    fn matches(self, from: &SqlType, to: &HostType) -> bool {
        match self {
            ResolutionRule::LocalDate => matches!(to, HostType::LocalDate),
            ResolutionRule::LocalTime => matches!(to, HostType::LocalTime),
            ResolutionRule::LocalDateTime => matches!(to, HostType::LocalDateTime),
            ResolutionRule::Enum => to.is_enum(),
            ResolutionRule::Json => matches!(from, SqlType::Json),
        }
    }

    fn converter(self, from: &SqlType, to: &HostType, codec: &Arc<JsonCodec>) -> Option<Converter> {
        match self {
            ResolutionRule::LocalDate => Some(local_date()),
            ResolutionRule::LocalTime => Some(local_time()),
            ResolutionRule::LocalDateTime => Some(local_date_time()),
            ResolutionRule::Enum => match to {
                HostType::Enum(enum_type) => Some(EnumConverter::new(from.clone(), Arc::clone(enum_type))),
                _ => None,
            },
            ResolutionRule::Json => Some(json(from, to, codec)),
        }
    }
}

/// Converter provider with date/time, enum and JSON rules in front of a
/// fallback provider
#[derive(Debug, Clone)]
pub struct ConverterResolver<F = DefaultConverterProvider> {
    codec: Arc<JsonCodec>,
    fallback: F,
}

impl ConverterResolver {
    /// Resolver falling back to the library default provider
    pub fn new(codec: Arc<JsonCodec>) -> Self {
        Self::with_fallback(codec, DefaultConverterProvider::new())
    }
}

impl<F: ConverterProvider> ConverterResolver<F> {
    /// Resolver falling back to `fallback` when no rule matches
    pub fn with_fallback(codec: Arc<JsonCodec>, fallback: F) -> Self {
        Self { codec, fallback }
    }

    pub fn codec(&self) -> &JsonCodec {
        &self.codec
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }
}

impl<F: ConverterProvider> ConverterProvider for ConverterResolver<F> {
    fn resolve(&self, from: &SqlType, to: &HostType) -> Option<Converter> {
        ResolutionRule::select(from, to)
            .and_then(|rule| rule.converter(from, to, &self.codec))
            .or_else(|| self.fallback.resolve(from, to))
    }
}

fn local_date() -> Converter {
    Converter::of_nullable(
        SqlType::Date,
        HostType::LocalDate,
        |v| match v {
            SqlValue::Date(date) => Ok(HostValue::LocalDate(date.to_local_date())),
            other => Err(ConversionError::unexpected(SqlType::Date, other.kind())),
        },
        |v| match v {
            HostValue::LocalDate(date) => Ok(SqlValue::Date(SqlDate::value_of(*date))),
            other => Err(ConversionError::unexpected(HostType::LocalDate, other.kind())),
        },
    )
}

fn local_time() -> Converter {
    Converter::of_nullable(
        SqlType::Time,
        HostType::LocalTime,
        |v| match v {
            SqlValue::Time(time) => Ok(HostValue::LocalTime(time.to_local_time())),
            other => Err(ConversionError::unexpected(SqlType::Time, other.kind())),
        },
        |v| match v {
            HostValue::LocalTime(time) => Ok(SqlValue::Time(SqlTime::value_of(*time))),
            other => Err(ConversionError::unexpected(HostType::LocalTime, other.kind())),
        },
    )
}

fn local_date_time() -> Converter {
    Converter::of_nullable(
        SqlType::Timestamp,
        HostType::LocalDateTime,
        |v| match v {
            SqlValue::Timestamp(ts) => Ok(HostValue::LocalDateTime(ts.to_local_date_time())),
            other => Err(ConversionError::unexpected(SqlType::Timestamp, other.kind())),
        },
        |v| match v {
            HostValue::LocalDateTime(dt) => Ok(SqlValue::Timestamp(SqlTimestamp::value_of(*dt))),
            other => Err(ConversionError::unexpected(HostType::LocalDateTime, other.kind())),
        },
    )
}

fn json(from: &SqlType, to: &HostType, codec: &Arc<JsonCodec>) -> Converter {
    let (decoder, encoder) = (Arc::clone(codec), Arc::clone(codec));
    let (target, declared) = (to.clone(), to.clone());

    Converter::of_nullable(
        from.clone(),
        to.clone(),
        move |v| match v {
            SqlValue::Json(payload) => decoder.decode(payload.data(), &target),
            other => Err(ConversionError::unexpected(SqlType::Json, other.kind())),
        },
        move |v| {
            encoder
                .encode_as(v, &declared)
                .map(|text| SqlValue::Json(Json::value_of(text)))
        },
    )
}
