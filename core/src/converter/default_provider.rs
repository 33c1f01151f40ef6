//! Library default converter provider
//!
//! Covers the pairs the query layer handles on its own: identity mappings,
//! integer widening, text parsing and the textual rendering of date/time and
//! JSON columns. Every other pair has no converter.

use std::str::FromStr;

use super::{Converter, ConverterProvider};
use crate::errors::{ConversionError, ConversionResult};
use crate::types::{HostType, HostValue, Json, SqlDate, SqlTime, SqlTimestamp, SqlType, SqlValue};

/// Fallback provider used when no custom rule matches
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConverterProvider;

impl DefaultConverterProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ConverterProvider for DefaultConverterProvider {
    fn resolve(&self, from: &SqlType, to: &HostType) -> Option<Converter> {
        let (from_type, to_type) = (from.clone(), to.clone());
        let converter = match (from, to) {
            (SqlType::Boolean, HostType::Bool) => Converter::of_nullable(
                from_type,
                to_type,
                |v| match v {
                    SqlValue::Boolean(b) => Ok(HostValue::Bool(*b)),
                    other => Err(ConversionError::unexpected("boolean", other.kind())),
                },
                |v| match v {
                    HostValue::Bool(b) => Ok(SqlValue::Boolean(*b)),
                    other => Err(ConversionError::unexpected("Bool", other.kind())),
                },
            ),
            (SqlType::BigInt, HostType::Int) => Converter::of_nullable(
                from_type,
                to_type,
                |v| match v {
                    SqlValue::BigInt(n) => Ok(HostValue::Int(*n)),
                    other => Err(ConversionError::unexpected("bigint", other.kind())),
                },
                |v| match v {
                    HostValue::Int(n) => Ok(SqlValue::BigInt(*n)),
                    other => Err(ConversionError::unexpected("Int", other.kind())),
                },
            ),
            (SqlType::Double, HostType::Float) => Converter::of_nullable(
                from_type,
                to_type,
                |v| match v {
                    SqlValue::Double(n) => Ok(HostValue::Float(*n)),
                    other => Err(ConversionError::unexpected("double precision", other.kind())),
                },
                |v| match v {
                    HostValue::Float(n) => Ok(SqlValue::Double(*n)),
                    other => Err(ConversionError::unexpected("Float", other.kind())),
                },
            ),
            (SqlType::BigInt, HostType::Float) => Converter::of_nullable(
                from_type,
                to_type,
                |v| match v {
                    SqlValue::BigInt(n) => Ok(HostValue::Float(*n as f64)),
                    other => Err(ConversionError::unexpected("bigint", other.kind())),
                },
                |v| match v {
                    HostValue::Float(n) if n.fract() == 0.0 && fits_i64(*n) => {
                        Ok(SqlValue::BigInt(*n as i64))
                    }
                    HostValue::Float(n) => Err(ConversionError::Unconvertible {
                        value: n.to_string(),
                        target: "bigint".to_string(),
                    }),
                    other => Err(ConversionError::unexpected("Float", other.kind())),
                },
            ),
            (SqlType::Varchar | SqlType::Other(_), HostType::String) => Converter::of_nullable(
                from_type,
                to_type,
                |v| match v {
                    SqlValue::Varchar(s) => Ok(HostValue::String(s.clone())),
                    other => Err(ConversionError::unexpected("varchar", other.kind())),
                },
                |v| match v {
                    HostValue::String(s) => Ok(SqlValue::Varchar(s.clone())),
                    other => Err(ConversionError::unexpected("String", other.kind())),
                },
            ),
            (SqlType::Varchar, HostType::Int) => parsing(from_type, to_type, |s| {
                parse::<i64>(s, "Int").map(HostValue::Int)
            }),
            (SqlType::Varchar, HostType::Float) => parsing(from_type, to_type, |s| {
                parse::<f64>(s, "Float").map(HostValue::Float)
            }),
            (SqlType::Varchar, HostType::Bool) => parsing(from_type, to_type, |s| {
                parse::<bool>(s, "Bool").map(HostValue::Bool)
            }),
            (SqlType::Date | SqlType::Time | SqlType::Timestamp | SqlType::Json, HostType::String) => {
                textual(from_type, to_type)
            }
            _ => return None,
        };

        Some(converter)
    }
}

/// Whole floats in `i64` range; the upper bound is 2^63 and exclusive
fn fits_i64(n: f64) -> bool {
    n >= i64::MIN as f64 && n < i64::MAX as f64
}

fn parse<T: FromStr>(text: &str, target: &str) -> ConversionResult<T> {
    text.trim().parse().map_err(|_| ConversionError::Unconvertible {
        value: text.to_string(),
        target: target.to_string(),
    })
}

/// Varchar column holding the text form of a scalar host value
fn parsing<F>(from_type: SqlType, to_type: HostType, parse_fn: F) -> Converter
where
    F: Fn(&str) -> ConversionResult<HostValue> + Send + Sync + 'static,
{
    Converter::of_nullable(
        from_type,
        to_type,
        move |v| match v {
            SqlValue::Varchar(s) => parse_fn(s),
            other => Err(ConversionError::unexpected("varchar", other.kind())),
        },
        |v| match v {
            HostValue::Int(n) => Ok(SqlValue::Varchar(n.to_string())),
            HostValue::Float(n) => Ok(SqlValue::Varchar(n.to_string())),
            HostValue::Bool(b) => Ok(SqlValue::Varchar(b.to_string())),
            other => Err(ConversionError::unexpected("Int, Float or Bool", other.kind())),
        },
    )
}

/// Date, time, timestamp or JSON column read as its text form
fn textual(from_type: SqlType, to_type: HostType) -> Converter {
    let target = from_type.clone();
    Converter::of_nullable(
        from_type,
        to_type,
        |v| match v {
            SqlValue::Date(d) => Ok(HostValue::String(d.to_string())),
            SqlValue::Time(t) => Ok(HostValue::String(t.to_string())),
            SqlValue::Timestamp(ts) => Ok(HostValue::String(ts.to_string())),
            SqlValue::Json(json) => Ok(HostValue::String(json.data().to_string())),
            other => Err(ConversionError::unexpected("date, time, timestamp or json", other.kind())),
        },
        move |v| {
            let HostValue::String(s) = v else {
                return Err(ConversionError::unexpected("String", v.kind()));
            };
            let unconvertible = |_| ConversionError::Unconvertible {
                value: s.clone(),
                target: target.to_string(),
            };
            match target {
                SqlType::Date => s.parse::<SqlDate>().map(SqlValue::Date).map_err(unconvertible),
                SqlType::Time => s.parse::<SqlTime>().map(SqlValue::Time).map_err(unconvertible),
                SqlType::Timestamp => s
                    .parse::<SqlTimestamp>()
                    .map(SqlValue::Timestamp)
                    .map_err(unconvertible),
                _ => Ok(SqlValue::Json(Json::value_of(s.clone()))),
            }
        },
    )
}
