//! Enum converter
//!
//! Text sources match a constant by its exact, case-sensitive name; integer
//! sources match by ordinal. A JSON source may hold either a JSON string or a
//! bare name.

use std::sync::Arc;

use super::Converter;
use crate::errors::{ConversionError, ConversionResult};
use crate::types::{EnumConstant, EnumType, HostType, HostValue, Json, SqlType, SqlValue};

/// Builds converters between a SQL column and an [`EnumType`]
pub struct EnumConverter;

impl EnumConverter {
    /// Create a converter from `from_type` to the given enum
    pub fn new(from_type: SqlType, enum_type: Arc<EnumType>) -> Converter {
        let decoder = Arc::clone(&enum_type);
        let encoder = Arc::clone(&enum_type);
        let target = from_type.clone();

        Converter::of_nullable(
            from_type,
            HostType::Enum(enum_type),
            move |value| decode(&decoder, value).map(HostValue::Enum),
            move |value| encode(&encoder, &target, value),
        )
    }
}

fn decode(enum_type: &EnumType, value: &SqlValue) -> ConversionResult<EnumConstant> {
    let constant = match value {
        SqlValue::Varchar(name) => enum_type.by_name(name),
        SqlValue::BigInt(ordinal) => usize::try_from(*ordinal)
            .ok()
            .and_then(|ordinal| enum_type.by_ordinal(ordinal)),
        SqlValue::Json(json) => {
            let name = serde_json::from_str::<String>(json.data())
                .unwrap_or_else(|_| json.data().trim().to_string());
            enum_type.by_name(&name)
        }
        other => {
            return Err(ConversionError::unexpected(
                format!("varchar, bigint or json for enum {}", enum_type.name()),
                other.kind(),
            ))
        }
    };

    constant.ok_or_else(|| ConversionError::InvalidValue {
        enum_type: enum_type.name().to_string(),
        value: raw_text(value),
    })
}

fn encode(enum_type: &EnumType, target: &SqlType, value: &HostValue) -> ConversionResult<SqlValue> {
    let HostValue::Enum(constant) = value else {
        return Err(ConversionError::unexpected(
            format!("Enum({})", enum_type.name()),
            value.kind(),
        ));
    };

    if !enum_type.contains(constant) {
        return Err(ConversionError::InvalidValue {
            enum_type: enum_type.name().to_string(),
            value: format!("{}::{}", constant.enum_type(), constant.name()),
        });
    }

    Ok(match target {
        SqlType::BigInt => SqlValue::BigInt(constant.ordinal() as i64),
        SqlType::Json => SqlValue::Json(Json::value_of(serde_json::to_string(constant.name())?)),
        _ => SqlValue::Varchar(constant.name().to_string()),
    })
}

fn raw_text(value: &SqlValue) -> String {
    match value {
        SqlValue::Varchar(s) => s.clone(),
        SqlValue::BigInt(n) => n.to_string(),
        SqlValue::Json(json) => json.data().to_string(),
        other => other.kind(),
    }
}
