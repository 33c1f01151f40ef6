//! Unit tests for the enum converter

use std::sync::Arc;

use crate::converter::EnumConverter;
use crate::errors::ConversionError;
use crate::types::{EnumType, HostValue, Json, SqlType, SqlValue};

fn status() -> Arc<EnumType> {
    Arc::new(EnumType::new("Status", ["ACTIVE", "SUSPENDED", "DELETED"]))
}

#[test]
fn test_decode_every_constant_by_name() {
    let status = status();
    let converter = EnumConverter::new(SqlType::Varchar, Arc::clone(&status));

    for name in status.constant_names() {
        let decoded = converter.decode(&SqlValue::Varchar(name.clone())).unwrap();
        assert_eq!(decoded, HostValue::Enum(status.by_name(name).unwrap()));
        assert_eq!(converter.encode(&decoded).unwrap(), SqlValue::Varchar(name.clone()));
    }
}

#[test]
fn test_unmatched_name_is_invalid_value() {
    let converter = EnumConverter::new(SqlType::Varchar, status());

    let err = converter.decode(&SqlValue::Varchar("active".into())).unwrap_err();
    match err {
        ConversionError::InvalidValue { enum_type, value } => {
            assert_eq!(enum_type, "Status");
            assert_eq!(value, "active");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_integer_source_uses_ordinal() {
    let status = status();
    let converter = EnumConverter::new(SqlType::BigInt, Arc::clone(&status));

    let decoded = converter.decode(&SqlValue::BigInt(1)).unwrap();
    assert_eq!(decoded, HostValue::Enum(status.by_name("SUSPENDED").unwrap()));
    assert_eq!(converter.encode(&decoded).unwrap(), SqlValue::BigInt(1));

    assert!(matches!(
        converter.decode(&SqlValue::BigInt(3)),
        Err(ConversionError::InvalidValue { .. })
    ));
    assert!(matches!(
        converter.decode(&SqlValue::BigInt(-1)),
        Err(ConversionError::InvalidValue { .. })
    ));
}

#[test]
fn test_json_source_accepts_string_literal() {
    let status = status();
    let converter = EnumConverter::new(SqlType::Json, Arc::clone(&status));

    let decoded = converter.decode(&SqlValue::Json(Json::value_of("\"DELETED\""))).unwrap();
    assert_eq!(decoded, HostValue::Enum(status.by_name("DELETED").unwrap()));
    assert_eq!(
        converter.encode(&decoded).unwrap(),
        SqlValue::Json(Json::value_of("\"DELETED\""))
    );
}

#[test]
fn test_null_passes_through() {
    let converter = EnumConverter::new(SqlType::Varchar, status());
    assert_eq!(converter.decode(&SqlValue::Null).unwrap(), HostValue::Null);
    assert_eq!(converter.encode(&HostValue::Null).unwrap(), SqlValue::Null);
}

#[test]
fn test_encode_rejects_foreign_constant() {
    let converter = EnumConverter::new(SqlType::Varchar, status());
    let foreign = EnumType::new("Role", ["ACTIVE"]).by_name("ACTIVE").unwrap();

    assert!(matches!(
        converter.encode(&HostValue::Enum(foreign)),
        Err(ConversionError::InvalidValue { .. })
    ));
    assert!(matches!(
        converter.encode(&HostValue::String("ACTIVE".into())),
        Err(ConversionError::UnexpectedValue { .. })
    ));
}

#[test]
fn test_unsupported_source_value() {
    let converter = EnumConverter::new(SqlType::Varchar, status());
    assert!(matches!(
        converter.decode(&SqlValue::Boolean(true)),
        Err(ConversionError::UnexpectedValue { .. })
    ));
}
