//! Unit tests for row mapping and parameter binding

use std::sync::Arc;

use chrono::NaiveDate;
use dps_core::errors::ConversionError;
use dps_core::types::{
    EnumType, HostType, HostValue, Json, Record, RecordType, SqlDate, SqlType, SqlValue,
};

use crate::codec::JsonCodec;
use crate::converter::ConverterResolver;
use crate::database::mapping::{Column, RowMapper};

fn mapper() -> RowMapper {
    RowMapper::new(Arc::new(ConverterResolver::new(Arc::new(JsonCodec::default()))))
}

fn status() -> EnumType {
    EnumType::new("Status", ["ACTIVE", "SUSPENDED"])
}

fn address() -> RecordType {
    RecordType::new("Address")
        .field("streetName", HostType::String)
        .field("postCode", HostType::String)
}

fn customer() -> RecordType {
    RecordType::new("Customer")
        .field("id", HostType::Int)
        .field("fullName", HostType::String)
        .field("signedUpOn", HostType::LocalDate)
        .field("status", HostType::enumeration(status()))
        .field("homeAddress", HostType::record(address()))
}

#[test]
fn test_map_row_matches_snake_case_columns() {
    let columns = vec![
        Column::new("id", SqlType::BigInt),
        Column::new("full_name", SqlType::Varchar),
        Column::new("signed_up_on", SqlType::Date),
        Column::new("status", SqlType::Varchar),
        Column::new("home_address", SqlType::Json),
    ];
    let values = vec![
        SqlValue::BigInt(42),
        SqlValue::Varchar("Ann Lee".into()),
        SqlValue::Date(SqlDate::from_parts(2024, 3, 1).unwrap()),
        SqlValue::Varchar("ACTIVE".into()),
        SqlValue::Json(Json::value_of(r#"{"street_name":"Main St","post_code":"1010"}"#)),
    ];

    let record = mapper().map_row(&columns, &values, &customer()).unwrap();

    assert_eq!(record.get("id"), Some(&HostValue::Int(42)));
    assert_eq!(record.get("fullName"), Some(&HostValue::String("Ann Lee".into())));
    assert_eq!(
        record.get("signedUpOn"),
        Some(&HostValue::LocalDate(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()))
    );
    assert_eq!(
        record.get("status"),
        Some(&HostValue::Enum(status().by_name("ACTIVE").unwrap()))
    );
    assert_eq!(
        record.get("homeAddress"),
        Some(&HostValue::Record(
            Record::of(&address())
                .with("streetName", "Main St")
                .with("postCode", "1010")
        ))
    );
}

#[test]
fn test_map_row_skips_unknown_columns_and_leaves_missing_fields_null() {
    let columns = vec![
        Column::new("id", SqlType::BigInt),
        Column::new("created_by", SqlType::Varchar),
    ];
    let values = vec![SqlValue::BigInt(1), SqlValue::Varchar("batch".into())];

    let record = mapper().map_row(&columns, &values, &customer()).unwrap();

    assert_eq!(record.get("id"), Some(&HostValue::Int(1)));
    assert_eq!(record.get("fullName"), Some(&HostValue::Null));
    assert_eq!(record.get("created_by"), None);
}

#[test]
fn test_map_row_null_columns_stay_null() {
    let columns = vec![
        Column::new("signed_up_on", SqlType::Date),
        Column::new("status", SqlType::Varchar),
    ];
    let values = vec![SqlValue::Null, SqlValue::Null];

    let record = mapper().map_row(&columns, &values, &customer()).unwrap();

    assert_eq!(record.get("signedUpOn"), Some(&HostValue::Null));
    assert_eq!(record.get("status"), Some(&HostValue::Null));
}

#[test]
fn test_map_row_reports_unknown_enum_constant() {
    let columns = vec![Column::new("status", SqlType::Varchar)];
    let values = vec![SqlValue::Varchar("active".into())];

    let err = mapper().map_row(&columns, &values, &customer()).unwrap_err();

    assert!(matches!(err, ConversionError::InvalidValue { .. }));
}

#[test]
fn test_map_row_reports_unsupported_pair() {
    let columns = vec![Column::new("id", SqlType::Other("money".into()))];
    let values = vec![SqlValue::Varchar("$1.00".into())];

    let err = mapper().map_row(&columns, &values, &customer()).unwrap_err();

    assert!(matches!(err, ConversionError::Unsupported { .. }));
}

#[test]
fn test_map_row_rejects_mismatched_lengths() {
    let columns = vec![Column::new("id", SqlType::BigInt)];

    let err = mapper().map_row(&columns, &[], &customer()).unwrap_err();

    assert!(matches!(err, ConversionError::UnexpectedValue { .. }));
}

#[test]
fn test_bind_encodes_host_values() {
    let mapper = mapper();
    let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();

    assert_eq!(
        mapper
            .bind(&HostValue::LocalDate(date), &HostType::LocalDate, &SqlType::Date)
            .unwrap(),
        SqlValue::Date(SqlDate::value_of(date))
    );
    assert_eq!(
        mapper
            .bind(
                &HostValue::Enum(status().by_name("SUSPENDED").unwrap()),
                &HostType::enumeration(status()),
                &SqlType::Varchar
            )
            .unwrap(),
        SqlValue::Varchar("SUSPENDED".into())
    );
}

#[test]
fn test_bind_record_as_json_payload() {
    let address = Record::of(&address())
        .with("streetName", "Main St")
        .with("postCode", "1010");

    let bound = mapper()
        .bind(&HostValue::Record(address), &HostType::record(self::address()), &SqlType::Json)
        .unwrap();

    let SqlValue::Json(json) = bound else {
        panic!("expected a JSON payload, got {bound:?}");
    };
    let doc: serde_json::Value = serde_json::from_str(json.data()).unwrap();
    assert_eq!(doc, serde_json::json!({"street_name": "Main St", "post_code": "1010"}));
}
