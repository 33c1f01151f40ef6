//! Integration tests for converter resolution through the public API

use std::sync::Arc;
use std::thread;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use dps_core::{
    ConversionError, ConverterProvider, EnumType, HostType, HostValue, Json, Record, RecordType,
    SqlTimestamp, SqlType, SqlValue,
};
use dps_infra::codec::temporal::serde_formats;
use dps_infra::codec::JsonCodec;
use dps_infra::config::CodecConfig;
use dps_infra::converter::ConverterResolver;
use dps_infra::database::{Column, RowMapper};

fn order_type() -> RecordType {
    RecordType::new("Order")
        .field("orderId", HostType::Int)
        .field("placedAt", HostType::LocalDateTime)
        .field("shipTo", HostType::String)
}

fn resolver() -> Arc<ConverterResolver> {
    Arc::new(ConverterResolver::new(Arc::new(JsonCodec::new(CodecConfig::default()))))
}

#[test]
fn test_json_column_round_trip() {
    let resolver = resolver();
    let target = HostType::record(order_type());
    let converter = resolver.require(&SqlType::Json, &target).unwrap();

    let payload = SqlValue::Json(Json::value_of(
        r#"{"order_id":17,"placed_at":"2024-03-01T10:15:00Z","ship_to":"Berlin"}"#,
    ));
    let decoded = converter.decode(&payload).unwrap();

    let placed_at = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(10, 15, 0)
        .unwrap();
    let expected = Record::of(&order_type())
        .with("orderId", 17i64)
        .with("placedAt", HostValue::LocalDateTime(placed_at))
        .with("shipTo", "Berlin");
    assert_eq!(decoded, HostValue::Record(expected));

    let encoded = converter.encode(&decoded).unwrap();
    assert_eq!(converter.decode(&encoded).unwrap(), decoded);
}

#[test]
fn test_malformed_payload_is_a_data_mapping_error() {
    let converter = resolver()
        .require(&SqlType::Json, &HostType::record(order_type()))
        .unwrap();

    let err = converter
        .decode(&SqlValue::Json(Json::value_of(r#"{"order_id":"#)))
        .unwrap_err();

    assert!(err.is_data_mapping());
}

#[test]
fn test_unresolvable_pair_is_unsupported_at_the_boundary() {
    let resolver = resolver();
    let target = HostType::list(HostType::Int);

    assert!(resolver.resolve(&SqlType::Boolean, &target).is_none());
    assert!(matches!(
        resolver.require(&SqlType::Boolean, &target),
        Err(ConversionError::Unsupported { .. })
    ));
}

#[test]
fn test_resolver_is_shared_across_threads() {
    let resolver = resolver();
    let priority = EnumType::new("Priority", ["LOW", "HIGH"]);

    let handles: Vec<_> = ["LOW", "HIGH", "LOW", "HIGH"]
        .into_iter()
        .map(|name| {
            let resolver = Arc::clone(&resolver);
            let target = HostType::enumeration(priority.clone());
            thread::spawn(move || {
                let converter = resolver.require(&SqlType::Varchar, &target).unwrap();
                converter.decode(&SqlValue::Varchar(name.to_string())).unwrap()
            })
        })
        .collect();

    for (handle, name) in handles.into_iter().zip(["LOW", "HIGH", "LOW", "HIGH"]) {
        let HostValue::Enum(constant) = handle.join().unwrap() else {
            panic!("expected an enum constant");
        };
        assert_eq!(constant.name(), name);
    }
}

#[test]
fn test_row_mapper_over_resolver() {
    let mapper = RowMapper::new(resolver());
    let placed_at = NaiveDate::from_ymd_opt(2023, 11, 5)
        .unwrap()
        .and_hms_opt(8, 0, 30)
        .unwrap();

    let record = mapper
        .map_row(
            &[
                Column::new("order_id", SqlType::BigInt),
                Column::new("placed_at", SqlType::Timestamp),
            ],
            &[
                SqlValue::BigInt(3),
                SqlValue::Timestamp(SqlTimestamp::value_of(placed_at)),
            ],
            &order_type(),
        )
        .unwrap();

    assert_eq!(record.get("orderId"), Some(&HostValue::Int(3)));
    assert_eq!(record.get("placedAt"), Some(&HostValue::LocalDateTime(placed_at)));
    assert_eq!(record.get("shipTo"), Some(&HostValue::Null));
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct AuditEntry {
    actor_name: String,
    #[serde(with = "serde_formats::local_date_time")]
    recorded_at: NaiveDateTime,
}

#[test]
fn test_typed_values_use_wire_formats() {
    let codec = JsonCodec::default();
    let entry = AuditEntry {
        actor_name: "batch".into(),
        recorded_at: NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap(),
    };

    let json = codec.write_value(&entry).unwrap();
    assert_eq!(
        json,
        r#"{"actor_name":"batch","recorded_at":"2024-03-01T10:15:00Z"}"#
    );
    assert_eq!(codec.read_value::<AuditEntry>(&json).unwrap(), entry);
}
