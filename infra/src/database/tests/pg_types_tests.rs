//! Unit tests for PostgreSQL type mapping

use dps_core::types::SqlType;

use crate::database::pg_types::sql_type_for;

#[test]
fn test_integer_types_map_to_bigint() {
    for name in ["INT2", "INT4", "INT8", "integer"] {
        assert_eq!(sql_type_for(name), SqlType::BigInt, "{name}");
    }
}

#[test]
fn test_temporal_and_json_types() {
    assert_eq!(sql_type_for("DATE"), SqlType::Date);
    assert_eq!(sql_type_for("TIME"), SqlType::Time);
    assert_eq!(sql_type_for("TIMESTAMP"), SqlType::Timestamp);
    assert_eq!(sql_type_for("JSONB"), SqlType::Json);
    assert_eq!(sql_type_for("json"), SqlType::Json);
}

#[test]
fn test_text_like_types_map_to_varchar() {
    assert_eq!(sql_type_for("TEXT"), SqlType::Varchar);
    assert_eq!(sql_type_for("BPCHAR"), SqlType::Varchar);
    assert_eq!(sql_type_for("UUID"), SqlType::Varchar);
}

#[test]
fn test_unknown_types_keep_their_name() {
    assert_eq!(sql_type_for("MONEY"), SqlType::Other("money".into()));
    assert_eq!(sql_type_for("TIMESTAMPTZ"), SqlType::Other("timestamptz".into()));
}
