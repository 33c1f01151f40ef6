//! PostgreSQL column types and values

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Column as _, Row, TypeInfo};

use dps_core::types::{Json, SqlDate, SqlTime, SqlTimestamp, SqlType, SqlValue};

use super::mapping::Column;

/// Map a PostgreSQL type name to its SQL type
pub fn sql_type_for(type_name: &str) -> SqlType {
    match type_name.to_ascii_uppercase().as_str() {
        "BOOL" | "BOOLEAN" => SqlType::Boolean,
        "INT2" | "INT4" | "INT8" | "SMALLINT" | "INT" | "INTEGER" | "BIGINT" => SqlType::BigInt,
        "FLOAT4" | "FLOAT8" | "REAL" | "DOUBLE PRECISION" => SqlType::Double,
        "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" | "UUID" => SqlType::Varchar,
        "DATE" => SqlType::Date,
        "TIME" => SqlType::Time,
        "TIMESTAMP" => SqlType::Timestamp,
        "JSON" | "JSONB" => SqlType::Json,
        _ => SqlType::Other(type_name.to_ascii_lowercase()),
    }
}

/// Column metadata of a fetched row
pub fn columns_of(row: &PgRow) -> Vec<Column> {
    row.columns()
        .iter()
        .map(|column| Column::new(column.name(), sql_type_for(column.type_info().name())))
        .collect()
}

/// Decode every column of a fetched row
pub fn values_of(row: &PgRow) -> Result<Vec<SqlValue>, sqlx::Error> {
    (0..row.len()).map(|index| decode_column(row, index)).collect()
}

/// Decode one column of a fetched row
///
/// Types outside the SQL type model are read as text; `timestamptz` is
/// rendered as RFC 3339. Anything sqlx cannot read as text fails to decode.
pub fn decode_column(row: &PgRow, index: usize) -> Result<SqlValue, sqlx::Error> {
    let type_name = row.column(index).type_info().name().to_ascii_uppercase();

    let value = match type_name.as_str() {
        "BOOL" => row.try_get::<Option<bool>, _>(index)?.map(SqlValue::Boolean),
        "INT2" => row
            .try_get::<Option<i16>, _>(index)?
            .map(|n| SqlValue::BigInt(n.into())),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)?
            .map(|n| SqlValue::BigInt(n.into())),
        "INT8" => row.try_get::<Option<i64>, _>(index)?.map(SqlValue::BigInt),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)?
            .map(|n| SqlValue::Double(n.into())),
        "FLOAT8" => row.try_get::<Option<f64>, _>(index)?.map(SqlValue::Double),
        "UUID" => row
            .try_get::<Option<uuid::Uuid>, _>(index)?
            .map(|id| SqlValue::Varchar(id.to_string())),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)?
            .map(|d| SqlValue::Date(SqlDate::value_of(d))),
        "TIME" => row
            .try_get::<Option<NaiveTime>, _>(index)?
            .map(|t| SqlValue::Time(SqlTime::value_of(t))),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)?
            .map(|ts| SqlValue::Timestamp(SqlTimestamp::value_of(ts))),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map(|ts| SqlValue::Varchar(ts.to_rfc3339())),
        "JSON" | "JSONB" => row
            .try_get::<Option<serde_json::Value>, _>(index)?
            .map(|doc| SqlValue::Json(Json::value_of(doc.to_string()))),
        _ => row.try_get::<Option<String>, _>(index)?.map(SqlValue::Varchar),
    };

    Ok(value.unwrap_or(SqlValue::Null))
}
