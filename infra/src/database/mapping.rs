//! Result materialization and parameter binding
//!
//! One converter is resolved per column. A missing converter surfaces as
//! `ConversionError::Unsupported`; every other conversion failure is returned
//! as raised.

use std::sync::Arc;

use heck::ToSnakeCase;
use sqlx::postgres::PgRow;

use dps_core::converter::ConverterProvider;
use dps_core::errors::{ConversionError, ConversionResult};
use dps_core::types::{HostType, HostValue, Record, RecordType, SqlType, SqlValue};

use super::pg_types;
use crate::InfrastructureError;

/// Result column metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub sql_type: SqlType,
}

impl Column {
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
        }
    }
}

/// Maps rows into records and host values into parameters
#[derive(Clone)]
pub struct RowMapper {
    converters: Arc<dyn ConverterProvider>,
}

impl RowMapper {
    pub fn new(converters: Arc<dyn ConverterProvider>) -> Self {
        Self { converters }
    }

    /// Convert one column value into `target`
    pub fn map_value(&self, column: &Column, value: &SqlValue, target: &HostType) -> ConversionResult<HostValue> {
        self.converters.require(&column.sql_type, target)?.decode(value)
    }

    /// Materialize a row into a record of `target`
    ///
    /// Columns match fields by name, either verbatim or as the snake_case form
    /// of the field name. Columns without a field are skipped; fields without a
    /// column stay `Null`.
    pub fn map_row(
        &self,
        columns: &[Column],
        values: &[SqlValue],
        target: &RecordType,
    ) -> ConversionResult<Record> {
        if columns.len() != values.len() {
            return Err(ConversionError::unexpected(
                format!("{} values", columns.len()),
                values.len(),
            ));
        }

        let mut record = Record::of(target);

        for (column, value) in columns.iter().zip(values) {
            let Some(field) = target
                .fields()
                .iter()
                .find(|f| f.name == column.name || f.name.to_snake_case() == column.name)
            else {
                tracing::trace!(column = %column.name, record = target.name(), "Skipping unmapped column");
                continue;
            };

            tracing::trace!(
                column = %column.name,
                from = %column.sql_type,
                to = %field.ty,
                "Mapping column"
            );
            let mapped = self.map_value(column, value, &field.ty).map_err(|e| {
                tracing::debug!(column = %column.name, error = %e, "Column mapping failed");
                e
            })?;
            record.set(field.name.clone(), mapped);
        }

        Ok(record)
    }

    /// Materialize a fetched PostgreSQL row
    pub fn map_pg_row(&self, row: &PgRow, target: &RecordType) -> Result<Record, InfrastructureError> {
        let columns = pg_types::columns_of(row);
        let values = pg_types::values_of(row)?;
        Ok(self.map_row(&columns, &values, target)?)
    }

    /// Convert a host value into a parameter of `sql_type`
    pub fn bind(&self, value: &HostValue, host_type: &HostType, sql_type: &SqlType) -> ConversionResult<SqlValue> {
        self.converters.require(sql_type, host_type)?.encode(value)
    }
}

impl std::fmt::Debug for RowMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowMapper").finish_non_exhaustive()
    }
}
