//! Structured-data codec
//!
//! JSON encoding and decoding of host values with a fixed wire shape:
//! snake_case field names and ISO-8601 temporal values. A codec is built once
//! from a [`CodecConfig`] and is immutable afterwards, so a single instance can
//! be shared behind an `Arc` by every converter.

pub mod naming;
pub mod temporal;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use dps_core::errors::{ConversionError, ConversionResult, MappingFailure};
use dps_core::types::{HostType, HostValue, Record, RecordType};
use dps_shared::config::CodecConfig;

type MappingResult<T> = Result<T, MappingFailure>;

/// JSON codec for host values
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    config: CodecConfig,
}

impl JsonCodec {
    /// Create a codec with the given policy
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Parse JSON text into a value of `target`
    ///
    /// Missing record properties decode as `Null`. Fails with a data mapping
    /// error on malformed JSON, on a document that does not fit `target`, or
    /// on an unparsable temporal value.
    pub fn decode(&self, json: &str, target: &HostType) -> ConversionResult<HostValue> {
        let document: Value = serde_json::from_str(json).map_err(MappingFailure::Syntax)?;
        Ok(self.from_json(&document, target, "$")?)
    }

    /// Serialize a host value to JSON text
    pub fn encode(&self, value: &HostValue) -> ConversionResult<String> {
        let document = self.to_json(value, None, "$")?;
        Ok(serde_json::to_string(&document).map_err(MappingFailure::Syntax)?)
    }

    /// Serialize a host value declared as `declared`, rejecting values the
    /// declared type does not admit and honouring explicit wire names
    pub fn encode_as(&self, value: &HostValue, declared: &HostType) -> ConversionResult<String> {
        let document = self.to_json(value, Some(declared), "$")?;
        Ok(serde_json::to_string(&document).map_err(MappingFailure::Syntax)?)
    }

    /// Deserialize a Rust type through serde
    ///
    /// Rust field names are already snake_case, so the naming policy holds
    /// without translation.
    pub fn read_value<T: DeserializeOwned>(&self, json: &str) -> ConversionResult<T> {
        serde_json::from_str(json).map_err(|err| -> ConversionError {
            if err.is_data() {
                MappingFailure::Structure {
                    path: "$".to_string(),
                    message: err.to_string(),
                }
                .into()
            } else {
                MappingFailure::Syntax(err).into()
            }
        })
    }

    /// Serialize a Rust type through serde
    pub fn write_value<T: Serialize>(&self, value: &T) -> ConversionResult<String> {
        serde_json::to_string(value).map_err(|err| -> ConversionError {
            MappingFailure::Unrepresentable {
                path: "$".to_string(),
                message: err.to_string(),
            }
            .into()
        })
    }

    fn from_json(&self, value: &Value, target: &HostType, path: &str) -> MappingResult<HostValue> {
        if value.is_null() {
            return Ok(HostValue::Null);
        }

        match (target, value) {
            (HostType::Bool, Value::Bool(b)) => Ok(HostValue::Bool(*b)),
            (HostType::Int, Value::Number(n)) => n
                .as_i64()
                .map(HostValue::Int)
                .ok_or_else(|| structure(path, format!("{} is not a 64-bit integer", n))),
            (HostType::Float, Value::Number(n)) => n
                .as_f64()
                .map(HostValue::Float)
                .ok_or_else(|| structure(path, format!("{} is not a number", n))),
            (HostType::String, Value::String(s)) => Ok(HostValue::String(s.clone())),
            (HostType::String, Value::Number(n)) => Ok(HostValue::String(n.to_string())),
            (HostType::String, Value::Bool(b)) => Ok(HostValue::String(b.to_string())),
            (HostType::LocalDate, Value::String(s)) => temporal::parse_local_date(s)
                .map(HostValue::LocalDate)
                .map_err(|source| temporal_failure(path, s, "ISO-8601 local date", source)),
            (HostType::LocalTime, Value::String(s)) => temporal::parse_local_time(s)
                .map(HostValue::LocalTime)
                .map_err(|source| temporal_failure(path, s, "ISO-8601 local time", source)),
            (HostType::LocalDateTime, Value::String(s)) => temporal::parse_local_date_time(s)
                .map(HostValue::LocalDateTime)
                .map_err(|source| temporal_failure(path, s, "ISO-8601 date-time", source)),
            (HostType::LocalDateTime, Value::Number(n)) => epoch_millis(n, path)
                .map(|instant| HostValue::LocalDateTime(instant.naive_utc())),
            (HostType::Instant, Value::String(s)) => temporal::parse_instant(s)
                .map(HostValue::Instant)
                .map_err(|source| temporal_failure(path, s, "ISO-8601 offset date-time", source)),
            (HostType::Instant, Value::Number(n)) => epoch_millis(n, path).map(HostValue::Instant),
            (HostType::Enum(enum_type), Value::String(s)) => enum_type
                .by_name(s)
                .map(HostValue::Enum)
                .ok_or_else(|| {
                    structure(
                        path,
                        format!(
                            "{:?} is not one of the values accepted for {}: {:?}",
                            s,
                            enum_type.name(),
                            enum_type.constant_names()
                        ),
                    )
                }),
            (HostType::Record(record_type), Value::Object(object)) => {
                self.record_from_json(object, record_type, path).map(HostValue::Record)
            }
            (HostType::List(element), Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.from_json(item, element, &format!("{}[{}]", path, i)))
                .collect::<MappingResult<Vec<_>>>()
                .map(HostValue::List),
            (HostType::Document, other) => Ok(HostValue::Document(other.clone())),
            (target, other) => Err(structure(
                path,
                format!("expected {} but found {}", target, json_kind(other)),
            )),
        }
    }

    fn record_from_json(
        &self,
        object: &Map<String, Value>,
        record_type: &RecordType,
        path: &str,
    ) -> MappingResult<Record> {
        let mut record = Record::of(record_type);

        for (key, value) in object {
            let field = record_type.fields().iter().find(|field| {
                naming::wire_name(field, self.config.naming, self.config.use_annotations) == key.as_str()
            });
            let field_path = format!("{}.{}", path, key);

            match field {
                Some(field) => {
                    let decoded = self.from_json(value, &field.ty, &field_path)?;
                    record.set(field.name.clone(), decoded);
                }
                None if self.config.fail_on_unknown_properties => {
                    return Err(structure(
                        &field_path,
                        format!("unrecognized field {:?} for {}", key, record_type.name()),
                    ));
                }
                None => {}
            }
        }

        Ok(record)
    }

    fn to_json(&self, value: &HostValue, declared: Option<&HostType>, path: &str) -> MappingResult<Value> {
        if let Some(declared) = declared {
            if !admits(declared, value) {
                return Err(MappingFailure::Unrepresentable {
                    path: path.to_string(),
                    message: format!("{} value is not admitted by {}", value.kind(), declared),
                });
            }
        }

        Ok(match value {
            HostValue::Null => Value::Null,
            HostValue::Bool(b) => Value::Bool(*b),
            HostValue::Int(n) => Value::Number((*n).into()),
            HostValue::Float(n) => Value::Number(Number::from_f64(*n).ok_or_else(|| {
                MappingFailure::Unrepresentable {
                    path: path.to_string(),
                    message: format!("{} has no JSON representation", n),
                }
            })?),
            HostValue::String(s) => Value::String(s.clone()),
            HostValue::LocalDate(date) => Value::String(temporal::format_local_date(date)),
            HostValue::LocalTime(time) => Value::String(temporal::format_local_time(time)),
            HostValue::LocalDateTime(date_time) if self.config.write_dates_as_timestamps => {
                Value::Number(temporal::local_date_time_to_epoch_millis(date_time).into())
            }
            HostValue::LocalDateTime(date_time) => {
                Value::String(temporal::format_local_date_time(date_time))
            }
            HostValue::Instant(instant) if self.config.write_dates_as_timestamps => {
                Value::Number(instant.timestamp_millis().into())
            }
            HostValue::Instant(instant) => Value::String(temporal::format_instant(
                instant,
                self.config.colon_in_time_zone,
            )),
            HostValue::Enum(constant) => Value::String(constant.name().to_string()),
            HostValue::Record(record) => {
                let record_type = match declared {
                    Some(HostType::Record(record_type)) => Some(record_type.as_ref()),
                    _ => None,
                };
                Value::Object(self.record_to_json(record, record_type, path)?)
            }
            HostValue::List(items) => {
                let element = match declared {
                    Some(HostType::List(element)) => Some(element.as_ref()),
                    _ => None,
                };
                Value::Array(
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| self.to_json(item, element, &format!("{}[{}]", path, i)))
                        .collect::<MappingResult<Vec<_>>>()?,
                )
            }
            HostValue::Document(document) => document.clone(),
        })
    }

    fn record_to_json(
        &self,
        record: &Record,
        record_type: Option<&RecordType>,
        path: &str,
    ) -> MappingResult<Map<String, Value>> {
        let mut object = Map::new();

        for (name, value) in record.fields() {
            let (key, field_type) = match record_type {
                Some(record_type) => {
                    let field = record_type.get(name).ok_or_else(|| MappingFailure::Unrepresentable {
                        path: path.to_string(),
                        message: format!("{} declares no field {:?}", record_type.name(), name),
                    })?;
                    let key = naming::wire_name(field, self.config.naming, self.config.use_annotations);
                    (key.into_owned(), Some(&field.ty))
                }
                None => (naming::translate(name, self.config.naming).into_owned(), None),
            };

            let field_path = format!("{}.{}", path, key);
            if object.contains_key(&key) {
                return Err(MappingFailure::Unrepresentable {
                    path: field_path,
                    message: format!(
                        "field {:?} of {} collides on wire name {:?}",
                        name,
                        record.type_name(),
                        key
                    ),
                });
            }
            let encoded = self.to_json(value, field_type, &field_path)?;
            object.insert(key, encoded);
        }

        Ok(object)
    }
}

/// Whether a value may be written as `declared`
fn admits(declared: &HostType, value: &HostValue) -> bool {
    match (declared, value) {
        (_, HostValue::Null) => true,
        (HostType::Bool, HostValue::Bool(_))
        | (HostType::Int, HostValue::Int(_))
        | (HostType::Float, HostValue::Float(_))
        | (HostType::String, HostValue::String(_))
        | (HostType::LocalDate, HostValue::LocalDate(_))
        | (HostType::LocalTime, HostValue::LocalTime(_))
        | (HostType::LocalDateTime, HostValue::LocalDateTime(_))
        | (HostType::Instant, HostValue::Instant(_))
        | (HostType::List(_), HostValue::List(_))
        | (HostType::Document, _) => true,
        (HostType::Enum(enum_type), HostValue::Enum(constant)) => enum_type.contains(constant),
        (HostType::Record(record_type), HostValue::Record(record)) => {
            record.type_name() == record_type.name()
        }
        _ => false,
    }
}

fn epoch_millis(n: &Number, path: &str) -> MappingResult<chrono::DateTime<chrono::Utc>> {
    n.as_i64()
        .and_then(temporal::epoch_millis_to_instant)
        .ok_or_else(|| structure(path, format!("{} is not a valid epoch millisecond timestamp", n)))
}

fn structure(path: &str, message: String) -> MappingFailure {
    MappingFailure::Structure {
        path: path.to_string(),
        message,
    }
}

fn temporal_failure(
    path: &str,
    value: &str,
    expected: &'static str,
    source: chrono::ParseError,
) -> MappingFailure {
    MappingFailure::Temporal {
        path: path.to_string(),
        value: value.to_string(),
        expected,
        source,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
