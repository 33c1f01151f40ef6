//! Host-side types and values

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Target type requested by the query layer
#[derive(Debug, Clone, PartialEq)]
pub enum HostType {
    Bool,
    Int,
    Float,
    String,
    LocalDate,
    LocalTime,
    LocalDateTime,
    /// Point on the UTC time line (legacy zoned date)
    Instant,
    Enum(Arc<EnumType>),
    Record(Arc<RecordType>),
    List(Box<HostType>),
    /// Untyped JSON tree
    Document,
}

impl HostType {
    pub fn enumeration(enum_type: EnumType) -> Self {
        HostType::Enum(Arc::new(enum_type))
    }

    pub fn record(record_type: RecordType) -> Self {
        HostType::Record(Arc::new(record_type))
    }

    pub fn list(element: HostType) -> Self {
        HostType::List(Box::new(element))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, HostType::Enum(_))
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostType::Bool => write!(f, "Bool"),
            HostType::Int => write!(f, "Int"),
            HostType::Float => write!(f, "Float"),
            HostType::String => write!(f, "String"),
            HostType::LocalDate => write!(f, "LocalDate"),
            HostType::LocalTime => write!(f, "LocalTime"),
            HostType::LocalDateTime => write!(f, "LocalDateTime"),
            HostType::Instant => write!(f, "Instant"),
            HostType::Enum(e) => write!(f, "Enum({})", e.name()),
            HostType::Record(r) => write!(f, "Record({})", r.name()),
            HostType::List(element) => write!(f, "List<{}>", element),
            HostType::Document => write!(f, "Document"),
        }
    }
}

/// Enumerated type: an ordered set of named constants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    constants: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            constants: constants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Constant names in declaration (ordinal) order
    pub fn constant_names(&self) -> &[String] {
        &self.constants
    }

    /// Exact, case-sensitive lookup by constant name
    pub fn by_name(&self, name: &str) -> Option<EnumConstant> {
        self.constants
            .iter()
            .position(|c| c == name)
            .and_then(|ordinal| self.by_ordinal(ordinal))
    }

    pub fn by_ordinal(&self, ordinal: usize) -> Option<EnumConstant> {
        self.constants.get(ordinal).map(|name| EnumConstant {
            enum_type: self.name.clone(),
            name: name.clone(),
            ordinal,
        })
    }

    /// Whether the constant belongs to this enum
    pub fn contains(&self, constant: &EnumConstant) -> bool {
        constant.enum_type == self.name
            && self.constants.get(constant.ordinal) == Some(&constant.name)
    }
}

/// One constant of an [`EnumType`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumConstant {
    enum_type: String,
    name: String,
    ordinal: usize,
}

impl EnumConstant {
    pub fn enum_type(&self) -> &str {
        &self.enum_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

/// Field of a [`RecordType`]
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Host field name, conventionally camelCase
    pub name: String,
    pub ty: HostType,
    /// Explicit wire name, honoured only when the codec uses annotations
    pub wire_name: Option<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: HostType) -> Self {
        Self {
            name: name.into(),
            ty,
            wire_name: None,
        }
    }

    pub fn renamed(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = Some(wire_name.into());
        self
    }
}

/// Structured host type with named, typed fields
#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    name: String,
    fields: Vec<FieldDef>,
}

impl RecordType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field
    pub fn field(mut self, name: impl Into<String>, ty: HostType) -> Self {
        self.fields.push(FieldDef::new(name, ty));
        self
    }

    /// Append a prepared field definition
    pub fn field_def(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Instance of a [`RecordType`]; values are kept in field declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    values: Vec<(String, HostValue)>,
}

impl Record {
    /// Empty record without any fields
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            values: Vec::new(),
        }
    }

    /// Record with every declared field set to `Null`
    pub fn of(record_type: &RecordType) -> Self {
        Self {
            type_name: record_type.name().to_string(),
            values: record_type
                .fields()
                .iter()
                .map(|f| (f.name.clone(), HostValue::Null))
                .collect(),
        }
    }

    /// Set a field, replacing an existing value or appending a new one
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<HostValue>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<HostValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&HostValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &HostValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Materialized host value
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    LocalDate(NaiveDate),
    LocalTime(NaiveTime),
    LocalDateTime(NaiveDateTime),
    Instant(DateTime<Utc>),
    Enum(EnumConstant),
    Record(Record),
    List(Vec<HostValue>),
    Document(serde_json::Value),
}

impl HostValue {
    pub fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }

    /// Short name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            HostValue::Null => "Null",
            HostValue::Bool(_) => "Bool",
            HostValue::Int(_) => "Int",
            HostValue::Float(_) => "Float",
            HostValue::String(_) => "String",
            HostValue::LocalDate(_) => "LocalDate",
            HostValue::LocalTime(_) => "LocalTime",
            HostValue::LocalDateTime(_) => "LocalDateTime",
            HostValue::Instant(_) => "Instant",
            HostValue::Enum(_) => "Enum",
            HostValue::Record(_) => "Record",
            HostValue::List(_) => "List",
            HostValue::Document(_) => "Document",
        }
    }
}

impl From<bool> for HostValue {
    fn from(v: bool) -> Self {
        HostValue::Bool(v)
    }
}

impl From<i64> for HostValue {
    fn from(v: i64) -> Self {
        HostValue::Int(v)
    }
}

impl From<f64> for HostValue {
    fn from(v: f64) -> Self {
        HostValue::Float(v)
    }
}

impl From<&str> for HostValue {
    fn from(v: &str) -> Self {
        HostValue::String(v.to_string())
    }
}

impl From<String> for HostValue {
    fn from(v: String) -> Self {
        HostValue::String(v)
    }
}

impl From<NaiveDate> for HostValue {
    fn from(v: NaiveDate) -> Self {
        HostValue::LocalDate(v)
    }
}

impl From<NaiveTime> for HostValue {
    fn from(v: NaiveTime) -> Self {
        HostValue::LocalTime(v)
    }
}

impl From<NaiveDateTime> for HostValue {
    fn from(v: NaiveDateTime) -> Self {
        HostValue::LocalDateTime(v)
    }
}

impl From<DateTime<Utc>> for HostValue {
    fn from(v: DateTime<Utc>) -> Self {
        HostValue::Instant(v)
    }
}

impl From<EnumConstant> for HostValue {
    fn from(v: EnumConstant) -> Self {
        HostValue::Enum(v)
    }
}

impl From<Record> for HostValue {
    fn from(v: Record) -> Self {
        HostValue::Record(v)
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(HostValue::Null)
    }
}
