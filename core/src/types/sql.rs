//! SQL-side types and values

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Column type as reported by the database
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlType {
    Boolean,
    BigInt,
    Double,
    Varchar,
    Date,
    Time,
    Timestamp,
    Json,
    /// Any other column type, by database type name
    Other(String),
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Boolean => write!(f, "boolean"),
            SqlType::BigInt => write!(f, "bigint"),
            SqlType::Double => write!(f, "double precision"),
            SqlType::Varchar => write!(f, "varchar"),
            SqlType::Date => write!(f, "date"),
            SqlType::Time => write!(f, "time"),
            SqlType::Timestamp => write!(f, "timestamp"),
            SqlType::Json => write!(f, "json"),
            SqlType::Other(name) => write!(f, "{}", name),
        }
    }
}

/// SQL `DATE` value, held as calendar parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SqlDate(NaiveDate);

impl SqlDate {
    /// Build from year, month and day; `None` if the date does not exist
    pub fn from_parts(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Build from a local date
    pub fn value_of(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn to_local_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for SqlDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for SqlDate {
    type Err = chrono::ParseError;

    /// Parses the `yyyy-mm-dd` escape format
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map(Self)
    }
}

/// SQL `TIME` value, held as clock parts with nanosecond fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SqlTime(NaiveTime);

impl SqlTime {
    /// Build from clock parts; `None` if out of range
    pub fn from_parts(hour: u32, minute: u32, second: u32, nanos: u32) -> Option<Self> {
        NaiveTime::from_hms_nano_opt(hour, minute, second, nanos).map(Self)
    }

    /// Build from a local time
    pub fn value_of(time: NaiveTime) -> Self {
        Self(time)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn nanos(&self) -> u32 {
        self.0.nanosecond()
    }

    pub fn to_local_time(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for SqlTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl FromStr for SqlTime {
    type Err = chrono::ParseError;

    /// Parses the `hh:mm:ss[.f]` escape format
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), TIME_FORMAT).map(Self)
    }
}

/// SQL `TIMESTAMP` (without time zone) value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SqlTimestamp(NaiveDateTime);

impl SqlTimestamp {
    /// Build from date and time parts
    pub fn from_parts(date: SqlDate, time: SqlTime) -> Self {
        Self(date.to_local_date().and_time(time.to_local_time()))
    }

    /// Build from a local date-time
    pub fn value_of(date_time: NaiveDateTime) -> Self {
        Self(date_time)
    }

    pub fn date(&self) -> SqlDate {
        SqlDate(self.0.date())
    }

    pub fn time(&self) -> SqlTime {
        SqlTime(self.0.time())
    }

    pub fn to_local_date_time(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for SqlTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for SqlTimestamp {
    type Err = chrono::ParseError;

    /// Parses `yyyy-mm-dd hh:mm:ss[.f]`, also accepting a `T` separator
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
            .map(Self)
    }
}

/// Raw JSON column payload
///
/// The payload is kept as text; it is only parsed when converted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Json(String);

impl Json {
    pub fn value_of(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn data(&self) -> &str {
        &self.0
    }

    pub fn into_data(self) -> String {
        self.0
    }
}

impl fmt::Display for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Column or parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Boolean(bool),
    BigInt(i64),
    Double(f64),
    Varchar(String),
    Date(SqlDate),
    Time(SqlTime),
    Timestamp(SqlTimestamp),
    Json(Json),
}

impl SqlValue {
    /// SQL type of this value; `None` for `NULL`
    pub fn sql_type(&self) -> Option<SqlType> {
        match self {
            SqlValue::Null => None,
            SqlValue::Boolean(_) => Some(SqlType::Boolean),
            SqlValue::BigInt(_) => Some(SqlType::BigInt),
            SqlValue::Double(_) => Some(SqlType::Double),
            SqlValue::Varchar(_) => Some(SqlType::Varchar),
            SqlValue::Date(_) => Some(SqlType::Date),
            SqlValue::Time(_) => Some(SqlType::Time),
            SqlValue::Timestamp(_) => Some(SqlType::Timestamp),
            SqlValue::Json(_) => Some(SqlType::Json),
        }
    }

    /// Short name of the value kind, used in error messages
    pub fn kind(&self) -> String {
        self.sql_type()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "null".to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}
