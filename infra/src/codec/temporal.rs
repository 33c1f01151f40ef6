//! Temporal formats of the JSON codec
//!
//! | host type       | written as                         | read from                                  |
//! |-----------------|------------------------------------|--------------------------------------------|
//! | `LocalDate`     | `2024-03-01`                       | ISO local date                             |
//! | `LocalTime`     | `10:15:00[.f]`                     | ISO local time, seconds optional           |
//! | `LocalDateTime` | `2024-03-01T10:15:00[.f]Z`         | ISO date-time, offset optional and dropped |
//! | `Instant`       | `2024-03-01T10:15:00.000[fff]+00:00` | RFC 3339 or `+hhmm` offsets              |

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, ParseResult, TimeZone, Utc,
};

const LOCAL_DATE: &str = "%Y-%m-%d";
const LOCAL_TIME: &str = "%H:%M:%S%.f";
const LOCAL_TIME_SHORT: &str = "%H:%M";
const LOCAL_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.f";
const LOCAL_DATE_TIME_SHORT: &str = "%Y-%m-%dT%H:%M";
const UTC_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const OFFSET_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

pub fn format_local_date(date: &NaiveDate) -> String {
    date.format(LOCAL_DATE).to_string()
}

pub fn parse_local_date(text: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(text, LOCAL_DATE)
}

pub fn format_local_time(time: &NaiveTime) -> String {
    time.format(LOCAL_TIME).to_string()
}

pub fn parse_local_time(text: &str) -> ParseResult<NaiveTime> {
    NaiveTime::parse_from_str(text, LOCAL_TIME)
        .or_else(|err| NaiveTime::parse_from_str(text, LOCAL_TIME_SHORT).map_err(|_| err))
}

/// Local date-time written with an explicit UTC offset
pub fn format_local_date_time(date_time: &NaiveDateTime) -> String {
    format!("{}Z", date_time.format(LOCAL_DATE_TIME))
}

/// Accepts the offset form (keeping the wall clock) or the bare local form
///
/// Years beyond four digits carry a sign, which RFC 3339 does not allow, so
/// the offset form is also read with chrono's own year format.
pub fn parse_local_date_time(text: &str) -> ParseResult<NaiveDateTime> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(text) {
        return Ok(zoned.naive_local());
    }
    if let Ok(zoned) = DateTime::parse_from_str(text, OFFSET_DATE_TIME) {
        return Ok(zoned.naive_local());
    }
    if let Ok(utc) = NaiveDateTime::parse_from_str(text, UTC_DATE_TIME) {
        return Ok(utc);
    }
    NaiveDateTime::parse_from_str(text, LOCAL_DATE_TIME)
        .or_else(|err| NaiveDateTime::parse_from_str(text, LOCAL_DATE_TIME_SHORT).map_err(|_| err))
}

/// Millisecond precision unless the instant carries finer fractions
pub fn format_instant(instant: &DateTime<Utc>, colon_in_time_zone: bool) -> String {
    let fraction = if instant.timestamp_subsec_nanos() % 1_000_000 == 0 {
        "%.3f"
    } else {
        "%.f"
    };
    let offset = if colon_in_time_zone { "%:z" } else { "%z" };
    instant
        .format(&format!("%Y-%m-%dT%H:%M:%S{}{}", fraction, offset))
        .to_string()
}

pub fn parse_instant(text: &str) -> ParseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|err| {
            DateTime::<FixedOffset>::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z").map_err(|_| err)
        })
        .map(|zoned| zoned.with_timezone(&Utc))
}

pub fn local_date_time_to_epoch_millis(date_time: &NaiveDateTime) -> i64 {
    Utc.from_utc_datetime(date_time).timestamp_millis()
}

pub fn epoch_millis_to_instant(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Serde adapters applying the codec's temporal formats to Rust types,
/// for use with `#[serde(with = "...")]`
pub mod serde_formats {
    /// `NaiveDateTime` as `2024-03-01T10:15:00Z`
    pub mod local_date_time {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&super::super::format_local_date_time(value))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
            let text = String::deserialize(deserializer)?;
            super::super::parse_local_date_time(&text).map_err(serde::de::Error::custom)
        }
    }

    /// `DateTime<Utc>` as `2024-03-01T10:15:00.000+00:00`
    pub mod instant {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&super::super::format_instant(value, true))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
            let text = String::deserialize(deserializer)?;
            super::super::parse_instant(&text).map_err(serde::de::Error::custom)
        }
    }
}
