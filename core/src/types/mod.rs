//! SQL and host type universes.
//!
//! Both sides are closed sets of tagged variants. A `SqlType`/`HostType`
//! pair identifies a conversion; `SqlValue`/`HostValue` carry the data.

mod host;
mod sql;

pub use host::{EnumConstant, EnumType, FieldDef, HostType, HostValue, Record, RecordType};
pub use sql::{Json, SqlDate, SqlTime, SqlTimestamp, SqlType, SqlValue};
