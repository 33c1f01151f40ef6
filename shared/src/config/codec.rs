//! JSON codec configuration module
//!
//! The codec used for JSON columns is built once from this policy and never
//! reconfigured afterwards.

use serde::{Deserialize, Serialize};

/// How host field names are written on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// `firstName` is written as `first_name`
    #[default]
    SnakeCase,
    /// Field names are written unchanged
    Identity,
}

/// Serialization policy of the JSON codec
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CodecConfig {
    /// Field naming strategy, applied in both directions
    #[serde(default)]
    pub naming: NamingStrategy,

    /// Write zoned timestamps with a colon in the offset (`+00:00` instead of `+0000`)
    #[serde(default = "default_true")]
    pub colon_in_time_zone: bool,

    /// Write date-times as epoch milliseconds instead of ISO-8601 text
    #[serde(default)]
    pub write_dates_as_timestamps: bool,

    /// Honour explicit wire names declared on record fields
    #[serde(default)]
    pub use_annotations: bool,

    /// Reject JSON properties that match no record field
    #[serde(default = "default_true")]
    pub fail_on_unknown_properties: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            naming: NamingStrategy::SnakeCase,
            colon_in_time_zone: true,
            write_dates_as_timestamps: false,
            use_annotations: false,
            fail_on_unknown_properties: true,
        }
    }
}

impl CodecConfig {
    /// Set the naming strategy
    pub fn with_naming(mut self, naming: NamingStrategy) -> Self {
        self.naming = naming;
        self
    }

    /// Enable or disable explicit wire names
    pub fn with_annotations(mut self, enable: bool) -> Self {
        self.use_annotations = enable;
        self
    }
}

fn default_true() -> bool {
    true
}
