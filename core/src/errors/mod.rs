//! Conversion error types.
//!
//! Every failure raised while moving a value between a SQL column and a host
//! value is a [`ConversionError`]. Errors propagate to the caller untouched;
//! nothing in the conversion layer retries or swallows them.

use thiserror::Error;

/// Errors raised by converters and converter providers
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The value matches no constant of the target enum
    #[error("Invalid value for enum {enum_type}: {value}")]
    InvalidValue { enum_type: String, value: String },

    /// A JSON payload could not be parsed or a value could not be serialized
    #[error("JSON mapping error: {cause}")]
    DataMapping {
        #[source]
        cause: MappingFailure,
    },

    /// No converter exists for the requested type pair
    #[error("No converter available from {from} to {to}")]
    Unsupported { from: String, to: String },

    /// A converter received a value of a kind it was not built for
    #[error("Unexpected value: expected {expected}, found {found}")]
    UnexpectedValue { expected: String, found: String },

    /// A textual value could not be interpreted as the target type
    #[error("Cannot convert {value:?} to {target}")]
    Unconvertible { value: String, target: String },
}

impl ConversionError {
    /// Build an unexpected-value error from any two displayable type names
    pub fn unexpected(expected: impl std::fmt::Display, found: impl std::fmt::Display) -> Self {
        ConversionError::UnexpectedValue {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Check if this is a JSON mapping failure
    pub fn is_data_mapping(&self) -> bool {
        matches!(self, ConversionError::DataMapping { .. })
    }
}

impl From<MappingFailure> for ConversionError {
    fn from(cause: MappingFailure) -> Self {
        ConversionError::DataMapping { cause }
    }
}

impl From<serde_json::Error> for ConversionError {
    fn from(err: serde_json::Error) -> Self {
        MappingFailure::Syntax(err).into()
    }
}

/// Underlying cause of a [`ConversionError::DataMapping`]
///
/// Paths use `$` for the document root, `.field` for record properties and
/// `[n]` for list elements, with wire (not host) field names.
#[derive(Error, Debug)]
pub enum MappingFailure {
    #[error("malformed JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("at {path}: {message}")]
    Structure { path: String, message: String },

    #[error("at {path}: cannot parse {value:?} as {expected}")]
    Temporal {
        path: String,
        value: String,
        expected: &'static str,
        #[source]
        source: chrono::ParseError,
    },

    #[error("at {path}: {message}")]
    Unrepresentable { path: String, message: String },
}

pub type ConversionResult<T> = Result<T, ConversionError>;
