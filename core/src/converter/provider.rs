//! Converter provider trait

use std::sync::Arc;

use super::Converter;
use crate::errors::{ConversionError, ConversionResult};
use crate::types::{HostType, SqlType};

/// Strategy selecting a [`Converter`] for a type pair
///
/// Implementations must be pure: the same pair always yields an equivalent
/// converter, and resolving has no side effects.
pub trait ConverterProvider: Send + Sync {
    /// Select a converter from `from` to `to`; `None` if no converter exists
    fn resolve(&self, from: &SqlType, to: &HostType) -> Option<Converter>;

    /// Like [`resolve`](Self::resolve), reporting absence as
    /// [`ConversionError::Unsupported`]
    fn require(&self, from: &SqlType, to: &HostType) -> ConversionResult<Converter> {
        self.resolve(from, to).ok_or_else(|| ConversionError::Unsupported {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

impl<P: ConverterProvider + ?Sized> ConverterProvider for Arc<P> {
    fn resolve(&self, from: &SqlType, to: &HostType) -> Option<Converter> {
        (**self).resolve(from, to)
    }
}

impl<P: ConverterProvider + ?Sized> ConverterProvider for &P {
    fn resolve(&self, from: &SqlType, to: &HostType) -> Option<Converter> {
        (**self).resolve(from, to)
    }
}
