//! Field naming policy

use std::borrow::Cow;

use dps_core::types::FieldDef;
use dps_shared::config::NamingStrategy;
use heck::ToSnakeCase;

/// Translate a host field name into its wire name
pub fn translate(name: &str, strategy: NamingStrategy) -> Cow<'_, str> {
    match strategy {
        NamingStrategy::SnakeCase => Cow::Owned(name.to_snake_case()),
        NamingStrategy::Identity => Cow::Borrowed(name),
    }
}

/// Wire name of a declared field; the explicit wire name wins only when
/// annotations are enabled
pub fn wire_name(field: &FieldDef, strategy: NamingStrategy, use_annotations: bool) -> Cow<'_, str> {
    match &field.wire_name {
        Some(explicit) if use_annotations => Cow::Borrowed(explicit.as_str()),
        _ => translate(&field.name, strategy),
    }
}
