//! Schema-driven configuration validation.
//!
//! Walks customs, inputs, filters, outputs (and processors when the
//! schema describes any) and checks every plugin property against its
//! typed schema option. Common properties and cloud variables are never
//! rejected. Validation stops at the first error.

use once_cell::sync::Lazy;
use regex::Regex;

use flb_config::{Config, Plugin};
use flb_core::{FlbError, FlbResult, Scalar, SectionKind};

use crate::catalogue::{self, Schema, SchemaSection};

/// Properties accepted on every plugin regardless of its schema
const COMMON_PROPERTIES: [&str; 5] = ["name", "alias", "tag", "match", "match_regex"];

static SECRET_VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{\{\s*secrets\.\w+\s*\}\}$").expect("valid pattern"));
static FILE_VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\{\{\s*files\.[0-9A-Za-z]+(-[A-Za-z]{3,4})*\s*\}\}$").expect("valid pattern")
});
static SIZE_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?[0-9]+(\.[0-9]*)?\s?([kKmMgG])?[bB]?$").expect("valid pattern")
});

/// Validate a configuration against the default (baseline) schema
pub fn validate(config: &Config) -> FlbResult<()> {
    validate_with_schema(config, catalogue::default_schema())
}

/// Validate a configuration against a specific schema
pub fn validate_with_schema(config: &Config, schema: &Schema) -> FlbResult<()> {
    validate_plugins(SectionKind::Custom, &config.customs, schema)?;
    validate_plugins(SectionKind::Input, &config.pipeline.inputs, schema)?;
    validate_plugins(SectionKind::Filter, &config.pipeline.filters, schema)?;
    validate_plugins(SectionKind::Output, &config.pipeline.outputs, schema)?;
    if !schema.processors.is_empty() {
        validate_plugins(SectionKind::Processor, &config.pipeline.processors, schema)?;
    }
    Ok(())
}

fn validate_plugins(kind: SectionKind, plugins: &[Plugin], schema: &Schema) -> FlbResult<()> {
    for plugin in plugins {
        if !plugin.has_name() {
            return Err(FlbError::MissingName);
        }
        let section = schema
            .find_section(kind, &plugin.name)
            .ok_or_else(|| FlbError::UnknownPlugin {
                kind,
                name: plugin.name.clone(),
            })?;
        validate_properties(kind, plugin, section)?;
    }
    Ok(())
}

fn validate_properties(
    kind: SectionKind,
    plugin: &Plugin,
    section: &SchemaSection,
) -> FlbResult<()> {
    for property in &plugin.properties {
        if is_common_property(&property.key) || is_cloud_variable(&property.value) {
            continue;
        }
        let option = section
            .find_option(&property.key)
            .ok_or_else(|| FlbError::UnknownProperty {
                kind,
                plugin: plugin.name.clone(),
                key: property.key.clone(),
            })?;
        if !valid_value(&option.kind, &property.value) {
            return Err(FlbError::InvalidPropertyType {
                kind,
                plugin: plugin.name.clone(),
                key: property.key.clone(),
                expected: option.kind.clone(),
                got: property.value.to_classic_lexeme(),
            });
        }
    }
    Ok(())
}

fn is_common_property(key: &str) -> bool {
    COMMON_PROPERTIES
        .iter()
        .any(|common| key.eq_ignore_ascii_case(common))
}

/// Cloud variables are syntactically recognised and skipped; their
/// contents are resolved far away from this library
fn is_cloud_variable(value: &Scalar) -> bool {
    match value.as_str() {
        Some(s) => SECRET_VARIABLE.is_match(s) || FILE_VARIABLE.is_match(s),
        None => false,
    }
}

/// Check a value against a schema type tag. Promoted list values validate
/// element-wise; unknown tags are valid for forward compatibility.
fn valid_value(type_tag: &str, value: &Scalar) -> bool {
    if let Scalar::List(items) = value {
        return items.iter().all(|item| valid_value(type_tag, item));
    }
    match type_tag {
        "deprecated" => true,
        "string" => matches!(value, Scalar::String(_)),
        "boolean" => valid_boolean(value),
        "integer" => valid_integer(value),
        "double" => valid_double(value),
        "time" => valid_time(value),
        "size" => valid_size(value),
        "prefixed string" => matches!(value.as_str(), Some(s) if !s.is_empty()),
        "multiple comma delimited strings" => matches!(value, Scalar::String(_)),
        "space delimited strings (minimum 1)" => valid_space_delimited(value, 1),
        "space delimited strings (minimum 2)" => valid_space_delimited(value, 2),
        "space delimited strings (minimum 3)" => valid_space_delimited(value, 3),
        "space delimited strings (minimum 4)" => valid_space_delimited(value, 4),
        _ => true,
    }
}

fn valid_boolean(value: &Scalar) -> bool {
    match value {
        Scalar::Bool(_) => true,
        Scalar::String(s) => ["true", "false", "on", "off"]
            .iter()
            .any(|accepted| s.eq_ignore_ascii_case(accepted)),
        _ => false,
    }
}

fn valid_integer(value: &Scalar) -> bool {
    match value {
        Scalar::Int(_) => true,
        Scalar::String(s) => s.parse::<i64>().is_ok() || s.parse::<u64>().is_ok(),
        _ => false,
    }
}

// an integer scalar is deliberately not a valid double
fn valid_double(value: &Scalar) -> bool {
    match value {
        Scalar::Float(_) => true,
        Scalar::String(s) => s.parse::<f64>().is_ok(),
        _ => false,
    }
}

fn valid_time(value: &Scalar) -> bool {
    if valid_integer(value) || valid_double(value) {
        return true;
    }
    matches!(value.as_str(), Some(s) if !s.is_empty())
}

fn valid_size(value: &Scalar) -> bool {
    if valid_integer(value) || valid_double(value) {
        return true;
    }
    matches!(value.as_str(), Some(s) if SIZE_LITERAL.is_match(s))
}

fn valid_space_delimited(value: &Scalar, minimum: usize) -> bool {
    match value.as_str() {
        Some(s) => s.split_whitespace().count() >= minimum,
        None => false,
    }
}
