//! Canonical values for scalar schema types and formats.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use super::constraints::{apply_numeric_bounds, apply_string_bounds, number_value};
use super::pattern::string_from_pattern;
use crate::domain::{Schema, TypeSpec};

/// Scalar generator selected from a schema's `(type, format)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    /// Plain `string`, pattern-driven when the schema has a `pattern`
    String,
    /// String formats with a fixed canonical value
    Fixed(&'static str),
    DateTime,
    Date,
    Time,
    Number,
    Float,
    Integer,
    Int32,
    Int64,
    Boolean,
    Null,
    Unknown(String),
}

impl Primitive {
    pub fn classify(schema_type: Option<&TypeSpec>, format: Option<&str>) -> Self {
        let Some(type_name) = schema_type.and_then(TypeSpec::primary) else {
            let raw = schema_type.map_or_else(|| "undefined".to_string(), ToString::to_string);
            return Self::Unknown(raw);
        };

        match (type_name, format.unwrap_or_default()) {
            ("string", "email") => Self::Fixed("user@example.com"),
            ("string", "idn-email") => Self::Fixed("실례@example.com"),
            ("string", "hostname") => Self::Fixed("example.com"),
            ("string", "idn-hostname") => Self::Fixed("실례.com"),
            ("string", "ipv4") => Self::Fixed("198.51.100.42"),
            ("string", "ipv6") => Self::Fixed("2001:0db8:5b96:0000:0000:426f:8e17:642a"),
            ("string", "uri") => Self::Fixed("https://example.com/"),
            ("string", "uri-reference") => Self::Fixed("path/index.html"),
            ("string", "iri") => Self::Fixed("https://실례.com/"),
            ("string", "iri-reference") => Self::Fixed("path/실례.html"),
            ("string", "uuid") => Self::Fixed("3fa85f64-5717-4562-b3fc-2c963f66afa6"),
            ("string", "uri-template") => {
                Self::Fixed("https://example.com/dictionary/{term:1}/{term}")
            }
            ("string", "json-pointer") => Self::Fixed("/a/b/c"),
            ("string", "relative-json-pointer") => Self::Fixed("1/0"),
            ("string", "date-time") => Self::DateTime,
            ("string", "date") => Self::Date,
            ("string", "time") => Self::Time,
            // three days
            ("string", "duration") => Self::Fixed("P3D"),
            ("string", "password") => Self::Fixed("********"),
            ("string", "regex") => Self::Fixed("^[a-z]+$"),
            ("string", _) => Self::String,
            ("number", "float" | "double") => Self::Float,
            ("number", _) => Self::Number,
            ("integer", "int32") => Self::Int32,
            ("integer", "int64") => Self::Int64,
            ("integer", _) => Self::Integer,
            ("boolean", _) => Self::Boolean,
            ("null", _) => Self::Null,
            _ => Self::Unknown(schema_type.map(ToString::to_string).unwrap_or_default()),
        }
    }

    pub fn value(&self, schema: &Schema) -> Value {
        match self {
            Self::String => Value::String(match schema.pattern.as_deref() {
                Some(pattern) => string_from_pattern(pattern),
                None => "string".to_string(),
            }),
            Self::Fixed(text) => Value::String((*text).to_string()),
            Self::DateTime => Value::String(timestamp()),
            Self::Date => Value::String(timestamp().chars().take(10).collect()),
            Self::Time => Value::String(timestamp().chars().skip(11).collect()),
            Self::Number | Self::Integer => Value::from(0),
            Self::Float => Value::from(0.1),
            Self::Int32 => Value::from(1_u64 << 30),
            Self::Int64 => Value::from((1_u64 << 53) - 1),
            Self::Boolean => Value::Bool(schema.default.as_ref().and_then(Value::as_bool).unwrap_or(true)),
            Self::Null => Value::Null,
            Self::Unknown(raw) => Value::String(format!("Unknown Type: {raw}")),
        }
    }
}

// ISO-8601 in UTC with millisecond precision, e.g. 2024-05-01T12:30:00.000Z
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Canonical value for a schema type and format, without constraints
pub fn primitive_value(schema: &Schema, schema_type: Option<&TypeSpec>) -> Value {
    Primitive::classify(schema_type, schema.format.as_deref()).value(schema)
}

/// Canonical value with numeric and string bounds applied
pub fn constrained_value(schema: &Schema, schema_type: Option<&TypeSpec>) -> Value {
    match primitive_value(schema, schema_type) {
        Value::Number(n) if schema.has_numeric_constraints() => match n.as_f64() {
            Some(raw) => number_value(apply_numeric_bounds(raw, schema)),
            None => Value::Number(n),
        },
        Value::String(s) if schema.min_length.is_some() || schema.max_length.is_some() => {
            Value::String(apply_string_bounds(&s, schema))
        }
        other => other,
    }
}
