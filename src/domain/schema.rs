//! Typed view over a JSON Schema / OpenAPI schema node.
//!
//! Schemas come from third-party API documents, so parsing is lenient: a
//! keyword holding a value of the wrong JSON type is treated as absent instead
//! of failing the whole document.

use serde_json::{Map, Value};
use std::fmt;

use super::SampleConfig;

/// Key the upstream reference resolver uses to annotate a resolved `$ref`
pub const RESOLVED_REF_KEY: &str = "$$ref";

/// `type` keyword: a single type name or a list of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec(Vec<String>);

impl TypeSpec {
    pub fn single(name: &str) -> Self {
        Self(vec![name.to_string()])
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self(vec![name.clone()])),
            Value::Array(names) => Some(Self(
                names
                    .iter()
                    .filter_map(|n| n.as_str().map(String::from))
                    .collect(),
            )),
            _ => None,
        }
    }

    /// First listed type, used to pick a primitive generator
    pub fn primary(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn includes(&self, name: &str) -> bool {
        self.0.iter().any(|t| t == name)
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

/// `xml` keyword (OpenAPI XML object)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlMeta {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub attribute: bool,
    pub wrapped: bool,
}

impl XmlMeta {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            name: string_field(obj, "name"),
            namespace: string_field(obj, "namespace"),
            prefix: string_field(obj, "prefix"),
            attribute: flag(obj, "attribute"),
            wrapped: flag(obj, "wrapped"),
        })
    }
}

/// `discriminator` keyword
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discriminator {
    pub property_name: Option<String>,
    /// Mapping value → schema reference, in document order
    pub mapping: Option<Vec<(String, String)>>,
}

impl Discriminator {
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let mapping = obj.get("mapping").and_then(Value::as_object).map(|m| {
            m.iter()
                .filter_map(|(key, target)| target.as_str().map(|t| (key.clone(), t.to_string())))
                .collect()
        });
        Some(Self {
            property_name: string_field(obj, "propertyName"),
            mapping,
        })
    }
}

/// `additionalProperties` keyword
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Schema>),
}

impl AdditionalProperties {
    /// `false` is the only value that does not hint at an object
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Allowed(false))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub schema_type: Option<TypeSpec>,
    pub format: Option<String>,
    pub pattern: Option<String>,
    /// Declared properties in document order. `Some(vec![])` keeps an empty
    /// `properties: {}` distinguishable from a missing keyword.
    pub properties: Option<Vec<(String, Schema)>>,
    pub items: Option<Box<Schema>>,
    pub additional_properties: Option<AdditionalProperties>,
    pub required: Option<Vec<String>>,
    pub enum_values: Option<Vec<Value>>,
    pub const_value: Option<Value>,
    pub default: Option<Value>,
    pub example: Option<Value>,

    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: Option<f64>,
    pub exclusive_maximum: Option<f64>,
    pub multiple_of: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub min_properties: Option<usize>,
    pub max_properties: Option<usize>,

    pub xml: Option<XmlMeta>,
    pub discriminator: Option<Discriminator>,
    /// Identity of the resolved reference (`$$ref`)
    pub resolved_ref: Option<String>,
    pub read_only: bool,
    pub write_only: bool,
    pub deprecated: bool,
    pub one_of: Option<Vec<Schema>>,
    pub any_of: Option<Vec<Schema>>,
}

impl Schema {
    /// Parse a schema node. Anything but a JSON object yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        Some(Self {
            schema_type: obj.get("type").and_then(TypeSpec::from_value),
            format: string_field(obj, "format"),
            pattern: string_field(obj, "pattern"),
            properties: obj.get("properties").and_then(Value::as_object).map(|props| {
                props
                    .iter()
                    .filter_map(|(name, prop)| Self::from_value(prop).map(|s| (name.clone(), s)))
                    .collect()
            }),
            items: obj.get("items").and_then(parse_items).map(Box::new),
            additional_properties: obj.get("additionalProperties").and_then(|v| match v {
                Value::Bool(allowed) => Some(AdditionalProperties::Allowed(*allowed)),
                other => Self::from_value(other).map(|s| AdditionalProperties::Schema(Box::new(s))),
            }),
            required: obj.get("required").and_then(Value::as_array).map(|names| {
                names
                    .iter()
                    .filter_map(|n| n.as_str().map(String::from))
                    .collect()
            }),
            enum_values: obj.get("enum").and_then(Value::as_array).cloned(),
            const_value: obj.get("const").cloned(),
            default: obj.get("default").cloned(),
            example: obj.get("example").cloned(),

            minimum: number_field(obj, "minimum"),
            maximum: number_field(obj, "maximum"),
            exclusive_minimum: number_field(obj, "exclusiveMinimum"),
            exclusive_maximum: number_field(obj, "exclusiveMaximum"),
            multiple_of: number_field(obj, "multipleOf"),
            min_length: count_field(obj, "minLength"),
            max_length: count_field(obj, "maxLength"),
            min_items: count_field(obj, "minItems"),
            max_items: count_field(obj, "maxItems"),
            min_properties: count_field(obj, "minProperties"),
            max_properties: count_field(obj, "maxProperties"),

            xml: obj.get("xml").and_then(XmlMeta::from_value),
            discriminator: obj.get("discriminator").and_then(Discriminator::from_value),
            resolved_ref: string_field(obj, RESOLVED_REF_KEY),
            read_only: flag(obj, "readOnly"),
            write_only: flag(obj, "writeOnly"),
            deprecated: flag(obj, "deprecated"),
            one_of: obj.get("oneOf").and_then(Value::as_array).map(|alts| parse_list(alts)),
            any_of: obj.get("anyOf").and_then(Value::as_array).map(|alts| parse_list(alts)),
        })
    }

    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties
            .as_ref()?
            .iter()
            .find(|(prop_name, _)| prop_name == name)
            .map(|(_, schema)| schema)
    }

    /// `example` or `default` present
    pub fn has_literal(&self) -> bool {
        self.example.is_some() || self.default.is_some()
    }

    /// Excluded by the `readOnly`/`writeOnly` switches of the config
    pub fn is_excluded_by(&self, config: &SampleConfig) -> bool {
        (self.read_only && !config.include_read_only)
            || (self.write_only && !config.include_write_only)
    }

    /// Skipped entirely when walking an object's declared properties
    pub fn is_hidden(&self, config: &SampleConfig) -> bool {
        self.deprecated || self.is_excluded_by(config)
    }

    pub fn is_xml_attribute(&self) -> bool {
        self.xml.as_ref().is_some_and(|xml| xml.attribute)
    }

    /// First non-empty composition alternative, `oneOf` winning over `anyOf`
    pub fn first_alternative(&self) -> Option<&Schema> {
        self.one_of
            .as_ref()
            .filter(|alts| !alts.is_empty())
            .or_else(|| self.any_of.as_ref().filter(|alts| !alts.is_empty()))
            .and_then(|alts| alts.first())
    }

    pub fn has_object_constraints(&self) -> bool {
        self.min_properties.is_some() || self.max_properties.is_some()
    }

    pub fn has_array_constraints(&self) -> bool {
        self.min_items.is_some() || self.max_items.is_some()
    }

    pub fn has_numeric_constraints(&self) -> bool {
        self.minimum.is_some()
            || self.maximum.is_some()
            || self.exclusive_minimum.is_some()
            || self.exclusive_maximum.is_some()
            || self.multiple_of.is_some()
    }
}

// Tuple-form `items` lists fall back to their first entry
fn parse_items(value: &Value) -> Option<Schema> {
    match value {
        Value::Array(entries) => entries.iter().find_map(Schema::from_value),
        other => Schema::from_value(other),
    }
}

fn parse_list(values: &[Value]) -> Vec<Schema> {
    values.iter().filter_map(Schema::from_value).collect()
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(String::from)
}

fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64)
}

fn count_field(obj: &Map<String, Value>, key: &str) -> Option<usize> {
    let value = obj.get(key)?;
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|n| *n >= 0.0).map(|n| n as u64))
        .map(|n| n as usize)
}

fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}
