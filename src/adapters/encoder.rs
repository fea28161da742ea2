//! Output shaping shared by the JSON and XML traversals.

use regex::Regex;
use serde_json::{Number, Value};
use std::borrow::Cow;

use super::primitive::primitive_value;
use crate::domain::sample::DEFAULT_XML_NAME;
use crate::domain::{Schema, TypeSpec, XmlElement, XmlMeta, XmlNode};

/// Shape a literal for JSON output.
///
/// Numbers under a string type become strings, and strings under any other
/// type are parsed as JSON when they hold valid JSON.
pub fn plain_json(literal: Value, schema_type: Option<&TypeSpec>) -> Value {
    let wants_string = schema_type.is_some_and(|t| t.includes("string"));
    match literal {
        Value::Number(n) if wants_string => Value::String(number_text(&n)),
        Value::String(text) if !wants_string => {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        }
        other => other,
    }
}

/// Decimal text of a number: integral values carry no fraction and
/// exponents are signed, e.g. `1.0` → `1`, `1e21` → `1e+21`
pub fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => (f as i128).to_string(),
        _ => {
            let text = n.to_string();
            match text.split_once('e') {
                Some((mantissa, exponent)) if !exponent.starts_with(['-', '+']) => {
                    format!("{mantissa}e+{exponent}")
                }
                _ => text,
            }
        }
    }
}

/// `[prefix:]name`, with the name defaulting to `notagname`
pub fn display_name(xml: &XmlMeta) -> String {
    let name = xml.name.as_deref().unwrap_or(DEFAULT_XML_NAME);
    match xml.prefix.as_deref() {
        Some(prefix) => format!("{prefix}:{name}"),
        None => name.to_string(),
    }
}

/// Empty element named after `xml`, carrying its namespace declaration
pub fn element_for(xml: &XmlMeta) -> XmlElement {
    let mut element = XmlElement::new(display_name(xml));
    if let Some(namespace) = &xml.namespace {
        let attribute = match &xml.prefix {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        element.set_attribute(attribute, namespace.clone());
    }
    element
}

/// Item schema with the array's `xml` applied where the items have none.
///
/// Items without `xml` take the parent's whole `xml` object; items with an
/// unnamed `xml` take only the parent's name.
pub fn inherit_item_xml<'a>(items: &'a Schema, parent: Option<&XmlMeta>) -> Cow<'a, Schema> {
    match (&items.xml, parent) {
        (Some(own), _) if own.name.is_some() => Cow::Borrowed(items),
        (Some(_), Some(parent)) if parent.name.is_some() => {
            let mut inherited = items.clone();
            if let Some(xml) = inherited.xml.as_mut() {
                xml.name.clone_from(&parent.name);
            }
            Cow::Owned(inherited)
        }
        (None, Some(parent)) => Cow::Owned(Schema {
            xml: Some(parent.clone()),
            ..items.clone()
        }),
        _ => Cow::Borrowed(items),
    }
}

/// Property schema with `xml.name` defaulted to the property name
pub fn named_property<'a>(prop: &'a Schema, name: &str) -> Cow<'a, Schema> {
    if prop.xml.as_ref().is_some_and(|xml| xml.name.is_some()) {
        return Cow::Borrowed(prop);
    }
    let mut named = prop.clone();
    named.xml.get_or_insert_with(XmlMeta::default).name = Some(name.to_string());
    Cow::Owned(named)
}

/// Name an attribute-flagged property is written under
pub fn attribute_name<'a>(prop: &'a Schema, property: &'a str) -> &'a str {
    prop.xml
        .as_ref()
        .and_then(|xml| xml.name.as_deref())
        .unwrap_or(property)
}

/// Attribute text: `example`, else `default`, else `enum[0]`, else the
/// canonical primitive
pub fn attribute_value(prop: &Schema) -> String {
    let value = prop
        .example
        .clone()
        .or_else(|| prop.default.clone())
        .or_else(|| prop.enum_values.as_ref().and_then(|values| values.first().cloned()))
        .unwrap_or_else(|| primitive_value(prop, prop.schema_type.as_ref()));
    value_text(&value)
}

/// Text content for a scalar; containers are written as compact JSON
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(n) => number_text(n),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Nodes for a literal that no schema describes: object keys become child
/// elements, array entries are concatenated
pub fn literal_nodes(value: &Value) -> Vec<XmlNode> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, val)| {
                XmlNode::Element(XmlElement {
                    name: key.clone(),
                    attributes: Vec::new(),
                    children: literal_nodes(val),
                })
            })
            .collect(),
        Value::Array(items) => items.iter().flat_map(literal_nodes).collect(),
        Value::Null => Vec::new(),
        Value::String(text) if text.is_empty() => Vec::new(),
        scalar => vec![XmlNode::Text(value_text(scalar))],
    }
}

/// Whether `property` is the discriminator property of `schema` and the
/// schema carries what is needed to resolve its value
pub fn is_discriminator_property(schema: &Schema, property: &str) -> bool {
    schema.resolved_ref.is_some()
        && schema.discriminator.as_ref().is_some_and(|d| {
            d.mapping.is_some() && d.property_name.as_deref() == Some(property)
        })
}

/// First mapping key whose target matches the schema's `$$ref`.
///
/// Mapping targets are tried as regular expressions; a target that is not a
/// valid expression is matched as a plain substring.
pub fn discriminator_value(schema: &Schema) -> Option<String> {
    let resolved_ref = schema.resolved_ref.as_deref()?;
    let mapping = schema.discriminator.as_ref()?.mapping.as_ref()?;

    mapping
        .iter()
        .find(|(_, target)| match Regex::new(target) {
            Ok(re) => re.is_match(resolved_ref),
            Err(_) => resolved_ref.contains(target.as_str()),
        })
        .map(|(key, _)| key.clone())
}
