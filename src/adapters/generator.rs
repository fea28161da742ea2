//! Recursive sample synthesis.
//!
//! JSON and XML output share normalization, scalar selection, constraint
//! application and property budgeting; they differ only in how a level's
//! result is assembled.

use serde_json::{Map, Value};
use std::borrow::Cow;
use tracing::{debug, warn};

use super::constraints::{additional_property_count, apply_item_bounds, PropertyBudget, Weighted};
use super::encoder;
use super::normalizer::{lift, normalize};
use super::primitive::constrained_value;
use super::xml_writer::into_document;
use crate::domain::sample::DEFAULT_XML_NAME;
use crate::domain::{
    AdditionalProperties, GeneratedSample, OutputMode, SampleConfig, SamplePort, Schema, TypeSpec,
    XmlElement, XmlMeta, XmlSample,
};

/// Nesting limit applied when none is configured
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Text of the element emitted for `additionalProperties: true` in XML
const ANY_VALUE_TEXT: &str = "Anything can be here";

#[derive(Debug, Clone)]
pub struct SampleGenerator {
    config: SampleConfig,
    max_depth: usize,
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new(SampleConfig::default())
    }
}

impl SampleGenerator {
    pub fn new(config: SampleConfig) -> Self {
        Self {
            config,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sample a raw schema document in the requested mode
    pub fn generate(
        &self,
        schema: Option<&Value>,
        example_override: Option<&Value>,
        mode: OutputMode,
    ) -> Option<GeneratedSample> {
        let parsed = schema.and_then(Schema::from_value);
        match mode {
            OutputMode::Json => self
                .sample_json(parsed.as_ref(), example_override)
                .map(GeneratedSample::Json),
            OutputMode::Xml => self
                .sample_xml(parsed.as_ref(), example_override)
                .map(GeneratedSample::Xml),
        }
    }

    pub fn sample_json(
        &self,
        schema: Option<&Schema>,
        example_override: Option<&Value>,
    ) -> Option<Value> {
        self.json_value(schema, example_override, 0)
    }

    pub fn sample_xml(
        &self,
        schema: Option<&Schema>,
        example_override: Option<&Value>,
    ) -> Option<XmlSample> {
        self.xml_sample(schema, example_override, 0)
    }

    /// Serialized XML document, or the literal text when the sample is a
    /// plain string
    pub fn xml_document(
        &self,
        schema: Option<&Schema>,
        example_override: Option<&Value>,
    ) -> Option<String> {
        self.sample_xml(schema, example_override)
            .and_then(into_document)
    }

    fn too_deep(&self, depth: usize) -> bool {
        if depth > self.max_depth {
            warn!("Schema nesting exceeds {} levels, truncating sample", self.max_depth);
            true
        } else {
            false
        }
    }

    // ---- JSON ----

    fn json_value(
        &self,
        schema: Option<&Schema>,
        example_override: Option<&Value>,
        depth: usize,
    ) -> Option<Value> {
        if self.too_deep(depth) {
            return None;
        }

        let normalized = normalize(schema, example_override, &self.config);
        let schema_type = normalized.schema_type.as_ref();

        if let Some(literal) = normalized.literal {
            return Some(encoder::plain_json(literal, schema_type));
        }

        let schema = normalized.schema.as_deref()?;
        if is_type(schema_type, "array") {
            return Some(Value::Array(self.json_array(schema, depth)));
        }
        if is_type(schema_type, "object") {
            return Some(Value::Object(self.json_object(schema, depth)));
        }
        scalar_value(schema, schema_type)
    }

    fn json_array(&self, schema: &Schema, depth: usize) -> Vec<Value> {
        let Some(items) = schema.items.as_deref() else {
            return Vec::new();
        };

        let samples = match item_alternatives(items) {
            Some(alternatives) => alternatives
                .iter()
                .map(|alternative| {
                    let lifted = lift(items, alternative, &self.config);
                    self.json_value(Some(&lifted), None, depth + 1)
                        .unwrap_or(Value::Null)
                })
                .collect(),
            None => vec![self.json_value(Some(items), None, depth + 1).unwrap_or(Value::Null)],
        };

        apply_item_bounds(samples, schema)
    }

    fn json_object(&self, schema: &Schema, depth: usize) -> Map<String, Value> {
        let mut out = Map::new();
        let mut budget = PropertyBudget::new(schema);

        for (name, prop) in schema.properties.iter().flatten() {
            if prop.is_hidden(&self.config) || !budget.can_add(name) {
                continue;
            }

            let value = if encoder::is_discriminator_property(schema, name) {
                encoder::discriminator_value(schema).map(Value::String)
            } else {
                self.json_value(Some(prop), None, depth + 1)
            };
            if let Some(value) = value {
                out.insert(name.clone(), value);
            }
            budget.record(name);
        }

        if budget.is_exhausted() {
            return out;
        }

        match &schema.additional_properties {
            Some(AdditionalProperties::Allowed(true)) => {
                out.insert("additionalProp1".to_string(), Value::Object(Map::new()));
                budget.record("additionalProp1");
            }
            Some(AdditionalProperties::Schema(extra)) => {
                let sample = self.json_value(Some(extra), None, depth + 1);
                let weight = sample.as_ref().map_or(1, Weighted::weight);
                let count = additional_property_count(schema, budget.emitted(), weight);
                for i in 1..=count {
                    if budget.is_exhausted() {
                        break;
                    }
                    let name = format!("additionalProp{i}");
                    if let Some(sample) = &sample {
                        out.insert(name.clone(), sample.clone());
                    }
                    budget.record(&name);
                }
            }
            _ => {}
        }

        out
    }

    // ---- XML ----

    fn xml_sample(
        &self,
        schema: Option<&Schema>,
        example_override: Option<&Value>,
        depth: usize,
    ) -> Option<XmlSample> {
        if self.too_deep(depth) {
            return None;
        }

        let normalized = normalize(schema, example_override, &self.config);
        let schema = normalized.schema.as_deref();
        let xml = schema.and_then(|s| s.xml.clone()).unwrap_or_default();
        let element = encoder::element_for(&xml);

        if let Some(literal) = normalized.literal {
            let schema_type = normalized.schema_type.or_else(|| match (schema, &literal) {
                (None, Value::Array(_)) => Some(TypeSpec::single("array")),
                (None, Value::Object(_)) => Some(TypeSpec::single("object")),
                _ => None,
            });
            return Some(self.xml_literal(schema, schema_type.as_ref(), literal, element, depth));
        }

        let schema = schema?;
        let schema_type = normalized.schema_type.as_ref();

        if is_type(schema_type, "array") {
            return self.xml_array(schema, element, depth);
        }
        if is_type(schema_type, "object") {
            return Some(XmlSample::Element(self.xml_object(schema, element, depth)));
        }

        let mut element = element;
        if let Some(value) = scalar_value(schema, schema_type) {
            element.push_text(encoder::value_text(&value));
        }
        Some(XmlSample::Element(element))
    }

    /// Re-render a literal through its schema so attributes, visibility and
    /// item bounds still apply
    fn xml_literal(
        &self,
        schema: Option<&Schema>,
        schema_type: Option<&TypeSpec>,
        literal: Value,
        mut element: XmlElement,
        depth: usize,
    ) -> XmlSample {
        if is_type(schema_type, "array") {
            let entries = match literal {
                Value::String(text) => return XmlSample::Literal(text),
                Value::Array(entries) => entries,
                other => vec![other],
            };

            let parent_xml = schema.and_then(|s| s.xml.as_ref());
            let items = schema
                .and_then(|s| s.items.as_deref())
                .map(|items| encoder::inherit_item_xml(items, parent_xml));

            let samples: Vec<XmlSample> = entries
                .iter()
                .filter_map(|entry| self.xml_sample(items.as_deref(), Some(entry), depth + 1))
                .collect();
            let samples = match schema {
                Some(schema) => apply_item_bounds(samples, schema),
                None => samples,
            };

            if parent_xml.is_some_and(|xml| xml.wrapped) {
                samples.into_iter().for_each(|s| element.push_sample(s));
                return XmlSample::Element(element);
            }
            return XmlSample::Fragment(samples);
        }

        if is_type(schema_type, "object") {
            let entries = match literal {
                Value::String(text) => return XmlSample::Literal(text),
                Value::Object(entries) => entries,
                _ => Map::new(),
            };

            let mut budget = schema.map(PropertyBudget::new);
            for (name, value) in &entries {
                let prop = schema.and_then(|s| s.property(name));
                if prop.is_some_and(|p| p.is_excluded_by(&self.config)) {
                    continue;
                }
                if let Some(prop) = prop.filter(|p| p.is_xml_attribute()) {
                    element.set_attribute(encoder::attribute_name(prop, name), encoder::value_text(value));
                    continue;
                }
                self.xml_add_property(&mut element, budget.as_mut(), schema, name, Some(value), depth);
            }
            return XmlSample::Element(element);
        }

        element.children.extend(encoder::literal_nodes(&literal));
        XmlSample::Element(element)
    }

    fn xml_array(&self, schema: &Schema, mut element: XmlElement, depth: usize) -> Option<XmlSample> {
        let Some(items) = schema.items.as_deref() else {
            return Some(XmlSample::Fragment(Vec::new()));
        };
        let wrapped = schema.xml.as_ref().is_some_and(|xml| xml.wrapped);
        let items = encoder::inherit_item_xml(items, schema.xml.as_ref());

        let samples: Vec<XmlSample> = match item_alternatives(&items) {
            Some(alternatives) => alternatives
                .iter()
                .filter_map(|alternative| {
                    let lifted = lift(&items, alternative, &self.config);
                    self.xml_sample(Some(&lifted), None, depth + 1)
                })
                .collect(),
            None if wrapped => self.xml_sample(Some(&items), None, depth + 1).into_iter().collect(),
            None => return self.xml_sample(Some(&items), None, depth + 1),
        };
        let samples = apply_item_bounds(samples, schema);

        if wrapped {
            samples.into_iter().for_each(|s| element.push_sample(s));
            Some(XmlSample::Element(element))
        } else {
            Some(XmlSample::Fragment(samples))
        }
    }

    fn xml_object(&self, schema: &Schema, mut element: XmlElement, depth: usize) -> XmlElement {
        let mut budget = PropertyBudget::new(schema);

        for (name, prop) in schema.properties.iter().flatten() {
            if prop.is_hidden(&self.config) {
                continue;
            }
            self.xml_add_property(&mut element, Some(&mut budget), Some(schema), name, None, depth);
        }

        if budget.is_exhausted() {
            return element;
        }

        match &schema.additional_properties {
            Some(AdditionalProperties::Allowed(true)) => {
                element.push_element(XmlElement::with_text("additionalProp", ANY_VALUE_TEXT));
                budget.record("additionalProp");
            }
            Some(AdditionalProperties::Schema(extra)) => {
                let sample = self.xml_sample(Some(extra), None, depth + 1);
                let has_own_name = extra
                    .xml
                    .as_ref()
                    .and_then(|xml| xml.name.as_deref())
                    .is_some_and(|name| name != DEFAULT_XML_NAME);

                if has_own_name {
                    if let Some(sample) = sample {
                        element.push_sample(sample);
                    }
                    return element;
                }

                let weight = sample.as_ref().map_or(1, Weighted::weight);
                let count = additional_property_count(schema, budget.emitted(), weight);
                for i in 1..=count {
                    if budget.is_exhausted() {
                        break;
                    }
                    let name = format!("additionalProp{i}");
                    let mut extra_element = XmlElement::new(name.clone());
                    if let Some(XmlSample::Element(generated)) = &sample {
                        if generated.name == DEFAULT_XML_NAME {
                            extra_element.attributes.clone_from(&generated.attributes);
                            extra_element.children.clone_from(&generated.children);
                        }
                    }
                    element.push_element(extra_element);
                    budget.record(&name);
                }
            }
            _ => {}
        }

        element
    }

    /// Add one property of `parent` to `element`, as an attribute or as a
    /// nested sample
    fn xml_add_property(
        &self,
        element: &mut XmlElement,
        budget: Option<&mut PropertyBudget<'_>>,
        parent: Option<&Schema>,
        name: &str,
        example_override: Option<&Value>,
        depth: usize,
    ) {
        let prop = match parent {
            Some(parent) => match parent.property(name) {
                Some(prop) if prop.is_xml_attribute() => {
                    element.set_attribute(encoder::attribute_name(prop, name), encoder::attribute_value(prop));
                    return;
                }
                Some(prop) => Some(encoder::named_property(prop, name)),
                None if parent.additional_properties != Some(AdditionalProperties::Allowed(false)) => {
                    Some(Cow::Owned(Schema {
                        xml: Some(XmlMeta::named(name)),
                        ..Default::default()
                    }))
                }
                None => None,
            },
            None => None,
        };

        let sample = self.xml_sample(prop.as_deref(), example_override, depth + 1);

        if let Some(budget) = budget {
            if !budget.can_add(name) {
                debug!("Property {} skipped, maxProperties reached", name);
                return;
            }
            budget.record(name);
        }
        if let Some(sample) = sample {
            element.push_sample(sample);
        }
    }
}

impl SamplePort for SampleGenerator {
    fn sample(
        &self,
        schema: Option<&Value>,
        config: &SampleConfig,
        example_override: Option<&Value>,
        mode: OutputMode,
    ) -> Option<GeneratedSample> {
        if config == &self.config {
            self.generate(schema, example_override, mode)
        } else {
            Self::new(*config)
                .with_max_depth(self.max_depth)
                .generate(schema, example_override, mode)
        }
    }
}

fn is_type(schema_type: Option<&TypeSpec>, name: &str) -> bool {
    schema_type.is_some_and(|t| t.includes(name))
}

/// `const`, else the first `enum` entry, else the constrained primitive
fn scalar_value(schema: &Schema, schema_type: Option<&TypeSpec>) -> Option<Value> {
    if let Some(value) = &schema.const_value {
        return Some(value.clone());
    }
    if let Some(values) = &schema.enum_values {
        return values.first().cloned();
    }
    Some(constrained_value(schema, schema_type))
}

/// `items.anyOf`, else `items.oneOf`: one sample per listed alternative
fn item_alternatives(items: &Schema) -> Option<&[Schema]> {
    items.any_of.as_deref().or(items.one_of.as_deref())
}
