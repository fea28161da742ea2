//! Schema normalization ahead of sample synthesis.
//!
//! Resolves the first `oneOf`/`anyOf` alternative onto its parent, recovers a
//! missing `type` from the keywords present and picks the literal value to echo
//! when the schema (or the caller) supplies one.

use serde_json::Value;
use std::borrow::Cow;

use super::sanitize::strip_uri_refs;
use crate::domain::{SampleConfig, Schema, TypeSpec};

/// Schema ready for synthesis
#[derive(Debug)]
pub struct Normalized<'a> {
    pub schema: Option<Cow<'a, Schema>>,
    /// Declared or inferred type
    pub schema_type: Option<TypeSpec>,
    /// Sanitized literal to echo instead of synthesizing
    pub literal: Option<Value>,
}

pub fn normalize<'a>(
    schema: Option<&'a Schema>,
    example_override: Option<&Value>,
    config: &SampleConfig,
) -> Normalized<'a> {
    let mut use_plain_value =
        example_override.is_some() || schema.is_some_and(Schema::has_literal);

    let schema: Option<Cow<'a, Schema>> = match schema {
        Some(schema) if !use_plain_value => match compose(schema, config) {
            Some((merged, plain)) => {
                use_plain_value = plain;
                Some(Cow::Owned(merged))
            }
            None => Some(Cow::Borrowed(schema)),
        },
        other => other.map(Cow::Borrowed),
    };

    let schema_type = schema.as_deref().and_then(|s| {
        s.schema_type
            .clone()
            .or_else(|| infer_type(s, use_plain_value))
    });

    let literal = if use_plain_value {
        example_override
            .cloned()
            .or_else(|| schema.as_deref().and_then(|s| s.example.clone()))
            .or_else(|| schema.as_deref().and_then(|s| s.default.clone()))
            .map(strip_uri_refs)
    } else {
        None
    };

    Normalized {
        schema,
        schema_type,
        literal,
    }
}

/// Recover a missing `type` from the keywords present
pub fn infer_type(schema: &Schema, use_plain_value: bool) -> Option<TypeSpec> {
    let has_additional = schema
        .additional_properties
        .as_ref()
        .is_some_and(|extra| extra.is_truthy());

    if schema.properties.is_some() || has_additional || schema.has_object_constraints() {
        Some(TypeSpec::single("object"))
    } else if schema.items.is_some() || schema.has_array_constraints() {
        Some(TypeSpec::single("array"))
    } else if schema.has_numeric_constraints() {
        Some(TypeSpec::single("number"))
    } else if !use_plain_value && schema.enum_values.is_none() {
        Some(TypeSpec::single("string"))
    } else {
        None
    }
}

/// Merge the first `oneOf` (else `anyOf`) alternative onto `schema`.
///
/// Returns `None` when there is nothing to compose. The flag reports whether
/// the alternative brought an `example` that should be echoed.
pub fn compose(schema: &Schema, config: &SampleConfig) -> Option<(Schema, bool)> {
    let alternative = schema.first_alternative()?;
    let merged = lift(alternative, schema, config);
    let use_plain_value = merged.example.is_some() && alternative.example.is_some();
    Some((merged, use_plain_value))
}

/// Copy the keywords of `source` that `target` lacks into a new schema.
///
/// `required` names are unioned, properties missing on `target` are added
/// unless hidden by `config`, and `items` are lifted recursively.
pub fn lift(source: &Schema, target: &Schema, config: &SampleConfig) -> Schema {
    let mut lifted = target.clone();

    fill(&mut lifted.example, &source.example);
    fill(&mut lifted.default, &source.default);
    fill(&mut lifted.enum_values, &source.enum_values);
    fill(&mut lifted.xml, &source.xml);
    fill(&mut lifted.schema_type, &source.schema_type);
    fill(&mut lifted.const_value, &source.const_value);
    fill(&mut lifted.max_properties, &source.max_properties);
    fill(&mut lifted.min_properties, &source.min_properties);
    fill(&mut lifted.min_items, &source.min_items);
    fill(&mut lifted.max_items, &source.max_items);
    fill(&mut lifted.minimum, &source.minimum);
    fill(&mut lifted.maximum, &source.maximum);
    fill(&mut lifted.exclusive_minimum, &source.exclusive_minimum);
    fill(&mut lifted.exclusive_maximum, &source.exclusive_maximum);
    fill(&mut lifted.multiple_of, &source.multiple_of);
    fill(&mut lifted.min_length, &source.min_length);
    fill(&mut lifted.max_length, &source.max_length);
    fill(&mut lifted.pattern, &source.pattern);

    if let Some(extra_required) = &source.required {
        let required = lifted.required.get_or_insert_with(Vec::new);
        for name in extra_required {
            if !required.contains(name) {
                required.push(name.clone());
            }
        }
    }

    if let Some(extra_props) = &source.properties {
        let props = lifted.properties.get_or_insert_with(Vec::new);
        for (name, prop) in extra_props {
            if prop.is_hidden(config) || props.iter().any(|(existing, _)| existing == name) {
                continue;
            }
            props.push((name.clone(), prop.clone()));
        }
    }

    if let Some(source_items) = &source.items {
        let base_items = lifted.items.take().map(|items| *items).unwrap_or_default();
        lifted.items = Some(Box::new(lift(source_items, &base_items, config)));
    }

    lifted
}

fn fill<T: Clone>(slot: &mut Option<T>, from: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(from);
    }
}
