use super::normalizer::{compose, infer_type, lift, normalize};
use crate::domain::{SampleConfig, Schema, TypeSpec};
use serde_json::{json, Value};

fn schema(value: Value) -> Schema {
    Schema::from_value(&value).unwrap()
}

fn property_names(schema: &Schema) -> Vec<&str> {
    schema
        .properties
        .as_ref()
        .map(|props| props.iter().map(|(name, _)| name.as_str()).collect())
        .unwrap_or_default()
}

#[test]
fn test_lift_keeps_base_fields() {
    let base = schema(json!({
        "type": "object",
        "properties": { "a": { "type": "string" } },
        "required": ["a"]
    }));
    let alternative = schema(json!({
        "type": "string",
        "minProperties": 1,
        "properties": {
            "a": { "type": "integer" },
            "b": { "type": "string" },
            "old": { "type": "string", "deprecated": true }
        },
        "required": ["b", "a"]
    }));

    let lifted = lift(&alternative, &base, &SampleConfig::default());

    assert_eq!(lifted.schema_type, Some(TypeSpec::single("object")));
    assert_eq!(lifted.min_properties, Some(1));
    assert_eq!(property_names(&lifted), vec!["a", "b"]);
    assert_eq!(lifted.property("a").unwrap().schema_type, Some(TypeSpec::single("string")));
    assert_eq!(lifted.required, Some(vec!["a".to_string(), "b".to_string()]));

    // the base schema is untouched
    assert_eq!(property_names(&base), vec!["a"]);
    assert!(base.min_properties.is_none());
}

#[test]
fn test_lift_respects_visibility() {
    let base = schema(json!({ "type": "object" }));
    let alternative = schema(json!({
        "properties": {
            "id": { "type": "integer", "readOnly": true },
            "secret": { "type": "string", "writeOnly": true }
        }
    }));

    let hidden = lift(&alternative, &base, &SampleConfig::default());
    assert!(property_names(&hidden).is_empty());

    let shown = lift(&alternative, &base, &SampleConfig::new(true, true));
    assert_eq!(property_names(&shown), vec!["id", "secret"]);
}

#[test]
fn test_lift_items_recursively() {
    let base = schema(json!({ "items": { "maximum": 5 } }));
    let alternative = schema(json!({ "items": { "type": "integer", "minimum": 3 } }));

    let lifted = lift(&alternative, &base, &SampleConfig::default());
    let items = lifted.items.unwrap();
    assert_eq!(items.schema_type, Some(TypeSpec::single("integer")));
    assert_eq!(items.minimum, Some(3.0));
    assert_eq!(items.maximum, Some(5.0));
}

#[test]
fn test_lift_does_not_copy_format() {
    let base = schema(json!({}));
    let alternative = schema(json!({ "type": "string", "format": "email" }));

    let lifted = lift(&alternative, &base, &SampleConfig::default());
    assert_eq!(lifted.schema_type, Some(TypeSpec::single("string")));
    assert!(lifted.format.is_none());
}

#[test]
fn test_compose_prefers_one_of() {
    let s = schema(json!({
        "oneOf": [{ "type": "string" }, { "type": "integer" }],
        "anyOf": [{ "type": "boolean" }]
    }));

    let (merged, plain) = compose(&s, &SampleConfig::default()).unwrap();
    assert_eq!(merged.schema_type, Some(TypeSpec::single("string")));
    assert!(!plain);
}

#[test]
fn test_compose_uses_any_of_when_one_of_empty() {
    let s = schema(json!({ "oneOf": [], "anyOf": [{ "type": "boolean" }] }));

    let (merged, _) = compose(&s, &SampleConfig::default()).unwrap();
    assert_eq!(merged.schema_type, Some(TypeSpec::single("boolean")));
}

#[test]
fn test_compose_nothing_to_do() {
    assert!(compose(&schema(json!({ "type": "string" })), &SampleConfig::default()).is_none());
}

#[test]
fn test_alternative_example_becomes_literal() {
    let s = schema(json!({ "oneOf": [{ "type": "string", "example": "from-alternative" }] }));

    let normalized = normalize(Some(&s), None, &SampleConfig::default());
    assert_eq!(normalized.literal, Some(json!("from-alternative")));
}

#[test]
fn test_alternative_default_is_not_a_literal() {
    let s = schema(json!({ "oneOf": [{ "type": "string", "default": "fallback" }] }));

    let normalized = normalize(Some(&s), None, &SampleConfig::default());
    assert!(normalized.literal.is_none());
    assert_eq!(normalized.schema.unwrap().default, Some(json!("fallback")));
}

#[test]
fn test_own_literal_skips_composition() {
    let s = schema(json!({ "default": 3, "oneOf": [{ "type": "integer" }] }));

    let normalized = normalize(Some(&s), None, &SampleConfig::default());
    assert_eq!(normalized.literal, Some(json!(3)));
    assert!(normalized.schema.unwrap().schema_type.is_none());
}

#[test]
fn test_literal_precedence() {
    let s = schema(json!({ "example": "example", "default": "default" }));
    let config = SampleConfig::default();

    let normalized = normalize(Some(&s), Some(&json!("override")), &config);
    assert_eq!(normalized.literal, Some(json!("override")));

    let normalized = normalize(Some(&s), None, &config);
    assert_eq!(normalized.literal, Some(json!("example")));

    let only_default = schema(json!({ "default": "default" }));
    let normalized = normalize(Some(&only_default), None, &config);
    assert_eq!(normalized.literal, Some(json!("default")));
}

#[test]
fn test_literal_is_sanitized() {
    let s = schema(json!({
        "example": { "$$ref": "https://example.com/spec#/Pet", "name": "doggie" }
    }));

    let normalized = normalize(Some(&s), None, &SampleConfig::default());
    assert_eq!(normalized.literal, Some(json!({ "name": "doggie" })));
}

#[test]
fn test_infer_type() {
    let cases = [
        (json!({ "properties": {} }), Some("object")),
        (json!({ "additionalProperties": true }), Some("object")),
        (json!({ "additionalProperties": false }), Some("string")),
        (json!({ "maxProperties": 2 }), Some("object")),
        (json!({ "items": {} }), Some("array")),
        (json!({ "minItems": 1 }), Some("array")),
        (json!({ "multipleOf": 3 }), Some("number")),
        (json!({ "maxLength": 3 }), Some("string")),
        (json!({ "enum": [1, 2] }), None),
    ];

    for (raw, expected) in cases {
        let s = schema(raw.clone());
        assert_eq!(
            infer_type(&s, false).as_ref().and_then(TypeSpec::primary),
            expected,
            "{raw}"
        );
    }

    assert!(infer_type(&schema(json!({})), true).is_none());
}
