use super::generator::SampleGenerator;
use super::xml_writer::XML_DECLARATION;
use crate::domain::{SampleConfig, Schema, XmlSample};
use serde_json::{json, Value};

fn xml(schema: Value) -> Option<String> {
    xml_with(schema, None, SampleConfig::default())
}

fn xml_with(schema: Value, example: Option<Value>, config: SampleConfig) -> Option<String> {
    let schema = Schema::from_value(&schema).unwrap();
    SampleGenerator::new(config).xml_document(Some(&schema), example.as_ref())
}

fn document(lines: &[&str]) -> String {
    format!("{}\n{}", XML_DECLARATION, lines.join("\n"))
}

#[test]
fn test_attribute_property() {
    let schema = json!({
        "type": "object",
        "xml": { "name": "Pet" },
        "properties": {
            "id": { "type": "integer", "xml": { "attribute": true } },
            "name": { "type": "string", "example": "doggie" }
        }
    });

    assert_eq!(
        xml(schema),
        Some(document(&["<Pet id=\"0\">", "\t<name>doggie</name>", "</Pet>"]))
    );
}

#[test]
fn test_attribute_value_precedence() {
    let schema = json!({
        "xml": { "name": "Order" },
        "properties": {
            "status": { "type": "string", "enum": ["placed", "shipped"], "xml": { "attribute": true } },
            "code": { "type": "string", "default": "X1", "xml": { "attribute": true, "name": "ref" } }
        }
    });

    assert_eq!(
        xml(schema),
        Some(document(&["<Order status=\"placed\" ref=\"X1\"/>"]))
    );
}

#[test]
fn test_default_element_name() {
    assert_eq!(xml(json!({ "type": "string" })), Some(document(&["<notagname>string</notagname>"])));
}

#[test]
fn test_prefix_and_namespace() {
    let schema = json!({
        "type": "string",
        "xml": { "name": "id", "prefix": "ns", "namespace": "http://example.com/ns" }
    });

    assert_eq!(
        xml(schema),
        Some(document(&["<ns:id xmlns:ns=\"http://example.com/ns\">string</ns:id>"]))
    );
}

#[test]
fn test_default_namespace_without_prefix() {
    let schema = json!({
        "type": "string",
        "xml": { "name": "Pet", "namespace": "http://example.com/schema" }
    });

    assert_eq!(
        xml(schema),
        Some(document(&["<Pet xmlns=\"http://example.com/schema\">string</Pet>"]))
    );
}

#[test]
fn test_wrapped_array() {
    let schema = json!({
        "type": "array",
        "xml": { "name": "tags", "wrapped": true },
        "items": { "type": "string", "xml": { "name": "tag" } },
        "minItems": 2
    });

    assert_eq!(
        xml(schema),
        Some(document(&["<tags>", "\t<tag>string</tag>", "\t<tag>string</tag>", "</tags>"]))
    );
}

#[test]
fn test_unwrapped_array_property() {
    let schema = json!({
        "type": "object",
        "xml": { "name": "Pet" },
        "properties": {
            "photoUrls": { "type": "array", "items": { "type": "string" } }
        }
    });

    assert_eq!(
        xml(schema),
        Some(document(&["<Pet>", "\t<photoUrls>string</photoUrls>", "</Pet>"]))
    );
}

#[test]
fn test_additional_properties_true() {
    let schema = json!({ "type": "object", "xml": { "name": "Map" }, "additionalProperties": true });

    assert_eq!(
        xml(schema),
        Some(document(&["<Map>", "\t<additionalProp>Anything can be here</additionalProp>", "</Map>"]))
    );
}

#[test]
fn test_additional_properties_schema() {
    let schema = json!({
        "type": "object",
        "xml": { "name": "Map" },
        "additionalProperties": { "type": "string" }
    });

    assert_eq!(
        xml(schema),
        Some(document(&[
            "<Map>",
            "\t<additionalProp1>string</additionalProp1>",
            "\t<additionalProp2>string</additionalProp2>",
            "\t<additionalProp3>string</additionalProp3>",
            "</Map>",
        ]))
    );
}

#[test]
fn test_additional_properties_with_own_name() {
    let schema = json!({
        "type": "object",
        "xml": { "name": "Map" },
        "additionalProperties": { "type": "integer", "xml": { "name": "extra" } }
    });

    assert_eq!(xml(schema), Some(document(&["<Map>", "\t<extra>0</extra>", "</Map>"])));
}

#[test]
fn test_max_properties_ignores_attributes() {
    let schema = json!({
        "xml": { "name": "R" },
        "maxProperties": 1,
        "properties": {
            "kind": { "type": "string", "xml": { "attribute": true } },
            "a": { "type": "integer" },
            "b": { "type": "integer" }
        }
    });

    assert_eq!(xml(schema), Some(document(&["<R kind=\"string\">", "\t<a>0</a>", "</R>"])));
}

#[test]
fn test_literal_object_is_rerendered() {
    let schema = json!({
        "type": "object",
        "xml": { "name": "Pet" },
        "properties": {
            "id": { "type": "integer", "xml": { "attribute": true } },
            "name": { "type": "string" },
            "secret": { "type": "string", "writeOnly": true }
        },
        "example": { "id": 5, "name": "rex", "secret": "hidden", "extra": "x" }
    });

    assert_eq!(
        xml(schema),
        Some(document(&["<Pet id=\"5\">", "\t<name>rex</name>", "\t<extra>x</extra>", "</Pet>"]))
    );
}

#[test]
fn test_literal_wrapped_array() {
    let schema = json!({
        "type": "array",
        "xml": { "name": "ids", "wrapped": true },
        "items": { "type": "integer", "xml": { "name": "id" } },
        "example": [1, 2]
    });

    assert_eq!(
        xml(schema),
        Some(document(&["<ids>", "\t<id>1</id>", "\t<id>2</id>", "</ids>"]))
    );
}

#[test]
fn test_literal_unwrapped_array_is_fragment() {
    let schema = Schema::from_value(&json!({
        "type": "array",
        "items": { "type": "string", "xml": { "name": "tag" } }
    }))
    .unwrap();

    let sample = SampleGenerator::default()
        .sample_xml(Some(&schema), Some(&json!(["a", "b"])))
        .unwrap();
    match sample {
        XmlSample::Fragment(parts) => {
            let texts: Vec<String> = parts
                .iter()
                .filter_map(|part| part.as_element().and_then(|e| e.text()))
                .collect();
            assert_eq!(texts, vec!["a", "b"]);
        }
        other => panic!("expected a fragment, got {other:?}"),
    }
}

#[test]
fn test_sample_tree_shape() {
    let schema = Schema::from_value(&json!({
        "xml": { "name": "Order" },
        "properties": {
            "id": { "type": "integer", "xml": { "attribute": true } },
            "item": { "xml": { "name": "line" }, "properties": { "sku": { "type": "string" } } }
        }
    }))
    .unwrap();

    let sample = SampleGenerator::default().sample_xml(Some(&schema), None).unwrap();
    let order = sample.as_element().unwrap();
    assert_eq!(order.attribute("id"), Some("0"));

    let line = order.child("line").unwrap();
    assert_eq!(line.child("sku").and_then(|sku| sku.text()).as_deref(), Some("string"));
    assert!(order.child("item").is_none());
}

#[test]
fn test_string_literal_for_object_is_echoed() {
    let schema = json!({ "type": "object", "example": "<Pet><id>1</id></Pet>" });
    assert_eq!(xml(schema), Some("<Pet><id>1</id></Pet>".to_string()));
}

#[test]
fn test_override_replaces_example() {
    let schema = json!({ "type": "string", "xml": { "name": "name" }, "example": "doggie" });
    assert_eq!(
        xml_with(schema, Some(json!("rex")), SampleConfig::default()),
        Some(document(&["<name>rex</name>"]))
    );
}

#[test]
fn test_first_alternative_drives_xml() {
    let schema = json!({
        "oneOf": [
            { "type": "object", "xml": { "name": "Cat" }, "properties": { "meow": { "type": "boolean" } } },
            { "type": "object", "xml": { "name": "Dog" } }
        ]
    });

    assert_eq!(xml(schema), Some(document(&["<Cat>", "\t<meow>true</meow>", "</Cat>"])));
}

#[test]
fn test_read_only_hidden_in_xml() {
    let schema = json!({
        "xml": { "name": "User" },
        "properties": {
            "id": { "type": "integer", "readOnly": true },
            "name": { "type": "string" }
        }
    });

    assert_eq!(
        xml(schema.clone()),
        Some(document(&["<User>", "\t<name>string</name>", "</User>"]))
    );
    assert_eq!(
        xml_with(schema, None, SampleConfig::new(true, false)),
        Some(document(&["<User>", "\t<id>0</id>", "\t<name>string</name>", "</User>"]))
    );
}

#[test]
fn test_missing_schema() {
    assert_eq!(SampleGenerator::default().xml_document(None, None), None);
}
