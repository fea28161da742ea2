//! XML document serialization for generated samples.

use crate::domain::{XmlElement, XmlNode, XmlSample};

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const INDENT: char = '\t';

/// Serialize a sample as an XML document with a declaration and tab
/// indentation
pub fn to_xml_string(sample: &XmlSample) -> String {
    let mut out = String::from(XML_DECLARATION);
    write_sample(&mut out, sample, 0);
    out
}

/// Document text for a sample: string literals are returned as they are and
/// an empty literal yields nothing
pub fn into_document(sample: XmlSample) -> Option<String> {
    match sample {
        XmlSample::Literal(text) if text.is_empty() => None,
        XmlSample::Literal(text) => Some(text),
        sample => Some(to_xml_string(&sample)),
    }
}

fn write_sample(out: &mut String, sample: &XmlSample, depth: usize) {
    match sample {
        XmlSample::Element(element) => write_element(out, element, depth),
        XmlSample::Fragment(parts) => parts.iter().for_each(|part| write_sample(out, part, depth)),
        XmlSample::Literal(text) => {
            newline(out, depth);
            out.push_str(&escape(text));
        }
    }
}

fn write_element(out: &mut String, element: &XmlElement, depth: usize) {
    newline(out, depth);
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }

    let text_only = element
        .children
        .iter()
        .all(|child| matches!(child, XmlNode::Text(_)));

    out.push('>');
    if text_only {
        if let Some(text) = element.text() {
            out.push_str(&escape(&text));
        }
    } else {
        for child in &element.children {
            match child {
                XmlNode::Element(nested) => write_element(out, nested, depth + 1),
                XmlNode::Text(text) => {
                    newline(out, depth + 1);
                    out.push_str(&escape(text));
                }
            }
        }
        newline(out, depth);
    }
    out.push_str(&format!("</{}>", element.name));
}

fn newline(out: &mut String, depth: usize) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.extend(std::iter::repeat(INDENT).take(depth));
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
