//! Generated sample values.

use serde_json::Value;

/// Element name used when a schema carries no `xml.name`
pub const DEFAULT_XML_NAME: &str = "notagname";

/// Child of an XML element
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.push_text(text);
        element
    }

    /// Later assignments to the same attribute replace the earlier value
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(XmlNode::Text(text));
        }
    }

    pub fn push_element(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    /// Append a nested sample; fragments are spliced in as siblings
    pub fn push_sample(&mut self, sample: XmlSample) {
        match sample {
            XmlSample::Element(element) => self.push_element(element),
            XmlSample::Fragment(parts) => parts.into_iter().for_each(|part| self.push_sample(part)),
            XmlSample::Literal(text) => self.push_text(text),
        }
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|element| element.name == name)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Concatenated text children, `None` for an element without text
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Result of walking a schema in XML mode
#[derive(Debug, Clone, PartialEq)]
pub enum XmlSample {
    Element(XmlElement),
    /// Repeated siblings produced by an unwrapped array
    Fragment(Vec<XmlSample>),
    /// String literal echoed verbatim
    Literal(String),
}

impl XmlSample {
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// Sample produced in either output mode
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedSample {
    Json(Value),
    Xml(XmlSample),
}

impl GeneratedSample {
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Xml(_) => None,
        }
    }

    pub fn into_xml(self) -> Option<XmlSample> {
        match self {
            Self::Xml(sample) => Some(sample),
            Self::Json(_) => None,
        }
    }
}
