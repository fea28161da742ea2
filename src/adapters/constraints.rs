//! Numeric, string, array and object constraint application.

use serde_json::{Number, Value};
use std::collections::HashSet;
use tracing::warn;

use crate::domain::{Schema, XmlElement, XmlNode, XmlSample};

/// Largest integer a double represents exactly (2^53)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Additional properties emitted when no `minProperties` asks for more
pub const DEFAULT_ADDITIONAL_PROPERTIES: usize = 3;

/// Ceiling on the size of a subtree grown by `minItems`, `minLength` or
/// `minProperties`, measured by [`Weighted::weight`]
pub const MAX_SAMPLE_WEIGHT: usize = 100_000;

/// Approximate size of a generated sample: one per node plus the length of
/// its text
pub trait Weighted {
    fn weight(&self) -> usize;
}

impl Weighted for Value {
    fn weight(&self) -> usize {
        match self {
            Value::String(text) => text.len().max(1),
            Value::Array(items) => items.iter().fold(1, |sum, item| sum.saturating_add(item.weight())),
            Value::Object(map) => map.iter().fold(1, |sum, (key, val)| {
                sum.saturating_add(key.len()).saturating_add(val.weight())
            }),
            _ => 1,
        }
    }
}

impl Weighted for XmlElement {
    fn weight(&self) -> usize {
        let attributes = self
            .attributes
            .iter()
            .fold(0_usize, |sum, (name, value)| sum.saturating_add(name.len() + value.len()));
        self.children
            .iter()
            .fold(self.name.len().saturating_add(attributes).max(1), |sum, child| {
                sum.saturating_add(child.weight())
            })
    }
}

impl Weighted for XmlNode {
    fn weight(&self) -> usize {
        match self {
            XmlNode::Element(element) => element.weight(),
            XmlNode::Text(text) => text.len().max(1),
        }
    }
}

impl Weighted for XmlSample {
    fn weight(&self) -> usize {
        match self {
            XmlSample::Element(element) => element.weight(),
            XmlSample::Fragment(parts) => parts.iter().fold(0, |sum, part| sum.saturating_add(part.weight())),
            XmlSample::Literal(text) => text.len().max(1),
        }
    }
}

/// How many entries of `weight` each fit under [`MAX_SAMPLE_WEIGHT`], never
/// fewer than one
fn affordable(weight: usize) -> usize {
    (MAX_SAMPLE_WEIGHT / weight.max(1)).max(1)
}

/// Convert a synthesized number to JSON, keeping integral values integers
pub fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Clamp `value` into the schema's numeric bounds and round it up to the
/// next multiple of `multipleOf`.
///
/// A value already inside the bounds is kept. When the bounds contradict each
/// other (`lo > hi`) the value is left alone before the `multipleOf` step.
pub fn apply_numeric_bounds(value: f64, schema: &Schema) -> f64 {
    let epsilon = if value.fract() == 0.0 { 1.0 } else { f64::EPSILON };

    let lo = max_of(schema.minimum, schema.exclusive_minimum.map(|n| n + epsilon));
    let hi = min_of(schema.maximum, schema.exclusive_maximum.map(|n| n - epsilon));

    let mut result = match (lo, hi) {
        (Some(lo), Some(hi)) if lo > hi => value,
        (lo, hi) => {
            let raised = lo.map_or(value, |lo| value.max(lo));
            hi.map_or(raised, |hi| raised.min(hi))
        }
    };

    if let Some(step) = schema.multiple_of.filter(|step| *step > 0.0) {
        let remainder = result % step;
        if remainder != 0.0 {
            result = result + step - remainder;
        }
    }

    result
}

fn max_of(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

fn min_of(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Truncate to `maxLength` characters, then pad cyclically to `minLength`
pub fn apply_string_bounds(value: &str, schema: &Schema) -> String {
    let mut chars: Vec<char> = value.chars().collect();

    if let Some(max) = schema.max_length {
        chars.truncate(max);
    }

    if let Some(min) = schema.min_length {
        let min = if min > MAX_SAMPLE_WEIGHT {
            warn!("minLength {} capped at {}", min, MAX_SAMPLE_WEIGHT);
            MAX_SAMPLE_WEIGHT
        } else {
            min
        };
        let seed_len = chars.len();
        if seed_len > 0 {
            let mut i = 0;
            while chars.len() < min {
                chars.push(chars[i % seed_len]);
                i += 1;
            }
        }
    }

    chars.into_iter().collect()
}

/// Truncate to `maxItems`, then repeat existing items cyclically up to
/// `minItems`. An empty list stays empty, and growth stops before the list
/// outweighs [`MAX_SAMPLE_WEIGHT`].
pub fn apply_item_bounds<T: Clone + Weighted>(mut items: Vec<T>, schema: &Schema) -> Vec<T> {
    if let Some(max) = schema.max_items {
        items.truncate(max);
    }

    if let Some(min) = schema.min_items {
        let seed_len = items.len();
        if seed_len > 0 && min > seed_len {
            let seed_weight = items
                .iter()
                .fold(0_usize, |sum, item| sum.saturating_add(item.weight()));
            let limit = affordable(seed_weight).saturating_mul(seed_len).max(seed_len);
            let target = if min > limit {
                warn!("minItems {} capped at {}", min, limit);
                limit
            } else {
                min
            };

            let mut i = 0;
            while items.len() < target {
                items.push(items[i % seed_len].clone());
                i += 1;
            }
        }
    }

    items
}

/// Tracks emitted properties against `maxProperties`, reserving slots for
/// required names that have not been emitted yet.
#[derive(Debug)]
pub struct PropertyBudget<'a> {
    max: Option<usize>,
    required: &'a [String],
    emitted: HashSet<String>,
    count: usize,
}

impl<'a> PropertyBudget<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            max: schema.max_properties,
            required: schema.required.as_deref().unwrap_or(&[]),
            emitted: HashSet::new(),
            count: 0,
        }
    }

    pub fn can_add(&self, name: &str) -> bool {
        let Some(max) = self.max else {
            return true;
        };
        if self.count >= max {
            return false;
        }
        if self.required.iter().any(|r| r == name) {
            return true;
        }

        let unmet_required = self
            .required
            .iter()
            .filter(|r| !self.emitted.contains(r.as_str()))
            .count();
        max.saturating_sub(self.count).saturating_sub(unmet_required) > 0
    }

    pub fn record(&mut self, name: &str) {
        self.emitted.insert(name.to_string());
        self.count += 1;
    }

    pub fn is_exhausted(&self) -> bool {
        self.max.is_some_and(|max| self.count >= max)
    }

    pub fn emitted(&self) -> usize {
        self.count
    }
}

/// Number of `additionalPropN` entries to synthesize for a schema-typed
/// `additionalProperties` whose sample weighs `sample_weight`
pub fn additional_property_count(schema: &Schema, emitted: usize, sample_weight: usize) -> usize {
    let wanted = match schema.min_properties {
        Some(min) if emitted < min => min - emitted,
        _ => DEFAULT_ADDITIONAL_PROPERTIES,
    };
    let limit = affordable(sample_weight).max(DEFAULT_ADDITIONAL_PROPERTIES);
    if wanted > limit {
        warn!("minProperties {} capped at {} additional properties", wanted, limit);
        limit
    } else {
        wanted
    }
}
