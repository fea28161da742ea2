//! # Schema Sampler - example payloads from JSON Schema
//!
//! Schema Sampler synthesizes representative example values from JSON Schema /
//! OpenAPI schema documents, the way an API documentation renderer fills in
//! request and response examples.
//!
//! ## Features
//!
//! - **Two output modes**: JSON values and XML documents, sharing one set of rules
//! - **Composition**: the first `oneOf`/`anyOf` alternative is merged onto its parent
//! - **Constraints**: numeric bounds, `multipleOf`, string lengths, item and property counts
//! - **Visibility**: `readOnly`, `writeOnly` and `deprecated` properties
//! - **XML projection**: names, prefixes, namespaces, attributes and wrapped arrays
//! - **Literals**: `example`, `default` and caller overrides are echoed verbatim
//! - **Memoization**: bounded LRU cache for hosts that render the same schema repeatedly
//!
//! ## Quick Start
//!
//! ```rust
//! use schema_sampler::{sample_from_schema, SampleConfig};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": { "id": { "type": "integer" }, "name": { "type": "string" } },
//!     "required": ["id"]
//! });
//!
//! let sample = sample_from_schema(Some(&schema), &SampleConfig::default(), None);
//! assert_eq!(sample, Some(json!({ "id": 0, "name": "string" })));
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: schema model, generated sample types, the `SamplePort` seam
//! - **Adapters**: normalization, primitives, constraints, encoding, caching, document loading
//! - **Config**: layered settings for the command-line host

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;

use serde_json::Value;

pub use crate::adapters::generator::SampleGenerator;
pub use crate::adapters::sample_cache::{CacheStats, SampleCache};
pub use crate::domain::{GeneratedSample, OutputMode, SampleConfig, SamplePort, Schema};
pub use crate::error::SamplerError;

/// Generate a JSON sample. `None` means the schema yields no value.
pub fn sample_from_schema(
    schema: Option<&Value>,
    config: &SampleConfig,
    example_override: Option<&Value>,
) -> Option<Value> {
    sample_from_schema_generic(schema, config, example_override, OutputMode::Json)
        .and_then(GeneratedSample::into_json)
}

/// Generate an XML document (with declaration), or the literal text when the
/// sample is a plain string example.
pub fn create_xml_example(
    schema: Option<&Value>,
    config: &SampleConfig,
    example_override: Option<&Value>,
) -> Option<String> {
    let parsed = schema.and_then(Schema::from_value);
    SampleGenerator::new(*config).xml_document(parsed.as_ref(), example_override)
}

/// Generate a sample in either output mode
pub fn sample_from_schema_generic(
    schema: Option<&Value>,
    config: &SampleConfig,
    example_override: Option<&Value>,
    mode: OutputMode,
) -> Option<GeneratedSample> {
    SampleGenerator::new(*config).generate(schema, example_override, mode)
}
