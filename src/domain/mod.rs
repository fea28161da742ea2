use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod sample;
pub mod schema;

pub use sample::{GeneratedSample, XmlElement, XmlNode, XmlSample};
pub use schema::{AdditionalProperties, Discriminator, Schema, TypeSpec, XmlMeta};

/// Options consulted while walking a schema.
///
/// Serialized with the camelCase names used by documentation hosts
/// (`includeReadOnly`, `includeWriteOnly`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SampleConfig {
    /// Emit properties flagged `readOnly`
    pub include_read_only: bool,
    /// Emit properties flagged `writeOnly`
    pub include_write_only: bool,
}

impl SampleConfig {
    pub fn new(include_read_only: bool, include_write_only: bool) -> Self {
        Self {
            include_read_only,
            include_write_only,
        }
    }
}

/// Shape of the generated sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Json,
    Xml,
}

/// Anything able to turn a schema document into a sample.
///
/// Implemented by the plain generator and by the memoizing cache so hosts can
/// swap one for the other.
pub trait SamplePort: Send + Sync {
    fn sample(
        &self,
        schema: Option<&Value>,
        config: &SampleConfig,
        example_override: Option<&Value>,
        mode: OutputMode,
    ) -> Option<GeneratedSample>;
}
