use clap::Parser;
use std::path::PathBuf;

/// Schema Sampler - Generate example JSON or XML payloads from a JSON Schema / OpenAPI schema
#[derive(Parser, Debug, Clone)]
#[command(name = "schema-sampler", version, about, long_about = None)]
pub struct Cli {
    /// JSON or YAML document holding the schema
    pub schema: PathBuf,

    /// Path to the configuration file
    #[arg(short, long, env = "SCHEMA_SAMPLER_CONFIG", default_value = "schema-sampler.toml")]
    pub config: PathBuf,

    /// JSON pointer selecting the schema inside the document (e.g. "/components/schemas/Pet")
    #[arg(short, long)]
    pub pointer: Option<String>,

    /// Produce an XML document instead of JSON
    #[arg(long)]
    pub xml: bool,

    /// Literal example to echo instead of synthesizing (JSON; anything else is taken as a string)
    #[arg(short, long)]
    pub example: Option<String>,

    /// Include properties flagged readOnly
    #[arg(long)]
    pub include_read_only: bool,

    /// Include properties flagged writeOnly
    #[arg(long)]
    pub include_write_only: bool,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Bypass the sample cache
    #[arg(long)]
    pub no_cache: bool,
}

impl Cli {
    /// Parsed `--example` value
    pub fn example_value(&self) -> Option<serde_json::Value> {
        self.example.as_ref().map(|raw| {
            serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.clone()))
        })
    }
}
