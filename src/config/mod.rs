use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

use crate::adapters::generator::DEFAULT_MAX_DEPTH;
use crate::adapters::sample_cache::DEFAULT_CAPACITY;
use crate::cli::Cli;
use crate::domain::{OutputMode, SampleConfig};
use crate::error::{Result, SamplerError};

/// Default settings file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "schema-sampler.toml";

/// Prefix of environment overrides, e.g. `SCHEMA_SAMPLER__CACHE__CAPACITY`
pub const ENV_PREFIX: &str = "SCHEMA_SAMPLER";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub sample: SampleSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Visibility switches handed to the generator
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SampleSettings {
    #[serde(default)]
    pub include_read_only: bool,
    #[serde(default)]
    pub include_write_only: bool,
    /// Nesting limit before a subtree is cut off
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for SampleSettings {
    fn default() -> Self {
        Self {
            include_read_only: false,
            include_write_only: false,
            max_depth: default_max_depth(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CacheSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            capacity: default_capacity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputMode,
    /// Pretty-print JSON samples
    #[serde(default = "default_enabled")]
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputMode::Json,
            pretty: true,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Settings {
    pub fn new() -> Result<Self> {
        Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Defaults, then the optional settings file, then environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings: Settings = Self::builder(path)?.build()?.try_deserialize()?;
        settings.validated()
    }

    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self> {
        let mut settings: Settings = Self::builder(&cli.config)?.build()?.try_deserialize()?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validated()
    }

    fn builder(path: &Path) -> Result<ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("sample.include_read_only", false)?
            .set_default("sample.include_write_only", false)?
            .set_default("sample.max_depth", DEFAULT_MAX_DEPTH as i64)?
            .set_default("cache.enabled", true)?
            .set_default("cache.capacity", DEFAULT_CAPACITY as i64)?
            .set_default("output.format", "json")?
            .set_default("output.pretty", true)?
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            ))
    }

    fn validated(self) -> Result<Self> {
        validator::ConfigValidator::validate(&self).map_err(SamplerError::Validation)?;
        Ok(self)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if cli.include_read_only {
            self.sample.include_read_only = true;
        }
        if cli.include_write_only {
            self.sample.include_write_only = true;
        }
        if cli.xml {
            self.output.format = OutputMode::Xml;
        }
        if cli.compact {
            self.output.pretty = false;
        }
        if cli.no_cache {
            self.cache.enabled = false;
        }
    }

    pub fn sample_config(&self) -> SampleConfig {
        SampleConfig::new(self.sample.include_read_only, self.sample.include_write_only)
    }
}
