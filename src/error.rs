use std::path::PathBuf;
use thiserror::Error;

use crate::config::validator::ValidationError;

/// Errors raised by the host-facing layers (document loading, settings).
///
/// Sample generation itself never fails; it degrades to defaults instead.
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse schema document {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("No schema at JSON pointer '{0}'")]
    PointerNotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation failed:\n{}", format_validation(.0))]
    Validation(Vec<ValidationError>),
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, SamplerError>;
