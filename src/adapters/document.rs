//! Loading of schema documents for the command-line host.

use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, SamplerError};

/// Read a JSON or YAML document, choosing the parser from the file extension.
/// Files without a recognised extension are tried as JSON, then YAML.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|source| SamplerError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    debug!("Loading schema document {} ({})", path.display(), ext);

    let parsed = match ext {
        "json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        _ => serde_json::from_str(&content)
            .or_else(|_| serde_yaml::from_str(&content))
            .map_err(|e| e.to_string()),
    };

    parsed.map_err(|reason| SamplerError::Parse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Select the sub-schema addressed by an RFC 6901 pointer (`""` is the root)
pub fn select_schema<'a>(document: &'a Value, pointer: Option<&str>) -> Result<&'a Value> {
    match pointer {
        None | Some("") => Ok(document),
        Some(pointer) => document
            .pointer(pointer)
            .ok_or_else(|| SamplerError::PointerNotFound(pointer.to_string())),
    }
}
