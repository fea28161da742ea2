use thiserror::Error;

use crate::config::{CacheSettings, SampleSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_sample(&settings.sample) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_cache(&settings.cache) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_sample(sample: &SampleSettings) -> Result<(), Vec<ValidationError>> {
        if sample.max_depth == 0 {
            return Err(vec![ValidationError::InvalidValue {
                field: "sample.max_depth".to_string(),
                reason: "Depth limit must be greater than 0".to_string(),
            }]);
        }
        Ok(())
    }

    fn validate_cache(cache: &CacheSettings) -> Result<(), Vec<ValidationError>> {
        // A disabled cache never allocates, so its capacity is irrelevant
        if cache.enabled && cache.capacity == 0 {
            return Err(vec![ValidationError::InvalidValue {
                field: "cache.capacity".to_string(),
                reason: "Capacity must be greater than 0 when the cache is enabled".to_string(),
            }]);
        }
        Ok(())
    }
}
