//! Bounded memoization of generated samples

use lru::LruCache;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use super::generator::SampleGenerator;
use super::xml_writer::into_document;
use crate::domain::{GeneratedSample, OutputMode, SampleConfig, SamplePort};

/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 256;

/// Identity of a memoized call
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    mode: OutputMode,
    /// Serialized schema document
    schema: Option<String>,
    config: SampleConfig,
    /// Serialized override literal
    example_override: Option<String>,
}

impl CacheKey {
    fn new(
        mode: OutputMode,
        schema: Option<&Value>,
        config: &SampleConfig,
        example_override: Option<&Value>,
    ) -> Self {
        Self {
            mode,
            schema: schema.map(Value::to_string),
            config: *config,
            example_override: example_override.map(Value::to_string),
        }
    }
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

/// LRU cache in front of [`SampleGenerator`].
///
/// Generation runs outside the lock, so two threads missing on the same key
/// both compute the sample and the later insert wins.
pub struct SampleCache {
    entries: Mutex<LruCache<CacheKey, Option<GeneratedSample>>>,
    max_depth: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for SampleCache {
    fn default() -> Self {
        Self::with_capacity(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

impl SampleCache {
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            max_depth: None,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Use a non-default nesting limit for generated samples
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Memoized JSON sample
    pub fn memoized_sample_from_schema(
        &self,
        schema: Option<&Value>,
        config: &SampleConfig,
        example_override: Option<&Value>,
    ) -> Option<Value> {
        self.sample(schema, config, example_override, OutputMode::Json)
            .and_then(GeneratedSample::into_json)
    }

    /// Memoized XML document
    pub fn memoized_create_xml_example(
        &self,
        schema: Option<&Value>,
        config: &SampleConfig,
        example_override: Option<&Value>,
    ) -> Option<String> {
        self.sample(schema, config, example_override, OutputMode::Xml)
            .and_then(GeneratedSample::into_xml)
            .and_then(into_document)
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: entries.len(),
            capacity: entries.cap().get(),
        }
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn generator(&self, config: &SampleConfig) -> SampleGenerator {
        let generator = SampleGenerator::new(*config);
        match self.max_depth {
            Some(max_depth) => generator.with_max_depth(max_depth),
            None => generator,
        }
    }
}

impl SamplePort for SampleCache {
    fn sample(
        &self,
        schema: Option<&Value>,
        config: &SampleConfig,
        example_override: Option<&Value>,
        mode: OutputMode,
    ) -> Option<GeneratedSample> {
        let key = CacheKey::new(mode, schema, config, example_override);

        {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = entries.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return cached.clone();
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Sample cache miss ({:?})", mode);
        let sample = self.generator(config).generate(schema, example_override, mode);

        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(key, sample.clone());

        sample
    }
}
