use super::sample_cache::{CacheStats, SampleCache};
use crate::domain::{OutputMode, SampleConfig, SamplePort};
use serde_json::json;
use std::num::NonZeroUsize;

fn cache(capacity: usize) -> SampleCache {
    SampleCache::with_capacity(NonZeroUsize::new(capacity).unwrap())
}

#[test]
fn test_hit_returns_same_sample() {
    let cache = SampleCache::default();
    let schema = json!({ "type": "object", "properties": { "id": { "type": "integer" } } });
    let config = SampleConfig::default();

    let first = cache.memoized_sample_from_schema(Some(&schema), &config, None);
    let second = cache.memoized_sample_from_schema(Some(&schema), &config, None);

    assert_eq!(first, Some(json!({ "id": 0 })));
    assert_eq!(first, second);
    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 1,
            misses: 1,
            entries: 1,
            capacity: 256
        }
    );
}

#[test]
fn test_config_is_part_of_key() {
    let cache = SampleCache::default();
    let schema = json!({ "properties": { "id": { "type": "integer", "readOnly": true } } });

    let hidden = cache.memoized_sample_from_schema(Some(&schema), &SampleConfig::default(), None);
    let shown = cache.memoized_sample_from_schema(Some(&schema), &SampleConfig::new(true, false), None);

    assert_eq!(hidden, Some(json!({})));
    assert_eq!(shown, Some(json!({ "id": 0 })));
    assert_eq!(cache.stats().misses, 2);
}

#[test]
fn test_override_is_part_of_key() {
    let cache = SampleCache::default();
    let schema = json!({ "type": "string" });
    let config = SampleConfig::default();

    assert_eq!(
        cache.memoized_sample_from_schema(Some(&schema), &config, Some(&json!("a"))),
        Some(json!("a"))
    );
    assert_eq!(
        cache.memoized_sample_from_schema(Some(&schema), &config, Some(&json!("b"))),
        Some(json!("b"))
    );
    assert_eq!(cache.stats().hits, 0);
}

#[test]
fn test_mode_is_part_of_key() {
    let cache = SampleCache::default();
    let schema = json!({ "type": "string", "xml": { "name": "name" } });
    let config = SampleConfig::default();

    assert_eq!(cache.memoized_sample_from_schema(Some(&schema), &config, None), Some(json!("string")));
    let xml = cache.memoized_create_xml_example(Some(&schema), &config, None).unwrap();
    assert!(xml.ends_with("<name>string</name>"));
    assert_eq!(cache.stats().entries, 2);
}

#[test]
fn test_xml_memo_hit() {
    let cache = SampleCache::default();
    let schema = json!({ "type": "integer", "xml": { "name": "count" } });
    let config = SampleConfig::default();

    let first = cache.memoized_create_xml_example(Some(&schema), &config, None);
    let second = cache.memoized_create_xml_example(Some(&schema), &config, None);

    assert_eq!(first, second);
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn test_missing_schema_is_memoized() {
    let cache = SampleCache::default();
    let config = SampleConfig::default();

    assert_eq!(cache.memoized_sample_from_schema(None, &config, None), None);
    assert_eq!(cache.memoized_sample_from_schema(None, &config, None), None);
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn test_lru_eviction() {
    let cache = cache(1);
    let config = SampleConfig::default();
    let a = json!({ "type": "string" });
    let b = json!({ "type": "boolean" });

    cache.memoized_sample_from_schema(Some(&a), &config, None);
    cache.memoized_sample_from_schema(Some(&b), &config, None);
    cache.memoized_sample_from_schema(Some(&a), &config, None);

    let stats = cache.stats();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.capacity, 1);
}

#[test]
fn test_clear() {
    let cache = SampleCache::default();
    let schema = json!({ "type": "number" });
    let config = SampleConfig::default();

    cache.memoized_sample_from_schema(Some(&schema), &config, None);
    cache.clear();
    assert_eq!(cache.stats().entries, 0);

    cache.memoized_sample_from_schema(Some(&schema), &config, None);
    assert_eq!(cache.stats().misses, 2);
}

#[test]
fn test_max_depth_applies() {
    let cache = SampleCache::default().with_max_depth(1);
    let schema = json!({ "properties": { "a": { "properties": { "b": { "type": "string" } } } } });

    assert_eq!(
        cache.memoized_sample_from_schema(Some(&schema), &SampleConfig::default(), None),
        Some(json!({ "a": {} }))
    );
}

#[test]
fn test_shared_across_threads() {
    let cache = std::sync::Arc::new(SampleCache::default());
    let schema = json!({ "type": "array", "items": { "type": "string" } });

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = cache.clone();
            let schema = schema.clone();
            std::thread::spawn(move || {
                cache.sample(Some(&schema), &SampleConfig::default(), None, OutputMode::Json)
            })
        })
        .collect();

    for handle in handles {
        let sample = handle.join().unwrap().and_then(|s| s.into_json());
        assert_eq!(sample, Some(json!(["string"])));
    }
    assert_eq!(cache.stats().entries, 1);
}
