// Memoized schema compilation

use crate::{CompileMode, CompilerConfig, all_while_ok, compile};
use conform_core::{Validator, Value};
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

// (schema address, mode); the entry holds the Arc so the address stays live
type CacheKey = (usize, CompileMode);

struct Entry {
    _schema: Arc<Value>,
    validators: Vec<Validator>,
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Compiled schemas currently cached
    pub len: usize,
    pub capacity: usize,
}

/// Schema compiler that memoizes by schema identity.
///
/// Two calls with the same `Arc` (and mode) share one compilation. Equal
/// schemas behind different `Arc`s are compiled separately. Results are
/// identical to the uncached functions.
pub struct SchemaCompiler {
    cache: Option<Mutex<LruCache<CacheKey, Entry>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for SchemaCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaCompiler {
    pub fn new() -> Self {
        Self::with_config(CompilerConfig::default())
    }

    pub fn with_config(config: CompilerConfig) -> Self {
        Self {
            cache: NonZeroUsize::new(config.cache_capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Compile `schema` in `mode`, reusing an earlier compilation if cached.
    pub fn compile(&self, schema: &Arc<Value>, mode: CompileMode) -> Vec<Validator> {
        let Some(cache) = &self.cache else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return compile(schema, mode);
        };

        let key = (Arc::as_ptr(schema) as usize, mode);

        if let Some(entry) = cache.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(mode = %mode, "Schema cache hit");
            return entry.validators.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(mode = %mode, "Schema cache miss");

        // Compile without holding the lock; a racing compile of the same
        // schema produces an equivalent entry
        let validators = compile(schema, mode);
        let entry = Entry {
            _schema: Arc::clone(schema),
            validators: validators.clone(),
        };

        if let Some((evicted, _)) = cache.lock().push(key, entry)
            && evicted != key
        {
            trace!(mode = %evicted.1, "Evicted compiled schema");
        }

        validators
    }

    pub fn from_object_schema(&self, schema: &Arc<Value>) -> Vec<Validator> {
        self.compile(schema, CompileMode::Object)
    }

    pub fn from_object_schema_strict(&self, schema: &Arc<Value>) -> Vec<Validator> {
        self.compile(schema, CompileMode::ObjectStrict)
    }

    pub fn from_array_schema(&self, schema: &Arc<Value>) -> Vec<Validator> {
        self.compile(schema, CompileMode::Array)
    }

    pub fn object_validator(&self, schema: &Arc<Value>) -> Validator {
        all_while_ok(self.from_object_schema_strict(schema))
    }

    pub fn array_validator(&self, schema: &Arc<Value>) -> Validator {
        all_while_ok(self.from_array_schema(schema))
    }

    /// Drop every cached compilation. Counters are kept.
    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    pub fn stats(&self) -> CacheStats {
        let (len, capacity) = match &self.cache {
            Some(cache) => {
                let cache = cache.lock();
                (cache.len(), cache.cap().get())
            }
            None => (0, 0),
        };

        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len,
            capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conform_core::get_errors;
    use serde_json::json;

    fn schema(json: serde_json::Value) -> Arc<Value> {
        Arc::new(Value::from(json))
    }

    #[test]
    fn test_same_arc_hits() {
        let compiler = SchemaCompiler::new();
        let s = schema(json!({ "a": { "required": true } }));

        let first = compiler.from_object_schema(&s);
        let second = compiler.from_object_schema(&s);

        assert_eq!(first.len(), second.len());
        assert!(first.iter().zip(&second).all(|(a, b)| a.ptr_eq(b)));

        let stats = compiler.stats();
        assert_eq!((stats.hits, stats.misses, stats.len), (1, 1, 1));
    }

    #[test]
    fn test_modes_are_cached_separately() {
        let compiler = SchemaCompiler::new();
        let s = schema(json!({ "a": {} }));

        assert_eq!(compiler.from_object_schema(&s).len(), 4);
        assert_eq!(compiler.from_object_schema_strict(&s).len(), 5);
        assert_eq!(compiler.stats().misses, 2);
    }

    #[test]
    fn test_equal_schemas_in_different_arcs_miss() {
        let compiler = SchemaCompiler::new();
        compiler.from_array_schema(&schema(json!({ "type": "string" })));
        compiler.from_array_schema(&schema(json!({ "type": "string" })));
        assert_eq!(compiler.stats().hits, 0);
    }

    #[test]
    fn test_eviction() {
        let compiler = SchemaCompiler::with_config(CompilerConfig::new().with_cache_capacity(1));
        let a = schema(json!({}));
        let b = schema(json!({}));

        compiler.from_object_schema(&a);
        compiler.from_object_schema(&b);
        compiler.from_object_schema(&a);

        let stats = compiler.stats();
        assert_eq!((stats.hits, stats.misses, stats.len, stats.capacity), (0, 3, 1, 1));
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        let compiler = SchemaCompiler::with_config(CompilerConfig::new().with_cache_capacity(0));
        let s = schema(json!({}));
        compiler.from_object_schema(&s);
        compiler.from_object_schema(&s);

        let stats = compiler.stats();
        assert_eq!((stats.hits, stats.misses, stats.len, stats.capacity), (0, 2, 0, 0));
    }

    #[test]
    fn test_cached_results_match_uncached() {
        let compiler = SchemaCompiler::new();
        let s = schema(json!({ "field1": { "required": true, "type": "string" } }));
        let data = Value::from(json!({ "field1": 3, "extra": true }));

        let direct = crate::object_validator(&s).validate(&data);
        for _ in 0..2 {
            assert_eq!(compiler.object_validator(&s).validate(&data), direct);
        }
        assert_eq!(
            get_errors(&direct),
            vec!["At field \"field1\": 3 failed to typecheck (expected string)"]
        );
    }

    #[test]
    fn test_clear() {
        let compiler = SchemaCompiler::new();
        let s = schema(json!({}));
        compiler.from_object_schema(&s);
        compiler.clear();
        compiler.from_object_schema(&s);

        let stats = compiler.stats();
        assert_eq!((stats.misses, stats.len), (2, 1));
    }

    #[test]
    fn test_shared_across_threads() {
        let compiler = Arc::new(SchemaCompiler::new());
        let s = schema(json!({ "n": { "type": "number" } }));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let compiler = Arc::clone(&compiler);
                let s = Arc::clone(&s);
                std::thread::spawn(move || {
                    let data = Value::from(json!({ "n": i }));
                    compiler.object_validator(&s).validate(&data).is_ok()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        let stats = compiler.stats();
        assert_eq!(stats.hits + stats.misses, 4);
    }
}
