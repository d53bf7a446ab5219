// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic read-through cache keyed by `(context, size, name)`.
//!
//! Entries are computed on first miss under the write lock and never change
//! afterwards. A computation that finds nothing is stored too, so a failed
//! lookup is not repeated.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use lvfs_core::Context;
use parking_lot::RwLock;
use tracing::trace;

/// Composite cache key. Orders by context, then size, then name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheIndex {
    context: Context,
    size: u32,
    name: String,
}

impl CacheIndex {
    pub fn new(name: impl Into<String>, size: u32, context: Context) -> Self {
        Self {
            context,
            size,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn context(&self) -> Context {
        self.context
    }
}

/// Hit and miss counters of a [`Cache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Concurrent memoizing store.
///
/// `None` values are negative results: looked up, found nothing.
pub struct Cache<V> {
    entries: RwLock<BTreeMap<CacheIndex, Option<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> Cache<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Reads `index` under the shared lock.
    ///
    /// The outer `None` means the key was never populated; `Some(None)` is a
    /// cached negative result.
    pub fn lookup(&self, index: &CacheIndex) -> Option<Option<V>> {
        self.entries.read().get(index).cloned()
    }

    /// Returns the cached value for `index`, running `compute` on the first miss.
    ///
    /// `compute` runs at most once per key, even under concurrent first access,
    /// and runs with the write lock held: it must not call back into this cache.
    pub fn populate<F>(&self, index: CacheIndex, compute: F) -> Option<V>
    where
        F: FnOnce() -> Option<V>,
    {
        if let Some(value) = self.lookup(&index) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(name = %index.name, size = index.size, context = %index.context, "cache hit");
            return value;
        }

        let mut entries = self.entries.write();
        // Another thread may have filled the slot between the two locks.
        if let Some(value) = entries.get(&index) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return value.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute();
        trace!(
            name = %index.name,
            size = index.size,
            context = %index.context,
            found = value.is_some(),
            "cache miss"
        );
        entries.insert(index, value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<V: Clone> Default for Cache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("entries", &self.entries.read().len())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    use super::*;

    fn index(name: &str) -> CacheIndex {
        CacheIndex::new(name, 16, Context::MimeTypes)
    }

    #[test]
    fn populate_computes_once_and_caches() {
        let cache = Cache::new();
        let calls = AtomicUsize::new(0);
        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Some(7)
        };

        assert_eq!(cache.populate(index("a"), compute), Some(7));
        assert_eq!(cache.populate(index("a"), compute), Some(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn negative_results_are_cached() {
        let cache: Cache<u32> = Cache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache.populate(index("missing"), || {
                calls.fetch_add(1, Ordering::SeqCst);
                None
            });
            assert_eq!(value, None);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.lookup(&index("missing")), Some(None));
        assert_eq!(cache.lookup(&index("other")), None);
    }

    #[test]
    fn concurrent_first_access_computes_once() {
        const THREADS: usize = 8;
        let cache = Arc::new(Cache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let (cache, calls, barrier) =
                    (Arc::clone(&cache), Arc::clone(&calls), Arc::clone(&barrier));
                thread::spawn(move || {
                    barrier.wait();
                    cache.populate(index("shared"), || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(20));
                        Some("value".to_string())
                    })
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().as_deref(), Some("value"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_order_by_context_size_then_name() {
        let a = CacheIndex::new("zzz", 16, Context::Actions);
        let b = CacheIndex::new("aaa", 16, Context::Devices);
        let c = CacheIndex::new("aaa", 32, Context::Devices);
        let d = CacheIndex::new("bbb", 32, Context::Devices);
        assert!(a < b);
        assert!(b < c);
        assert!(c < d);
    }

    #[test]
    fn distinct_sizes_are_distinct_keys() {
        let cache = Cache::new();
        cache.populate(CacheIndex::new("x", 16, Context::Status), || Some(16));
        cache.populate(CacheIndex::new("x", 32, Context::Status), || Some(32));
        assert_eq!(cache.lookup(&CacheIndex::new("x", 16, Context::Status)), Some(Some(16)));
        assert_eq!(cache.lookup(&CacheIndex::new("x", 32, Context::Status)), Some(Some(32)));
    }
}
