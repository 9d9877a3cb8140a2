//! Query counters for the propagation engine.
//!
//! [`EngineMetrics`] is a point-in-time snapshot. The engine keeps the
//! live values in relaxed atomics so concurrent queries can count
//! without taking the cache lock.

use std::sync::atomic::{AtomicU64, Ordering};

/// Cumulative counters since the engine was built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineMetrics {
    /// Every call to a propagation query.
    pub queries: u64,
    /// Queries answered from the cache.
    pub cache_hits: u64,
    /// Valid queries that had to run a model.
    pub cache_misses: u64,
    /// Cache entries displaced by newer results.
    pub evictions: u64,
    /// Queries answered by the free-space fallback.
    pub fallbacks: u64,
    /// Queries rejected by context validation.
    pub invalid_inputs: u64,
    /// Model evaluations that failed or were unregistered.
    pub model_failures: u64,
}

impl EngineMetrics {
    /// Fraction of valid queries answered from the cache, or `0.0`
    /// before any valid query.
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub(crate) queries: AtomicU64,
    pub(crate) cache_hits: AtomicU64,
    pub(crate) cache_misses: AtomicU64,
    pub(crate) fallbacks: AtomicU64,
    pub(crate) invalid_inputs: AtomicU64,
    pub(crate) model_failures: AtomicU64,
}

impl Counters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, evictions: u64) -> EngineMetrics {
        EngineMetrics {
            queries: self.queries.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            evictions,
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            invalid_inputs: self.invalid_inputs.load(Ordering::Relaxed),
            model_failures: self.model_failures.load(Ordering::Relaxed),
        }
    }
}
