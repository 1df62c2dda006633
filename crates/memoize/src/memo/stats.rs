//! Memoizer statistics and metrics tracking
//!
//! Counters for hits, misses, inserts and evictions of a memoized function.
//! They only move when the wrapper was built with `track_metrics`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics for a memoized function
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoStats {
    /// Current number of cached argument lists
    pub size: usize,

    /// Resolved maximum number of cached argument lists
    pub max_size: usize,

    /// Calls answered from the cache
    pub hits: u64,

    /// Calls that invoked the wrapped function
    pub misses: u64,

    /// Results stored after a miss
    pub inserts: u64,

    /// Entries dropped to make room
    ///
    /// A miss evicts before the wrapped function runs, so this also counts
    /// entries dropped for calls that stored nothing: failed calls, and
    /// calls whose result a nested call already stored.
    pub evictions: u64,
}

impl MemoStats {
    /// Calculate hit rate (hits / total calls)
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_calls();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Calculate miss rate (misses / total calls)
    pub fn miss_rate(&self) -> f64 {
        1.0 - self.hit_rate()
    }

    /// Calculate eviction rate (evictions / total calls)
    pub fn eviction_rate(&self) -> f64 {
        let total = self.total_calls();
        if total == 0 {
            0.0
        } else {
            self.evictions as f64 / total as f64
        }
    }

    /// Calculate fill percentage (size / max_size)
    pub fn fill_percentage(&self) -> f64 {
        if self.max_size == 0 {
            0.0
        } else {
            self.size as f64 / self.max_size as f64
        }
    }

    /// Total number of calls (hits + misses)
    pub fn total_calls(&self) -> u64 {
        self.hits + self.misses
    }
}

/// Thread-safe metrics collector for memoized calls
///
/// Clones share the same counters.
#[derive(Debug, Clone, Default)]
pub(crate) struct MetricsCollector {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    inserts: Arc<AtomicU64>,
    evictions: Arc<AtomicU64>,
}

impl MetricsCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_evictions(&self, count: usize) {
        self.evictions.fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Get current statistics snapshot
    pub(crate) fn snapshot(&self, size: usize, max_size: usize) -> MemoStats {
        MemoStats {
            size,
            max_size,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Reset all metrics to zero
    pub(crate) fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.inserts.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }
}
