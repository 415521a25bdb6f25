//! Tracking counters.
//!
//! Each tracker owns one [`TrackerMetrics`]; nothing here is global.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Latency histogram in milliseconds.
#[derive(Debug)]
pub struct Histogram {
    /// Buckets: 10ms, 50ms, 100ms, 250ms, 500ms, 1s, 5s, +inf
    buckets: [AtomicU64; 8],
    sum: AtomicU64,
    count: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    const BUCKET_BOUNDS: [u64; 7] = [10, 50, 100, 250, 500, 1000, 5000];

    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        let idx = Self::BUCKET_BOUNDS
            .iter()
            .position(|&bound| ms <= bound)
            .unwrap_or(Self::BUCKET_BOUNDS.len());
        self.buckets[idx].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum.load(Ordering::Relaxed) as f64 / count as f64
        }
    }

    /// Bucket counts keyed by upper bound; `None` is the overflow bucket.
    pub fn buckets(&self) -> Vec<(Option<u64>, u64)> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(i, c)| (Self::BUCKET_BOUNDS.get(i).copied(), c.load(Ordering::Relaxed)))
            .collect()
    }
}

/// Counters for one tracker.
#[derive(Debug, Default)]
pub struct TrackerMetrics {
    /// Calls that reached the dispatch step
    pub events_tracked: Counter,
    pub records_persisted: Counter,
    pub persist_failures: Counter,
    /// Individual pixel hook invocations
    pub pixel_dispatches: Counter,
    /// Events not forwarded because analytics consent was absent
    pub pixel_forwarding_skipped: Counter,
    /// Debounced calls replaced by a later call in the same window
    pub debounce_superseded: Counter,
    pub persist_latency_ms: Histogram,
}

/// A snapshot of tracker metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub events_tracked: u64,
    pub records_persisted: u64,
    pub persist_failures: u64,
    pub pixel_dispatches: u64,
    pub pixel_forwarding_skipped: u64,
    pub debounce_superseded: u64,
    pub persist_latency_mean_ms: f64,
}

impl TrackerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            events_tracked: self.events_tracked.get(),
            records_persisted: self.records_persisted.get(),
            persist_failures: self.persist_failures.get(),
            pixel_dispatches: self.pixel_dispatches.get(),
            pixel_forwarding_skipped: self.pixel_forwarding_skipped.get(),
            debounce_superseded: self.debounce_superseded.get(),
            persist_latency_mean_ms: self.persist_latency_ms.mean(),
        }
    }
}
