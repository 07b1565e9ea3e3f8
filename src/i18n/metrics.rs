//! Translation metrics and observability module.
//!
//! Process-wide counters for key lookups and dictionary loads, reported
//! through the health endpoint.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global translation metrics singleton.
#[derive(Debug)]
pub struct TranslationMetrics {
    /// Keys that resolved against the loaded dictionary
    key_hits: AtomicUsize,

    /// Keys that fell back to the key itself
    key_misses: AtomicUsize,

    /// Dictionary resources read from disk
    dictionary_loads: AtomicUsize,

    /// Loads that ended on the default language or on an empty dictionary
    dictionary_fallbacks: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<TranslationMetrics> = OnceLock::new();

impl TranslationMetrics {
    /// Get the global translation metrics instance.
    pub fn global() -> &'static TranslationMetrics {
        METRICS.get_or_init(TranslationMetrics::new)
    }

    fn new() -> Self {
        TranslationMetrics {
            key_hits: AtomicUsize::new(0),
            key_misses: AtomicUsize::new(0),
            dictionary_loads: AtomicUsize::new(0),
            dictionary_fallbacks: AtomicUsize::new(0),
        }
    }

    pub fn record_key_hit(&self) {
        self.key_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_key_miss(&self) {
        self.key_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dictionary_load(&self) {
        self.dictionary_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dictionary_fallback(&self) {
        self.dictionary_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn key_hits(&self) -> usize {
        self.key_hits.load(Ordering::Relaxed)
    }

    pub fn key_misses(&self) -> usize {
        self.key_misses.load(Ordering::Relaxed)
    }

    pub fn dictionary_loads(&self) -> usize {
        self.dictionary_loads.load(Ordering::Relaxed)
    }

    pub fn dictionary_fallbacks(&self) -> usize {
        self.dictionary_fallbacks.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.key_hits();
        let misses = self.key_misses();
        let total_lookups = hits + misses;
        let key_hit_rate = if total_lookups > 0 {
            (hits as f64 / total_lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            key_hits: hits,
            key_misses: misses,
            key_hit_rate,
            dictionary_loads: self.dictionary_loads(),
            dictionary_fallbacks: self.dictionary_fallbacks(),
        }
    }
}

/// Snapshot of the translation counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub key_hits: usize,
    pub key_misses: usize,

    /// Hit rate as a percentage (0-100)
    pub key_hit_rate: f64,

    pub dictionary_loads: usize,
    pub dictionary_fallbacks: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global instance is shared with every other test in the crate, so
    // counting tests use their own instance.

    #[test]
    fn test_global_returns_singleton() {
        let m1 = TranslationMetrics::global();
        let m2 = TranslationMetrics::global();
        assert!(std::ptr::eq(m1, m2));
    }

    #[test]
    fn test_record_counters() {
        let metrics = TranslationMetrics::new();

        metrics.record_key_hit();
        metrics.record_key_hit();
        metrics.record_key_miss();
        metrics.record_dictionary_load();
        metrics.record_dictionary_fallback();

        assert_eq!(metrics.key_hits(), 2);
        assert_eq!(metrics.key_misses(), 1);
        assert_eq!(metrics.dictionary_loads(), 1);
        assert_eq!(metrics.dictionary_fallbacks(), 1);
    }

    #[test]
    fn test_report_hit_rate() {
        let metrics = TranslationMetrics::new();

        for _ in 0..3 {
            metrics.record_key_hit();
        }
        metrics.record_key_miss();

        let report = metrics.report();
        assert_eq!(report.key_hits, 3);
        assert_eq!(report.key_misses, 1);
        assert!((report.key_hit_rate - 75.0).abs() < 0.01);
    }

    #[test]
    fn test_report_with_no_lookups() {
        let report = TranslationMetrics::new().report();
        assert_eq!(report.key_hit_rate, 0.0);
        assert_eq!(report.dictionary_loads, 0);
    }

    #[test]
    fn test_report_serialization() {
        let metrics = TranslationMetrics::new();
        metrics.record_key_hit();

        let json = serde_json::to_string(&metrics.report()).expect("Should serialize");
        assert!(json.contains("\"key_hits\":1"));
        assert!(json.contains("\"key_hit_rate\":100.0"));
        assert!(json.contains("\"dictionary_fallbacks\":0"));
    }
}
