//! Basic metrics instrumentation for tracking performance.
//!
//! Provides counters and duration tracking for HTTP requests, identity
//! operations and the profile cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector for tracking identity API usage.
///
/// Clones share the same counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    profiles_fetched_total: Arc<AtomicU64>,

    /// Phone and email registrations accepted by the server
    registrations_total: Arc<AtomicU64>,

    codes_sent_total: Arc<AtomicU64>,

    /// Confirmations the server accepted
    codes_confirmed_total: Arc<AtomicU64>,

    /// Confirmations the server answered with `confirmed: false`
    codes_rejected_total: Arc<AtomicU64>,

    cache_hits_total: Arc<AtomicU64>,
    cache_misses_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            profiles_fetched_total: Arc::new(AtomicU64::new(0)),
            registrations_total: Arc::new(AtomicU64::new(0)),
            codes_sent_total: Arc::new(AtomicU64::new(0)),
            codes_confirmed_total: Arc::new(AtomicU64::new(0)),
            codes_rejected_total: Arc::new(AtomicU64::new(0)),
            cache_hits_total: Arc::new(AtomicU64::new(0)),
            cache_misses_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_profile_fetched(&self) {
        self.profiles_fetched_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_registration(&self) {
        self.registrations_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_code_sent(&self) {
        self.codes_sent_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of a code confirmation.
    pub fn record_code_confirmation(&self, confirmed: bool) {
        if confirmed {
            self.codes_confirmed_total.fetch_add(1, Ordering::Relaxed);
        } else {
            self.codes_rejected_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a profile cache lookup.
    pub fn record_cache_access(&self, hit: bool) {
        if hit {
            self.cache_hits_total.fetch_add(1, Ordering::Relaxed);
        } else {
            self.cache_misses_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn profiles_fetched_total(&self) -> u64 {
        self.profiles_fetched_total.load(Ordering::Relaxed)
    }

    pub fn registrations_total(&self) -> u64 {
        self.registrations_total.load(Ordering::Relaxed)
    }

    pub fn codes_sent_total(&self) -> u64 {
        self.codes_sent_total.load(Ordering::Relaxed)
    }

    pub fn codes_confirmed_total(&self) -> u64 {
        self.codes_confirmed_total.load(Ordering::Relaxed)
    }

    pub fn codes_rejected_total(&self) -> u64 {
        self.codes_rejected_total.load(Ordering::Relaxed)
    }

    pub fn cache_hits_total(&self) -> u64 {
        self.cache_hits_total.load(Ordering::Relaxed)
    }

    pub fn cache_misses_total(&self) -> u64 {
        self.cache_misses_total.load(Ordering::Relaxed)
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        for counter in [
            &self.http_requests_total,
            &self.http_errors_total,
            &self.http_duration_total_ms,
            &self.profiles_fetched_total,
            &self.registrations_total,
            &self.codes_sent_total,
            &self.codes_confirmed_total,
            &self.codes_rejected_total,
            &self.cache_hits_total,
            &self.cache_misses_total,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            profiles_fetched_total: self.profiles_fetched_total(),
            registrations_total: self.registrations_total(),
            codes_sent_total: self.codes_sent_total(),
            codes_confirmed_total: self.codes_confirmed_total(),
            codes_rejected_total: self.codes_rejected_total(),
            cache_hits_total: self.cache_hits_total(),
            cache_misses_total: self.cache_misses_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub profiles_fetched_total: u64,
    pub registrations_total: u64,
    pub codes_sent_total: u64,
    pub codes_confirmed_total: u64,
    pub codes_rejected_total: u64,
    pub cache_hits_total: u64,
    pub cache_misses_total: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        self.metrics.record_http_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.http_requests_total(), 0);
        assert_eq!(metrics.http_errors_total(), 0);
        assert_eq!(metrics.http_duration_total_ms(), 0);
        assert_eq!(metrics.http_duration_avg_ms(), 0.0);
    }

    #[test]
    fn test_average_duration() {
        let metrics = Metrics::new();
        metrics.record_http_request(Duration::from_millis(100));
        metrics.record_http_request(Duration::from_millis(200));
        assert_eq!(metrics.http_requests_total(), 2);
        assert_eq!(metrics.http_duration_total_ms(), 300);
        assert_eq!(metrics.http_duration_avg_ms(), 150.0);
    }

    #[test]
    fn test_code_confirmation_outcomes() {
        let metrics = Metrics::new();
        metrics.record_code_confirmation(true);
        metrics.record_code_confirmation(false);
        metrics.record_code_confirmation(false);
        assert_eq!(metrics.codes_confirmed_total(), 1);
        assert_eq!(metrics.codes_rejected_total(), 2);
    }

    #[test]
    fn test_cache_access() {
        let metrics = Metrics::new();
        metrics.record_cache_access(true);
        metrics.record_cache_access(false);
        metrics.record_cache_access(true);
        assert_eq!(metrics.cache_hits_total(), 2);
        assert_eq!(metrics.cache_misses_total(), 1);
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();
        metrics.record_http_request(Duration::from_millis(100));
        metrics.record_http_error();
        metrics.record_registration();
        metrics.record_code_sent();
        metrics.record_profile_fetched();

        metrics.reset();

        let summary = metrics.summary();
        assert_eq!(summary.http_requests_total, 0);
        assert_eq!(summary.http_errors_total, 0);
        assert_eq!(summary.registrations_total, 0);
        assert_eq!(summary.codes_sent_total, 0);
        assert_eq!(summary.profiles_fetched_total, 0);
    }

    #[test]
    fn test_summary() {
        let metrics = Metrics::new();
        metrics.record_http_request(Duration::from_millis(100));
        metrics.record_http_error();
        metrics.record_registration();
        metrics.record_code_sent();

        let summary = metrics.summary();
        assert_eq!(summary.http_requests_total, 1);
        assert_eq!(summary.http_errors_total, 1);
        assert_eq!(summary.http_duration_avg_ms, 100.0);
        assert_eq!(summary.registrations_total, 1);
        assert_eq!(summary.codes_sent_total, 1);
    }

    #[test]
    fn test_http_timer_with_error() {
        let metrics = Metrics::new();
        let timer = HttpTimer::new(metrics.clone());
        timer.complete_with_error();

        assert_eq!(metrics.http_requests_total(), 1);
        assert_eq!(metrics.http_errors_total(), 1);
    }

    #[test]
    fn test_concurrent_access() {
        let metrics = Metrics::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let metrics = metrics.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        metrics.record_code_sent();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.codes_sent_total(), 200);
    }
}
