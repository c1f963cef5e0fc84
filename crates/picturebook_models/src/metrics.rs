//! Metrics for generative provider calls.
//!
//! Provides OpenTelemetry-based metrics for tracking provider latency,
//! failures and fallbacks across the text, image and speech chains.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<ProviderMetrics> = OnceLock::new();

/// Metrics for provider interactions.
///
/// Labeled with the provider name (openrouter, replicate, ...) and, for
/// failures, the error class reported by
/// [`picturebook_error::ProviderErrorKind::class`].
#[derive(Clone)]
pub struct ProviderMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total provider HTTP requests
    pub requests: Counter<u64>,
    /// Failed provider requests
    pub failures: Counter<u64>,
    /// Provider call duration in seconds
    pub duration: Histogram<f64>,
    /// Times a chain moved past a failed provider
    pub fallbacks: Counter<u64>,
}

impl ProviderMetrics {
    fn init() -> Self {
        let meter = global::meter("picturebook_providers");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("provider.requests")
                .with_description("Total provider requests")
                .build(),
            failures: meter
                .u64_counter("provider.failures")
                .with_description("Failed provider requests")
                .build(),
            duration: meter
                .f64_histogram("provider.duration")
                .with_unit("seconds")
                .with_description("Provider call duration")
                .build(),
            fallbacks: meter
                .u64_counter("provider.fallbacks")
                .with_description("Fallbacks past a failed provider")
                .build(),
        }
    }

    /// Get the global provider metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a completed request, successful or not.
    pub fn record_request(&self, provider: &str, duration_secs: f64) {
        let labels = &[KeyValue::new("provider", provider.to_string())];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed request.
    pub fn record_failure(&self, provider: &str, error_class: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("error_class", error_class.to_string()),
        ];
        self.failures.add(1, labels);
    }

    /// Record that `stage` gave up on `provider` and moved on.
    pub fn record_fallback(&self, stage: &str, provider: &str) {
        let labels = &[
            KeyValue::new("stage", stage.to_string()),
            KeyValue::new("provider", provider.to_string()),
        ];
        self.fallbacks.add(1, labels);
    }
}

impl Default for ProviderMetrics {
    fn default() -> Self {
        Self::get().clone()
    }
}
