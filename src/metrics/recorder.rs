//! Metrics recording implementation using Prometheus.

use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Trait for recording application metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records a generation request on `route` ("backend" or "proxy") with its outcome.
    fn record_generation(&self, route: &str, result: &str);

    /// Records how long a generation request took end to end.
    fn record_generation_duration(&self, route: &str, duration_secs: f64);

    /// Records a call from the proxy to the upstream backend.
    fn record_upstream_call(&self, result: &str, duration_secs: f64);

    /// Records a voice-sample upload attempt.
    fn record_voice_upload(&self, result: &str);
}

/// Prometheus metrics collector.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    generation_requests_total: CounterVec,
    generation_duration_seconds: HistogramVec,

    upstream_requests_total: CounterVec,
    upstream_duration_seconds: HistogramVec,

    voice_uploads_total: CounterVec,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Creates a new metrics instance with a Prometheus registry.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let generation_requests_total = register_counter_vec_with_registry!(
            Opts::new(
                "generation_requests_total",
                "Total number of video generation requests"
            ),
            &["route", "result"],
            registry.clone()
        )
        .expect("Failed to register generation_requests_total");

        let generation_duration_seconds = register_histogram_vec_with_registry!(
            "generation_duration_seconds",
            "Video generation request duration in seconds",
            &["route"],
            vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0],
            registry.clone()
        )
        .expect("Failed to register generation_duration_seconds");

        let upstream_requests_total = register_counter_vec_with_registry!(
            Opts::new(
                "upstream_requests_total",
                "Total number of requests forwarded to the generation backend"
            ),
            &["result"],
            registry.clone()
        )
        .expect("Failed to register upstream_requests_total");

        let upstream_duration_seconds = register_histogram_vec_with_registry!(
            "upstream_duration_seconds",
            "Generation backend call duration in seconds",
            &["result"],
            vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0],
            registry.clone()
        )
        .expect("Failed to register upstream_duration_seconds");

        let voice_uploads_total = register_counter_vec_with_registry!(
            Opts::new("voice_uploads_total", "Total voice sample uploads"),
            &["result"],
            registry.clone()
        )
        .expect("Failed to register voice_uploads_total");

        Metrics {
            registry,
            generation_requests_total,
            generation_duration_seconds,
            upstream_requests_total,
            upstream_duration_seconds,
            voice_uploads_total,
        }
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

impl MetricsRecorder for Metrics {
    fn record_generation(&self, route: &str, result: &str) {
        self.generation_requests_total
            .with_label_values(&[route, result])
            .inc();
    }

    fn record_generation_duration(&self, route: &str, duration_secs: f64) {
        self.generation_duration_seconds
            .with_label_values(&[route])
            .observe(duration_secs);
    }

    fn record_upstream_call(&self, result: &str, duration_secs: f64) {
        self.upstream_requests_total
            .with_label_values(&[result])
            .inc();
        self.upstream_duration_seconds
            .with_label_values(&[result])
            .observe(duration_secs);
    }

    fn record_voice_upload(&self, result: &str) {
        self.voice_uploads_total.with_label_values(&[result]).inc();
    }
}
