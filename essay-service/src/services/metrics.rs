//! Prometheus metrics for essay-service.
//!
//! Provides HTTP outcome and AI provider metrics for observability.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

/// Registry and every metric registered in it.
///
/// Stored behind a single `OnceLock` so counters and the exported registry
/// always come from the same initialization.
pub struct Metrics {
    pub registry: Registry,

    // HTTP metrics
    pub essay_requests_total: IntCounterVec,

    // AI-specific metrics
    pub genai_tokens_total: IntCounterVec,
    pub genai_provider_latency_seconds: HistogramVec,
    pub genai_provider_errors_total: IntCounterVec,
}

pub static METRICS: OnceLock<Metrics> = OnceLock::new();

impl Metrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        // Essay endpoint outcome counter
        let essay_requests = IntCounterVec::new(
            Opts::new("essay_requests_total", "Total essay check requests"),
            &["status"],
        )?;

        // Token counter (input/output by model)
        let genai_tokens = IntCounterVec::new(
            Opts::new("genai_tokens_total", "Total tokens processed"),
            &["model", "type"], // type: input, output
        )?;

        // Provider latency histogram
        let provider_latency = HistogramVec::new(
            HistogramOpts::new(
                "genai_provider_latency_seconds",
                "AI provider API latency in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
            &["provider", "model"],
        )?;

        // Provider error counter
        let provider_errors = IntCounterVec::new(
            Opts::new("genai_provider_errors_total", "Total AI provider errors"),
            &["provider", "error_type"],
        )?;

        registry.register(Box::new(essay_requests.clone()))?;
        registry.register(Box::new(genai_tokens.clone()))?;
        registry.register(Box::new(provider_latency.clone()))?;
        registry.register(Box::new(provider_errors.clone()))?;

        Ok(Self {
            registry,
            essay_requests_total: essay_requests,
            genai_tokens_total: genai_tokens,
            genai_provider_latency_seconds: provider_latency,
            genai_provider_errors_total: provider_errors,
        })
    }
}

/// Initialize all metrics. Call once at startup; later calls are ignored.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    if METRICS.get().is_some() {
        return Ok(());
    }

    // A concurrent caller may win the race; its set is kept whole and ours dropped
    if METRICS.set(Metrics::new()?).is_ok() {
        tracing::info!("Prometheus metrics initialized");
    }
    Ok(())
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match METRICS.get() {
        Some(m) => &m.registry,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

// Helper functions for recording metrics

/// Record the HTTP outcome of an essay check.
pub fn record_essay_request(status: u16) {
    if let Some(m) = METRICS.get() {
        let status = status.to_string();
        m.essay_requests_total
            .with_label_values(&[status.as_str()])
            .inc();
    }
}

/// Record token usage.
pub fn record_tokens(model: &str, input_tokens: i32, output_tokens: i32) {
    if let Some(m) = METRICS.get() {
        m.genai_tokens_total
            .with_label_values(&[model, "input"])
            .inc_by(input_tokens.max(0) as u64);
        m.genai_tokens_total
            .with_label_values(&[model, "output"])
            .inc_by(output_tokens.max(0) as u64);
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(m) = METRICS.get() {
        m.genai_provider_latency_seconds
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(m) = METRICS.get() {
        m.genai_provider_errors_total
            .with_label_values(&[provider, error_type])
            .inc();
    }
}
