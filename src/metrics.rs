//! Prometheus metrics for channel actions.
//!
//! - `chanbind_action_total{action}` - Actions processed by type
//! - `chanbind_action_duration_seconds{action}` - Action latency histogram
//! - `chanbind_action_errors_total{action,error}` - Rejected actions by error code
//! - `chanbind_registered_channels` - Channels in the registry (gauge)
//!
//! Recording before [`init`] is a no-op, so library users that never call it
//! pay nothing.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Actions processed by type (register, add_member, promote, demote).
pub static ACTION_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Action processing latency by type.
pub static ACTION_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Action errors by type and error code.
pub static ACTION_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Channels currently registered.
pub static REGISTERED_CHANNELS: OnceLock<IntGauge> = OnceLock::new();

/// Initialize the metrics registry.
///
/// Safe to call more than once; later calls keep the first set of metrics.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            if $metric.get().is_none() {
                match $init {
                    Ok(m) => {
                        if let Err(e) = r.register(Box::new(m.clone())) {
                            tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                        }
                        let _ = $metric.set(m);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                    }
                }
            }
        };
    }

    register!(ACTION_COUNTER, IntCounterVec::new(Opts::new("chanbind_action_total", "Channel actions processed by type"), &["action"]));
    register!(ACTION_LATENCY, HistogramVec::new(
        HistogramOpts::new("chanbind_action_duration_seconds", "Channel action latency by type")
            .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05]),
        &["action"]));
    register!(ACTION_ERRORS, IntCounterVec::new(Opts::new("chanbind_action_errors_total", "Rejected channel actions by type and error"), &["action", "error"]));
    register!(REGISTERED_CHANNELS, IntGauge::new("chanbind_registered_channels", "Channels in the registry"));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
        String::new()
    })
}

/// Record an action execution with latency.
#[inline]
pub fn record_action(action: &str, duration_secs: f64) {
    if let Some(c) = ACTION_COUNTER.get() {
        c.with_label_values(&[action]).inc();
    }
    if let Some(h) = ACTION_LATENCY.get() {
        h.with_label_values(&[action]).observe(duration_secs);
    }
}

/// Record a rejected or failed action.
#[inline]
pub fn record_action_error(action: &str, error: &str) {
    if let Some(c) = ACTION_ERRORS.get() {
        c.with_label_values(&[action, error]).inc();
    }
}

/// A channel was created.
#[inline]
pub fn inc_registered_channels() {
    if let Some(g) = REGISTERED_CHANNELS.get() {
        g.inc();
    }
}
