//! Telemetry utilities for action timing and tracing setup.

use crate::config::{LogFormat, LoggingConfig};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Guard for timing an action and recording metrics.
///
/// Records action latency when dropped.
pub struct ActionTimer {
    action: &'static str,
    start: Instant,
}

impl ActionTimer {
    /// Start timing an action.
    pub fn new(action: &'static str) -> Self {
        Self {
            action,
            start: Instant::now(),
        }
    }
}

impl Drop for ActionTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_action(self.action, duration);
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter when set.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for a channel action.
    pub fn action(name: &'static str, channel: &str, caller: &str) -> Span {
        info_span!("action", name = name, channel = %channel, caller = %caller)
    }

    /// Create a span for applying a configured seed binding.
    pub fn seed(channel: &str) -> Span {
        info_span!("seed", channel = %channel)
    }
}
