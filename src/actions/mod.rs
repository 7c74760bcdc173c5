//! Channel actions: project registration and membership management.
//!
//! Every authorization decision lives here. The service keeps no state of
//! its own; all reads and writes go through the injected [`Registry`], so
//! one `ChannelActions` can be cloned freely across tasks.

mod members;
mod register;

use crate::error::{ActionError, ActionResult};
use crate::metrics;
use crate::registry::{Channel, Registry};
use crate::telemetry::{ActionTimer, spans};
use std::future::Future;
use std::sync::Arc;
use tracing::{Instrument, error, warn};

/// Action names used for spans and metric labels.
pub mod action {
    pub const REGISTER: &str = "register";
    pub const ADD_MEMBER: &str = "add_member";
    pub const PROMOTE: &str = "promote";
    pub const DEMOTE: &str = "demote";
}

/// Authorization service over a channel registry.
#[derive(Clone)]
pub struct ChannelActions {
    registry: Arc<dyn Registry>,
}

impl ChannelActions {
    /// Create a new service backed by `registry`.
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }

    /// The registry this service reads and writes.
    pub fn registry(&self) -> &Arc<dyn Registry> {
        &self.registry
    }

    /// Run one action inside its span, timing it and recording failures.
    async fn run<T, F>(
        &self,
        action: &'static str,
        channel: &str,
        caller: &str,
        fut: F,
    ) -> ActionResult<T>
    where
        F: Future<Output = ActionResult<T>>,
    {
        let _timer = ActionTimer::new(action);
        let span = spans::action(action, channel, caller);
        let result = fut.instrument(span.clone()).await;

        if let Err(e) = &result {
            metrics::record_action_error(action, e.error_code());
            span.in_scope(|| {
                if e.is_recoverable() {
                    warn!(error = %e, code = e.error_code(), "Action rejected");
                } else {
                    error!(error = %e, code = e.error_code(), "Action failed");
                }
            });
        }
        result
    }

    /// Look up a registered channel by name.
    async fn resolve_channel(&self, name: &str) -> ActionResult<Channel> {
        self.registry
            .find_channel_by_name(name)
            .await?
            .ok_or_else(|| ActionError::ChannelNotRegistered(name.to_string()))
    }

    /// Require `caller` to hold admin on `channel`.
    async fn require_admin(&self, channel: &Channel, caller: &str) -> ActionResult<()> {
        if self.registry.is_admin(caller, channel.id).await? {
            Ok(())
        } else {
            Err(ActionError::unauthorized(&channel.name, caller))
        }
    }
}
