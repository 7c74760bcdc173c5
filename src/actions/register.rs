//! Project registration: binding a channel to a project.

use super::{ChannelActions, action};
use crate::error::ActionResult;
use crate::metrics;
use crate::registry::{ChannelId, ChannelInsert};
use tracing::{debug, info};

impl ChannelActions {
    /// Bind `channel_name` to `project`.
    ///
    /// A new channel is created with `caller` as its only admin. An existing
    /// channel is rebound in place, which requires `caller` to be one of its
    /// admins. Returns the channel id either way.
    pub async fn register_project(
        &self,
        channel_name: &str,
        project: &str,
        restricted: bool,
        caller: &str,
    ) -> ActionResult<ChannelId> {
        self.run(
            action::REGISTER,
            channel_name,
            caller,
            self.bind_project(channel_name, project, restricted, caller),
        )
        .await
    }

    async fn bind_project(
        &self,
        channel_name: &str,
        project: &str,
        restricted: bool,
        caller: &str,
    ) -> ActionResult<ChannelId> {
        let channel = match self.registry.find_channel_by_name(channel_name).await? {
            Some(channel) => channel,
            None => match self
                .registry
                .register_channel(channel_name, project, restricted, caller)
                .await?
            {
                ChannelInsert::Created(id) => {
                    metrics::inc_registered_channels();
                    info!(id, project = %project, restricted, "Channel registered");
                    return Ok(id);
                }
                // Someone registered the name between our lookup and insert.
                ChannelInsert::Existing(channel) => {
                    debug!(id = channel.id, "Channel registered concurrently, rebinding");
                    channel
                }
            },
        };

        let _guard = self.registry.lock_channel(channel.id).await?;
        self.require_admin(&channel, caller).await?;
        self.registry
            .update_channel_binding(channel.id, project, restricted)
            .await?;

        info!(
            id = channel.id,
            from = %channel.project,
            to = %project,
            restricted,
            "Channel binding updated"
        );
        Ok(channel.id)
    }
}
