//! Registry wrapper that records calls before forwarding them.

use async_trait::async_trait;
use chanbind::{
    Channel, ChannelGuard, ChannelId, ChannelInsert, ChannelMembership, MemoryRegistry, Registry,
    RegistryError,
};
use parking_lot::Mutex;

/// One registry call, with the arguments that identify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FindChannelByName(String),
    FindChannelById(ChannelId),
    ChannelExists(String),
    CreateChannel(String),
    RegisterChannel { name: String, founder: String },
    LockChannel(ChannelId),
    UpdateChannelBinding { id: ChannelId, project: String, restricted: bool },
    UpsertMembership { id: ChannelId, member: String, is_admin: bool },
    FindMembership(ChannelId, String),
    IsAdmin(String, ChannelId),
    ListMemberships(ChannelId),
    ListChannels,
}

impl Call {
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Call::CreateChannel(_)
                | Call::RegisterChannel { .. }
                | Call::UpdateChannelBinding { .. }
                | Call::UpsertMembership { .. }
        )
    }
}

/// [`MemoryRegistry`] that remembers every call made to it.
#[derive(Default)]
pub struct RecordingRegistry {
    inner: MemoryRegistry,
    calls: Mutex<Vec<Call>>,
}

impl RecordingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    /// Every call so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Only the calls that can change state.
    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    /// Forget recorded calls, keeping the stored data.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait]
impl Registry for RecordingRegistry {
    async fn find_channel_by_name(&self, name: &str) -> Result<Option<Channel>, RegistryError> {
        self.record(Call::FindChannelByName(name.to_string()));
        self.inner.find_channel_by_name(name).await
    }

    async fn find_channel_by_id(&self, id: ChannelId) -> Result<Option<Channel>, RegistryError> {
        self.record(Call::FindChannelById(id));
        self.inner.find_channel_by_id(id).await
    }

    async fn channel_exists(&self, name: &str) -> Result<bool, RegistryError> {
        self.record(Call::ChannelExists(name.to_string()));
        self.inner.channel_exists(name).await
    }

    async fn create_channel(
        &self,
        name: &str,
        project: &str,
        restricted: bool,
    ) -> Result<ChannelInsert, RegistryError> {
        self.record(Call::CreateChannel(name.to_string()));
        self.inner.create_channel(name, project, restricted).await
    }

    async fn register_channel(
        &self,
        name: &str,
        project: &str,
        restricted: bool,
        founder: &str,
    ) -> Result<ChannelInsert, RegistryError> {
        self.record(Call::RegisterChannel {
            name: name.to_string(),
            founder: founder.to_string(),
        });
        self.inner
            .register_channel(name, project, restricted, founder)
            .await
    }

    async fn lock_channel(&self, id: ChannelId) -> Result<ChannelGuard, RegistryError> {
        self.record(Call::LockChannel(id));
        self.inner.lock_channel(id).await
    }

    async fn update_channel_binding(
        &self,
        id: ChannelId,
        project: &str,
        restricted: bool,
    ) -> Result<(), RegistryError> {
        self.record(Call::UpdateChannelBinding {
            id,
            project: project.to_string(),
            restricted,
        });
        self.inner.update_channel_binding(id, project, restricted).await
    }

    async fn upsert_membership(
        &self,
        channel_id: ChannelId,
        member: &str,
        is_admin: bool,
    ) -> Result<(), RegistryError> {
        self.record(Call::UpsertMembership {
            id: channel_id,
            member: member.to_string(),
            is_admin,
        });
        self.inner
            .upsert_membership(channel_id, member, is_admin)
            .await
    }

    async fn find_membership(
        &self,
        channel_id: ChannelId,
        member: &str,
    ) -> Result<Option<ChannelMembership>, RegistryError> {
        self.record(Call::FindMembership(channel_id, member.to_string()));
        self.inner.find_membership(channel_id, member).await
    }

    async fn is_admin(&self, member: &str, channel_id: ChannelId) -> Result<bool, RegistryError> {
        self.record(Call::IsAdmin(member.to_string(), channel_id));
        self.inner.is_admin(member, channel_id).await
    }

    async fn list_memberships(
        &self,
        channel_id: ChannelId,
    ) -> Result<Vec<ChannelMembership>, RegistryError> {
        self.record(Call::ListMemberships(channel_id));
        self.inner.list_memberships(channel_id).await
    }

    async fn list_channels(&self) -> Result<Vec<Channel>, RegistryError> {
        self.record(Call::ListChannels);
        self.inner.list_channels().await
    }
}
