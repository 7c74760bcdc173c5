//! Registry wrapper that parks one membership lookup until released.
//!
//! Lets a test stop an action between its checks and its write, then see
//! what other actions on the same channel can do meanwhile.

use async_trait::async_trait;
use chanbind::{
    Channel, ChannelGuard, ChannelId, ChannelInsert, ChannelMembership, MemoryRegistry, Registry,
    RegistryError,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// [`MemoryRegistry`] whose first `find_membership` for one member blocks.
pub struct GatedRegistry {
    inner: MemoryRegistry,
    member: String,
    armed: AtomicBool,
    parked: Notify,
    release: Notify,
}

impl GatedRegistry {
    /// Gate the first `find_membership` lookup of `member`.
    pub fn new(member: &str) -> Self {
        Self {
            inner: MemoryRegistry::new(),
            member: member.to_string(),
            armed: AtomicBool::new(false),
            parked: Notify::new(),
            release: Notify::new(),
        }
    }

    /// Start gating. Setup done before this runs straight through.
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Wait until an action is parked on the gate.
    pub async fn parked(&self) {
        self.parked.notified().await;
    }

    /// Let the parked action continue.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl Registry for GatedRegistry {
    async fn find_channel_by_name(&self, name: &str) -> Result<Option<Channel>, RegistryError> {
        self.inner.find_channel_by_name(name).await
    }

    async fn find_channel_by_id(&self, id: ChannelId) -> Result<Option<Channel>, RegistryError> {
        self.inner.find_channel_by_id(id).await
    }

    async fn create_channel(
        &self,
        name: &str,
        project: &str,
        restricted: bool,
    ) -> Result<ChannelInsert, RegistryError> {
        self.inner.create_channel(name, project, restricted).await
    }

    async fn register_channel(
        &self,
        name: &str,
        project: &str,
        restricted: bool,
        founder: &str,
    ) -> Result<ChannelInsert, RegistryError> {
        self.inner
            .register_channel(name, project, restricted, founder)
            .await
    }

    async fn lock_channel(&self, id: ChannelId) -> Result<ChannelGuard, RegistryError> {
        self.inner.lock_channel(id).await
    }

    async fn update_channel_binding(
        &self,
        id: ChannelId,
        project: &str,
        restricted: bool,
    ) -> Result<(), RegistryError> {
        self.inner.update_channel_binding(id, project, restricted).await
    }

    async fn upsert_membership(
        &self,
        channel_id: ChannelId,
        member: &str,
        is_admin: bool,
    ) -> Result<(), RegistryError> {
        self.inner
            .upsert_membership(channel_id, member, is_admin)
            .await
    }

    async fn find_membership(
        &self,
        channel_id: ChannelId,
        member: &str,
    ) -> Result<Option<ChannelMembership>, RegistryError> {
        let row = self.inner.find_membership(channel_id, member).await?;
        if member == self.member && self.armed.swap(false, Ordering::SeqCst) {
            self.parked.notify_one();
            self.release.notified().await;
        }
        Ok(row)
    }

    async fn list_memberships(
        &self,
        channel_id: ChannelId,
    ) -> Result<Vec<ChannelMembership>, RegistryError> {
        self.inner.list_memberships(channel_id).await
    }

    async fn list_channels(&self) -> Result<Vec<Channel>, RegistryError> {
        self.inner.list_channels().await
    }
}
