//! In-memory registry backed by `DashMap`.
//!
//! Map lock order is `names`, `channels`, `memberships`. Only channel
//! creation holds more than one shard guard; every other path takes one at a
//! time and clones out of it, so no shard guard outlives the call or crosses
//! an `.await`.
//!
//! Per-channel action locks live in `locks` and are taken before any of the
//! maps above. They are the only guards held across an `.await`.

use super::{
    Channel, ChannelGuard, ChannelId, ChannelInsert, ChannelMembership, MemberId, Registry,
    RegistryError,
};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

/// First channel id handed out by a fresh registry.
const FIRST_CHANNEL_ID: ChannelId = 1;

/// Registry that lives for the lifetime of the process.
pub struct MemoryRegistry {
    /// Channel name -> id. The entry lock on a name is the creation mutex.
    names: DashMap<String, ChannelId>,
    channels: DashMap<ChannelId, Channel>,
    /// Memberships grouped per channel so one channel's rows share a shard lock.
    memberships: DashMap<ChannelId, HashMap<MemberId, ChannelMembership>>,
    /// One action lock per channel, created on first use.
    locks: DashMap<ChannelId, Arc<Mutex<()>>>,
    next_id: AtomicI64,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self {
            names: DashMap::new(),
            channels: DashMap::new(),
            memberships: DashMap::new(),
            locks: DashMap::new(),
            next_id: AtomicI64::new(FIRST_CHANNEL_ID),
        }
    }

    /// Number of registered channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Name-keyed insert. The `names` entry guard is held until the channel
    /// and its founder row are both stored, so a concurrent lookup of the
    /// name sees either nothing or the complete channel.
    fn insert_channel(
        &self,
        name: &str,
        project: &str,
        restricted: bool,
        founder: Option<&str>,
    ) -> Result<ChannelInsert, RegistryError> {
        match self.names.entry(name.to_string()) {
            Entry::Occupied(entry) => {
                let id = *entry.get();
                let channel = self
                    .channels
                    .get(&id)
                    .map(|r| r.value().clone())
                    .ok_or_else(|| {
                        RegistryError::Internal(format!(
                            "channel name {name} maps to missing id {id}"
                        ))
                    })?;
                Ok(ChannelInsert::Existing(channel))
            }
            Entry::Vacant(entry) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let now = chrono::Utc::now().timestamp();
                self.channels.insert(
                    id,
                    Channel {
                        id,
                        name: name.to_string(),
                        project: project.to_string(),
                        restricted,
                        registered_at: now,
                        updated_at: now,
                    },
                );
                if let Some(founder) = founder {
                    let row = ChannelMembership {
                        channel_id: id,
                        member: founder.to_string(),
                        is_admin: true,
                        added_at: now,
                        updated_at: now,
                    };
                    self.memberships
                        .insert(id, HashMap::from([(founder.to_string(), row)]));
                }
                entry.insert(id);
                debug!(channel = %name, id, founder = ?founder, "Channel record created");
                Ok(ChannelInsert::Created(id))
            }
        }
    }
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Registry for MemoryRegistry {
    async fn find_channel_by_name(&self, name: &str) -> Result<Option<Channel>, RegistryError> {
        let Some(id) = self.names.get(name).map(|r| *r.value()) else {
            return Ok(None);
        };
        self.find_channel_by_id(id).await
    }

    async fn find_channel_by_id(&self, id: ChannelId) -> Result<Option<Channel>, RegistryError> {
        Ok(self.channels.get(&id).map(|r| r.value().clone()))
    }

    async fn channel_exists(&self, name: &str) -> Result<bool, RegistryError> {
        Ok(self.names.contains_key(name))
    }

    async fn create_channel(
        &self,
        name: &str,
        project: &str,
        restricted: bool,
    ) -> Result<ChannelInsert, RegistryError> {
        self.insert_channel(name, project, restricted, None)
    }

    async fn register_channel(
        &self,
        name: &str,
        project: &str,
        restricted: bool,
        founder: &str,
    ) -> Result<ChannelInsert, RegistryError> {
        self.insert_channel(name, project, restricted, Some(founder))
    }

    async fn lock_channel(&self, id: ChannelId) -> Result<ChannelGuard, RegistryError> {
        if !self.channels.contains_key(&id) {
            return Err(RegistryError::ChannelNotFound(id));
        }
        // Clone the Arc out so the shard guard is gone before we wait.
        let lock = Arc::clone(&self.locks.entry(id).or_default());
        Ok(lock.lock_owned().await)
    }

    async fn update_channel_binding(
        &self,
        id: ChannelId,
        project: &str,
        restricted: bool,
    ) -> Result<(), RegistryError> {
        let mut channel = self
            .channels
            .get_mut(&id)
            .ok_or(RegistryError::ChannelNotFound(id))?;
        channel.project = project.to_string();
        channel.restricted = restricted;
        channel.updated_at = chrono::Utc::now().timestamp();
        Ok(())
    }

    async fn upsert_membership(
        &self,
        channel_id: ChannelId,
        member: &str,
        is_admin: bool,
    ) -> Result<(), RegistryError> {
        if !self.channels.contains_key(&channel_id) {
            return Err(RegistryError::ChannelNotFound(channel_id));
        }

        let now = chrono::Utc::now().timestamp();
        let mut rows = self.memberships.entry(channel_id).or_default();
        rows.entry(member.to_string())
            .and_modify(|row| {
                row.is_admin = is_admin;
                row.updated_at = now;
            })
            .or_insert_with(|| ChannelMembership {
                channel_id,
                member: member.to_string(),
                is_admin,
                added_at: now,
                updated_at: now,
            });
        Ok(())
    }

    async fn find_membership(
        &self,
        channel_id: ChannelId,
        member: &str,
    ) -> Result<Option<ChannelMembership>, RegistryError> {
        Ok(self
            .memberships
            .get(&channel_id)
            .and_then(|rows| rows.get(member).cloned()))
    }

    async fn list_memberships(
        &self,
        channel_id: ChannelId,
    ) -> Result<Vec<ChannelMembership>, RegistryError> {
        let mut rows: Vec<ChannelMembership> = self
            .memberships
            .get(&channel_id)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default();
        rows.sort_by(|a, b| a.member.cmp(&b.member));
        Ok(rows)
    }

    async fn list_channels(&self) -> Result<Vec<Channel>, RegistryError> {
        let mut channels: Vec<Channel> = self.channels.iter().map(|r| r.value().clone()).collect();
        channels.sort_by_key(|c| c.id);
        Ok(channels)
    }
}
