//! Channel registry: channel bindings and per-channel memberships.
//!
//! The registry is a plain data store. It allocates channel ids, enforces
//! name uniqueness and the one-row-per-(channel, member) rule, and makes no
//! authorization decisions. Those live in [`crate::actions`].
//!
//! Backing stores implement [`Registry`]; [`MemoryRegistry`] is the default.

mod memory;
mod models;

pub use memory::MemoryRegistry;
pub use models::{Channel, ChannelId, ChannelInsert, ChannelMembership, MemberId};

use async_trait::async_trait;
use thiserror::Error;

/// Exclusive hold on one channel, released on drop.
pub type ChannelGuard = tokio::sync::OwnedMutexGuard<()>;

/// Registry errors.
///
/// These indicate a broken invariant between the caller and the store, not a
/// caller mistake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("channel not found: {0}")]
    ChannelNotFound(ChannelId),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Storage contract for channel bindings and memberships.
///
/// Implementations must allocate unique, never reused channel ids, insert
/// channels atomically keyed on name, and upsert memberships by
/// `(channel_id, member)`.
///
/// Reads and writes on an existing channel are only consistent with each
/// other while the caller holds that channel's [`lock_channel`] guard.
///
/// [`lock_channel`]: Registry::lock_channel
#[async_trait]
pub trait Registry: Send + Sync {
    /// Exact-match lookup by external channel name.
    async fn find_channel_by_name(&self, name: &str) -> Result<Option<Channel>, RegistryError>;

    async fn find_channel_by_id(&self, id: ChannelId) -> Result<Option<Channel>, RegistryError>;

    /// Check whether a channel with this exact name exists.
    async fn channel_exists(&self, name: &str) -> Result<bool, RegistryError> {
        Ok(self.find_channel_by_name(name).await?.is_some())
    }

    /// Store a new channel unless the name is already taken.
    ///
    /// The check and the insert are one atomic step. When another caller got
    /// there first, the existing channel is returned and no id is consumed.
    async fn create_channel(
        &self,
        name: &str,
        project: &str,
        restricted: bool,
    ) -> Result<ChannelInsert, RegistryError>;

    /// Create a channel together with its founding admin membership.
    ///
    /// The default runs [`create_channel`](Registry::create_channel) then
    /// [`upsert_membership`](Registry::upsert_membership), leaving a short
    /// window where the channel is visible without its admin. Stores that can
    /// do both in one step should override this.
    async fn register_channel(
        &self,
        name: &str,
        project: &str,
        restricted: bool,
        founder: &str,
    ) -> Result<ChannelInsert, RegistryError> {
        let insert = self.create_channel(name, project, restricted).await?;
        if let ChannelInsert::Created(id) = insert {
            self.upsert_membership(id, founder, true).await?;
        }
        Ok(insert)
    }

    /// Wait for exclusive use of a channel.
    ///
    /// Every authorization check and the write it guards happen under one
    /// guard. Guards on different channels are independent. Fails with
    /// [`RegistryError::ChannelNotFound`] if `id` is unknown.
    async fn lock_channel(&self, id: ChannelId) -> Result<ChannelGuard, RegistryError>;

    /// Overwrite the project and restricted flag of an existing channel.
    ///
    /// Fails with [`RegistryError::ChannelNotFound`] if `id` is unknown.
    async fn update_channel_binding(
        &self,
        id: ChannelId,
        project: &str,
        restricted: bool,
    ) -> Result<(), RegistryError>;

    /// Create the `(channel_id, member)` row, or overwrite its admin flag.
    async fn upsert_membership(
        &self,
        channel_id: ChannelId,
        member: &str,
        is_admin: bool,
    ) -> Result<(), RegistryError>;

    async fn find_membership(
        &self,
        channel_id: ChannelId,
        member: &str,
    ) -> Result<Option<ChannelMembership>, RegistryError>;

    /// True iff `member` holds an admin row on the channel.
    ///
    /// Not a member and member-but-basic both return false.
    async fn is_admin(&self, member: &str, channel_id: ChannelId) -> Result<bool, RegistryError> {
        Ok(self
            .find_membership(channel_id, member)
            .await?
            .is_some_and(|m| m.is_admin))
    }

    /// All memberships of a channel, ordered by member.
    async fn list_memberships(
        &self,
        channel_id: ChannelId,
    ) -> Result<Vec<ChannelMembership>, RegistryError>;

    /// Every registered channel, ordered by id.
    async fn list_channels(&self) -> Result<Vec<Channel>, RegistryError>;
}
