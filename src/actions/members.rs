//! Membership management: ADD, PROMOTE, DEMOTE.
//!
//! All three resolve the channel first, then check the caller, then the
//! target. An unregistered channel never consults memberships, and an
//! unauthorized caller never learns the target's role.
//!
//! The caller check, the target check and the write all run under the
//! channel's lock, so a member demoted mid-action cannot finish it and two
//! changes to the same row cannot both pass the target check.

use super::{ChannelActions, action};
use crate::error::{ActionResult, InvalidAction};
use tracing::info;

impl ChannelActions {
    /// Add `new_member` to the channel, as admin when `make_admin` is set.
    ///
    /// A member that already has a row, basic or admin, is rejected rather
    /// than merged.
    pub async fn add_member(
        &self,
        channel_name: &str,
        caller: &str,
        new_member: &str,
        make_admin: bool,
    ) -> ActionResult {
        self.run(
            action::ADD_MEMBER,
            channel_name,
            caller,
            self.insert_member(channel_name, caller, new_member, make_admin),
        )
        .await
    }

    /// Grant admin to `target`, adding them to the channel if needed.
    pub async fn promote_to_admin(
        &self,
        channel_name: &str,
        caller: &str,
        target: &str,
    ) -> ActionResult {
        self.run(
            action::PROMOTE,
            channel_name,
            caller,
            self.grant_admin(channel_name, caller, target),
        )
        .await
    }

    /// Clear admin from `target`, keeping them as a basic member.
    ///
    /// A target that is not an admin (basic or never added) is rejected.
    pub async fn demote_from_admin(
        &self,
        channel_name: &str,
        caller: &str,
        target: &str,
    ) -> ActionResult {
        self.run(
            action::DEMOTE,
            channel_name,
            caller,
            self.revoke_admin(channel_name, caller, target),
        )
        .await
    }

    async fn insert_member(
        &self,
        channel_name: &str,
        caller: &str,
        new_member: &str,
        make_admin: bool,
    ) -> ActionResult {
        let channel = self.resolve_channel(channel_name).await?;
        let _guard = self.registry.lock_channel(channel.id).await?;
        self.require_admin(&channel, caller).await?;

        if self
            .registry
            .find_membership(channel.id, new_member)
            .await?
            .is_some()
        {
            return Err(InvalidAction::AlreadyMember.into());
        }

        self.registry
            .upsert_membership(channel.id, new_member, make_admin)
            .await?;
        info!(member = %new_member, admin = make_admin, "Member added");
        Ok(())
    }

    async fn grant_admin(&self, channel_name: &str, caller: &str, target: &str) -> ActionResult {
        let channel = self.resolve_channel(channel_name).await?;
        let _guard = self.registry.lock_channel(channel.id).await?;
        self.require_admin(&channel, caller).await?;

        let existing = self.registry.find_membership(channel.id, target).await?;
        if existing.as_ref().is_some_and(|m| m.is_admin) {
            return Err(InvalidAction::AlreadyAdmin.into());
        }

        self.registry
            .upsert_membership(channel.id, target, true)
            .await?;
        info!(member = %target, added = existing.is_none(), "Member promoted to admin");
        Ok(())
    }

    async fn revoke_admin(&self, channel_name: &str, caller: &str, target: &str) -> ActionResult {
        let channel = self.resolve_channel(channel_name).await?;
        let _guard = self.registry.lock_channel(channel.id).await?;
        self.require_admin(&channel, caller).await?;

        // Basic and absent look the same here.
        if !self.registry.is_admin(target, channel.id).await? {
            return Err(InvalidAction::NotAdmin.into());
        }

        self.registry
            .upsert_membership(channel.id, target, false)
            .await?;
        info!(member = %target, "Member demoted from admin");
        Ok(())
    }
}
