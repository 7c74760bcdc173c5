//! Registry data models.

/// Internal channel identifier, allocated by the registry.
pub type ChannelId = i64;

/// Opaque identity of a chat member (human or bot).
pub type MemberId = String;

/// A channel bound to an issue-tracker project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub project: String,
    /// Ticket creation is limited to registered members when set.
    pub restricted: bool,
    pub registered_at: i64,
    pub updated_at: i64,
}

/// A member's role on a channel. Keyed by `(channel_id, member)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelMembership {
    pub channel_id: ChannelId,
    pub member: MemberId,
    pub is_admin: bool,
    pub added_at: i64,
    pub updated_at: i64,
}

/// Outcome of the name-keyed channel insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelInsert {
    /// A new channel was stored under this id.
    Created(ChannelId),
    /// The name was already taken; nothing was stored.
    Existing(Channel),
}
