//! chanbind - channel to issue-tracker project bindings.
//!
//! Channels are bound to a project by whoever registers them first; that
//! member becomes the channel's admin. Admins rebind the project and manage
//! other members' roles. Everything else (message parsing, transport, the
//! tracker itself) sits outside this crate and calls into [`ChannelActions`].

pub mod actions;
pub mod config;
pub mod error;
pub mod metrics;
pub mod registry;
pub mod seed;
pub mod telemetry;

pub use actions::ChannelActions;
pub use error::{ActionError, ActionResult, InvalidAction};
pub use registry::{
    Channel, ChannelGuard, ChannelId, ChannelInsert, ChannelMembership, MemberId, MemoryRegistry,
    Registry, RegistryError,
};
