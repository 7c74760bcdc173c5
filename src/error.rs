//! Error handling for channel actions.
//!
//! Three kinds are caller-correctable and get a reply the dispatcher relays
//! back to the member. Registry failures are internal and only logged.

use crate::registry::RegistryError;
use thiserror::Error;

// ============================================================================
// Action Errors (authorization service)
// ============================================================================

/// A request that is authorized but redundant given the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidAction {
    #[error("user is already registered for this channel")]
    AlreadyMember,

    #[error("user is already an admin for this channel")]
    AlreadyAdmin,

    #[error("user is not an admin for this channel")]
    NotAdmin,
}

/// Errors returned by the authorization service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("unauthorised access: user '{member}' is not an admin of channel '{channel}'")]
    UnauthorizedAccess { channel: String, member: String },

    #[error("channel not registered: {0}")]
    ChannelNotRegistered(String),

    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl ActionError {
    pub(crate) fn unauthorized(channel: &str, member: &str) -> Self {
        Self::UnauthorizedAccess {
            channel: channel.to_string(),
            member: member.to_string(),
        }
    }

    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnauthorizedAccess { .. } => "unauthorized_access",
            Self::ChannelNotRegistered(_) => "channel_not_registered",
            Self::InvalidAction(InvalidAction::AlreadyMember) => "already_member",
            Self::InvalidAction(InvalidAction::AlreadyAdmin) => "already_admin",
            Self::InvalidAction(InvalidAction::NotAdmin) => "not_admin",
            Self::Registry(RegistryError::ChannelNotFound(_)) => "registry_channel_not_found",
            Self::Registry(RegistryError::Internal(_)) => "registry_internal",
        }
    }

    /// Whether the caller can fix this by changing the request.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Registry(_))
    }

    /// Reply text for the member who issued the request.
    ///
    /// Returns `None` for internal errors, which are not shown to members.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::UnauthorizedAccess { member, .. } => Some(format!(
                "Unauthorised access. Admin access required for this feature. \
                 User '{member}' is not an admin of this channel."
            )),
            Self::ChannelNotRegistered(_) => Some(
                "This channel has not been registered. \
                 Please register a project for it first."
                    .to_string(),
            ),
            Self::InvalidAction(action) => {
                let mut text = action.to_string();
                if let Some(first) = text.get_mut(..1) {
                    first.make_ascii_uppercase();
                }
                text.push('.');
                Some(text)
            }
            Self::Registry(_) => None,
        }
    }
}

/// Result type for channel actions.
pub type ActionResult<T = ()> = Result<T, ActionError>;
