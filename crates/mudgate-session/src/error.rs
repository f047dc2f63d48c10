//! Error types for the session layer.

use crate::{ChannelId, UserId};

/// Errors that can occur during session loading and outbound delivery.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// An identity reference could not be resolved to a live user.
    /// Isolates to the offending record during a bulk load.
    #[error("could not resolve identity {0}: {1}")]
    ResolveIdentity(UserId, String),

    /// A channel reference could not be resolved to a deliverable
    /// channel.
    #[error("could not resolve channel {0}: {1}")]
    ResolveChannel(ChannelId, String),

    /// A record duplicated an already-registered (user, channel) pair.
    /// At most one session exists per pair at any time.
    #[error("session for {0} on {1} already registered")]
    DuplicateSession(UserId, ChannelId),

    /// An outbound send failed. Logged and skipped by broadcast loops —
    /// one dead channel never blocks the remaining recipients.
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}
