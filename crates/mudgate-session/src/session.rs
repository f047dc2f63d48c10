//! Session types: the data structures that bind an identity to a room.

use std::fmt;

use mudgate_world::RoomId;
use serde::{Deserialize, Serialize};

use crate::OutboundChannel;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A reference to an external user.
///
/// Opaque to the router — only a [`Resolver`](crate::Resolver) knows
/// what platform account it names. Newtype over `u64` so a `UserId`
/// can't be confused with a [`ChannelId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// A reference to an external delivery channel. Same newtype pattern
/// as [`UserId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// The resolved external user behind a session.
///
/// `name` is what other occupants see in speech and presence notices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub name: String,
}

// ---------------------------------------------------------------------------
// SessionKey
// ---------------------------------------------------------------------------

/// Exact-match lookup key for a session: the (user, channel) pair.
///
/// At most one session exists per key at any time — one physical
/// connection, one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub user: UserId,
    pub channel: ChannelId,
}

impl SessionKey {
    pub fn new(user: UserId, channel: ChannelId) -> Self {
        Self { user, channel }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.channel)
    }
}

// ---------------------------------------------------------------------------
// UserSession
// ---------------------------------------------------------------------------

/// A live user session.
///
/// Created during the load phase and never deleted during normal
/// operation. `current_room` is the only field mutated after creation,
/// and only by the engine's move operation. `None` is the Void
/// sentinel: a session in the void joins no broadcasts and cannot
/// speak.
pub struct UserSession<C: OutboundChannel> {
    /// Who this session represents.
    pub identity: Identity,

    /// The channel reference this session was resolved from.
    pub channel_id: ChannelId,

    /// Where deliveries for this session go. Stable for the session's
    /// lifetime.
    pub outbound: C,

    /// The room the session occupies, or `None` for the void.
    pub current_room: Option<RoomId>,
}

impl<C: OutboundChannel> UserSession<C> {
    /// Returns this session's lookup key.
    pub fn key(&self) -> SessionKey {
        SessionKey::new(self.identity.id, self.channel_id)
    }

    /// Returns `true` if the session has no room assigned.
    pub fn is_void(&self) -> bool {
        self.current_room.is_none()
    }
}

/// A session definition record from persisted session storage.
///
/// `user_id` and `channel_id` are required; a raw record missing either
/// fails deserialization and is skipped by the store loader. The
/// initial room is optional — omitted means the session starts in the
/// void.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDef {
    pub user_id: u64,
    pub channel_id: u64,

    #[serde(default)]
    pub current_room: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_display() {
        let key = SessionKey::new(UserId(7), ChannelId(42));
        assert_eq!(key.to_string(), "U-7@C-42");
    }

    #[test]
    fn test_session_def_without_room_parses_as_void() {
        let def: SessionDef =
            serde_json::from_str(r#"{"user_id": 1, "channel_id": 2}"#).unwrap();
        assert!(def.current_room.is_none());
    }

    #[test]
    fn test_session_def_missing_channel_is_rejected() {
        let result: Result<SessionDef, _> =
            serde_json::from_str(r#"{"user_id": 1}"#);
        assert!(result.is_err());
    }
}
