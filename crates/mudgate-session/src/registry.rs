//! The session registry: owns every live session.
//!
//! # Concurrency note
//!
//! `SessionRegistry` is NOT thread-safe by itself. It is designed to be
//! owned by a single dispatcher task and borrowed per-operation by the
//! engine. A deployment that drives the engine from multiple workers
//! must wrap the registry in its own mutual exclusion.

use mudgate_world::RoomId;
use tracing::{info, warn};

use crate::{
    ChannelId, OutboundChannel, Resolver, SessionDef, SessionError,
    SessionKey, UserId, UserSession,
};

/// One record skipped during loading, with the reason.
#[derive(Debug)]
pub struct SkippedSession {
    pub def: SessionDef,
    pub error: SessionError,
}

/// Outcome of a bulk load. One bad record never aborts the batch — it
/// lands in `skipped` and the rest still load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedSession>,
}

/// Owns the set of all [`UserSession`]s.
///
/// Sessions are stored in load order, so [`all`](Self::all) enumerates
/// deterministically — broadcast scans and their tests rely on that.
/// Lookups are linear; the population is the handful of connected users
/// of one dungeon, not a server farm.
pub struct SessionRegistry<C: OutboundChannel> {
    sessions: Vec<UserSession<C>>,
}

impl<C: OutboundChannel> SessionRegistry<C> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
        }
    }

    /// Loads sessions from definition records, resolving each through
    /// the given resolver.
    ///
    /// Partial-failure semantics: a record whose resolution fails, or
    /// that duplicates an already-registered (user, channel) key, is
    /// skipped and reported; the remaining records still load.
    pub async fn load<R>(
        defs: impl IntoIterator<Item = SessionDef>,
        resolver: &R,
    ) -> (Self, LoadReport)
    where
        R: Resolver<Channel = C>,
    {
        let mut registry = Self::new();
        let mut report = LoadReport::default();

        for def in defs {
            match registry.load_one(&def, resolver).await {
                Ok(()) => report.loaded += 1,
                Err(error) => {
                    warn!(
                        user_id = def.user_id,
                        channel_id = def.channel_id,
                        %error,
                        "skipping session record"
                    );
                    report.skipped.push(SkippedSession { def, error });
                }
            }
        }

        info!(
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "session registry loaded"
        );
        (registry, report)
    }

    async fn load_one<R>(
        &mut self,
        def: &SessionDef,
        resolver: &R,
    ) -> Result<(), SessionError>
    where
        R: Resolver<Channel = C>,
    {
        let identity = resolver.resolve_identity(UserId(def.user_id)).await?;
        let channel_id = ChannelId(def.channel_id);
        let outbound = resolver.resolve_channel(channel_id).await?;

        self.insert(UserSession {
            identity,
            channel_id,
            outbound,
            current_room: def.current_room.clone().map(RoomId::from),
        })
    }

    /// Registers a fully-built session.
    ///
    /// # Errors
    /// Returns [`SessionError::DuplicateSession`] if a session already
    /// exists for the same (user, channel) key.
    pub fn insert(
        &mut self,
        session: UserSession<C>,
    ) -> Result<(), SessionError> {
        let key = session.key();
        if self.find(key).is_some() {
            return Err(SessionError::DuplicateSession(key.user, key.channel));
        }

        info!(session = %key, name = %session.identity.name, "session registered");
        self.sessions.push(session);
        Ok(())
    }

    /// Exact-match lookup by (user, channel) key.
    pub fn find(&self, key: SessionKey) -> Option<&UserSession<C>> {
        self.sessions.iter().find(|s| s.key() == key)
    }

    /// Mutable exact-match lookup. Used by the engine's move operation,
    /// the only mutation a session sees after creation.
    pub fn find_mut(&mut self, key: SessionKey) -> Option<&mut UserSession<C>> {
        self.sessions.iter_mut().find(|s| s.key() == key)
    }

    /// All sessions, in load order. The stable enumeration that
    /// broadcast scans iterate.
    pub fn all(&self) -> &[UserSession<C>] {
        &self.sessions
    }

    /// Returns the number of registered sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if no sessions are registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl<C: OutboundChannel> Default for SessionRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
