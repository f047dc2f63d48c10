//! The engine proper: movement, speech, and presence broadcast.

use mudgate_session::{
    Identity, Notice, OutboundChannel, SessionKey, SessionRegistry,
    UserSession,
};
use mudgate_world::{RoomGraph, RoomId};
use tracing::{debug, info};

use crate::{EngineError, ExitView, ExitsView, RoomView};

/// Fallback origin name for an enter notice whose source room is not
/// in the graph.
const UNKNOWN_ORIGIN: &str = "seemingly nowhere";

/// Routes movement, speech, and presence between the sessions of one
/// dungeon.
///
/// The engine owns the (read-only) room graph and the session registry;
/// the registry remains the exclusive owner of every session, and each
/// operation borrows exactly what it needs for its own duration.
/// Operations are keyed by [`SessionKey`] rather than session
/// references so that a move can mutate one session and then scan the
/// whole registry.
pub struct DungeonEngine<C: OutboundChannel> {
    graph: RoomGraph,
    sessions: SessionRegistry<C>,
}

impl<C: OutboundChannel> DungeonEngine<C> {
    /// Creates an engine over a loaded world and registry.
    pub fn new(graph: RoomGraph, sessions: SessionRegistry<C>) -> Self {
        Self { graph, sessions }
    }

    /// The room graph this engine reads.
    pub fn graph(&self) -> &RoomGraph {
        &self.graph
    }

    /// The session registry this engine routes between.
    pub fn sessions(&self) -> &SessionRegistry<C> {
        &self.sessions
    }

    /// Mutable registry access for adapters that register sessions
    /// after construction. The registry stays the sole session owner.
    pub fn sessions_mut(&mut self) -> &mut SessionRegistry<C> {
        &mut self.sessions
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    /// Describes the session's current room.
    ///
    /// # Errors
    /// - [`EngineError::SessionNotFound`] — unknown key
    /// - [`EngineError::Unplaced`] — session is in the void
    /// - [`EngineError::Room`] — the session's room id is not in the
    ///   graph (dangling); recoverable
    pub fn describe_room(&self, key: SessionKey) -> Result<RoomView, EngineError> {
        let room = self.graph.get(self.placed_room(key)?)?;
        Ok(RoomView {
            name: room.name.clone(),
            title: format!("Current location: {}", room.name),
            description: room.description.clone(),
        })
    }

    /// Describes the exits of the session's current room, each resolved
    /// to its destination's display name.
    ///
    /// Exits whose target is missing from the graph are omitted from
    /// the result. Directions are sorted, so repeated calls without an
    /// intervening move return identical views.
    pub fn describe_exits(&self, key: SessionKey) -> Result<ExitsView, EngineError> {
        let room_id = self.placed_room(key)?;
        let mut exits = Vec::new();

        for (direction, target) in self.graph.exits_of(room_id)? {
            match self.graph.get(target) {
                Ok(destination) => exits.push(ExitView {
                    direction: direction.clone(),
                    destination: destination.name.clone(),
                }),
                Err(_) => {
                    debug!(
                        room = %room_id,
                        %direction,
                        target = %target,
                        "omitting dangling exit"
                    );
                }
            }
        }

        exits.sort_by(|a, b| a.direction.cmp(&b.direction));
        Ok(ExitsView { exits })
    }

    /// Lists the identities of the other sessions sharing the
    /// session's room. Empty means "you seem to be alone"; void
    /// sessions never appear.
    pub fn describe_others(&self, key: SessionKey) -> Result<Vec<Identity>, EngineError> {
        let room = self.placed_room(key)?.clone();
        Ok(self
            .occupants(&room, key)
            .map(|other| other.identity.clone())
            .collect())
    }

    // -----------------------------------------------------------------
    // Movement
    // -----------------------------------------------------------------

    /// Moves the session through the named exit of its current room.
    ///
    /// On success the session's room is updated and two broadcasts go
    /// out: a leave notice to the origin's remaining occupants and an
    /// enter notice to the destination's occupants, neither including
    /// the mover. The room mutation is committed before either
    /// broadcast is composed, so registry scans see the post-move
    /// world.
    ///
    /// An exit may name a target the graph doesn't know; the move still
    /// succeeds and later queries degrade with
    /// [`EngineError::Room`].
    ///
    /// # Errors
    /// [`EngineError::InvalidExit`] when `direction` is not an exit of
    /// the current room — no state change.
    pub async fn move_session(
        &mut self,
        key: SessionKey,
        direction: &str,
    ) -> Result<RoomId, EngineError> {
        let from_room = self.placed_room(key)?.clone();
        let target = self
            .graph
            .exits_of(&from_room)?
            .get(direction)
            .cloned()
            .ok_or_else(|| EngineError::InvalidExit {
                direction: direction.to_string(),
            })?;

        let session = self
            .sessions
            .find_mut(key)
            .ok_or(EngineError::SessionNotFound(key))?;
        session.current_room = Some(target.clone());
        info!(
            session = %key,
            from = %from_room,
            to = %target,
            %direction,
            "session moved"
        );

        self.broadcast_leave(key, &from_room, direction).await;
        self.broadcast_enter(key, &from_room).await;

        Ok(target)
    }

    // -----------------------------------------------------------------
    // Speech and broadcasts
    // -----------------------------------------------------------------

    /// Forwards a line of speech to every other session in the
    /// speaker's room, exactly once each, never echoing to the speaker.
    /// A speaker in the void produces no traffic at all.
    pub async fn speak(&self, key: SessionKey, text: &str) -> Result<(), EngineError> {
        let speaker = self.session(key)?;
        let Some(room) = speaker.current_room.clone() else {
            return Ok(());
        };

        let line = format!("{}: {}", speaker.identity.name, text);
        self.deliver_text(&room, key, &line).await;
        Ok(())
    }

    /// Announces to the sessions still in `from_room` that the subject
    /// left toward its (post-move) current room.
    ///
    /// No-op for an unknown or void subject. When the destination is
    /// missing from the graph the notice names the raw id instead.
    pub async fn broadcast_leave(
        &self,
        key: SessionKey,
        from_room: &RoomId,
        direction: &str,
    ) {
        let Some(subject) = self.sessions.find(key) else {
            debug!(session = %key, "leave broadcast for unknown session");
            return;
        };
        let Some(destination) = subject.current_room.as_ref() else {
            return;
        };

        let destination_name = self
            .graph
            .get(destination)
            .map(|room| room.name.clone())
            .unwrap_or_else(|_| destination.to_string());
        let notice = Notice::text(format!(
            "{} leaves, going `{}` toward `{}`",
            subject.identity.name, direction, destination_name,
        ));
        self.deliver_notice(from_room, key, &notice).await;
    }

    /// Announces the subject's arrival to the other occupants of its
    /// (post-move) current room.
    ///
    /// No-op for an unknown or void subject. `from_room` may be unknown
    /// to the graph; the notice then reads "enters from seemingly
    /// nowhere".
    pub async fn broadcast_enter(&self, key: SessionKey, from_room: &RoomId) {
        let Some(subject) = self.sessions.find(key) else {
            debug!(session = %key, "enter broadcast for unknown session");
            return;
        };
        let Some(room) = subject.current_room.clone() else {
            return;
        };

        let origin = self
            .graph
            .get(from_room)
            .map(|r| r.name.clone())
            .unwrap_or_else(|_| UNKNOWN_ORIGIN.to_string());
        let notice = Notice::text(format!(
            "{} enters from {}",
            subject.identity.name, origin,
        ));
        self.deliver_notice(&room, key, &notice).await;
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn session(&self, key: SessionKey) -> Result<&UserSession<C>, EngineError> {
        self.sessions
            .find(key)
            .ok_or(EngineError::SessionNotFound(key))
    }

    fn placed_room(&self, key: SessionKey) -> Result<&RoomId, EngineError> {
        self.session(key)?
            .current_room
            .as_ref()
            .ok_or(EngineError::Unplaced(key))
    }

    /// Every session in `room` except `exclude`. Void sessions never
    /// match (their room is `None`).
    fn occupants<'a>(
        &'a self,
        room: &'a RoomId,
        exclude: SessionKey,
    ) -> impl Iterator<Item = &'a UserSession<C>> {
        self.sessions
            .all()
            .iter()
            .filter(move |s| s.key() != exclude)
            .filter(move |s| s.current_room.as_ref() == Some(room))
    }

    async fn deliver_text(&self, room: &RoomId, exclude: SessionKey, text: &str) {
        for recipient in self.occupants(room, exclude) {
            if let Err(error) = recipient.outbound.send_text(text).await {
                debug!(
                    recipient = %recipient.key(),
                    %error,
                    "dropping failed delivery"
                );
            }
        }
    }

    async fn deliver_notice(&self, room: &RoomId, exclude: SessionKey, notice: &Notice) {
        for recipient in self.occupants(room, exclude) {
            if let Err(error) = recipient.outbound.send_notice(notice).await {
                debug!(
                    recipient = %recipient.key(),
                    %error,
                    "dropping failed delivery"
                );
            }
        }
    }
}
