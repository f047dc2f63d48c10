//! The room graph: an immutable-after-load collection of rooms.

use std::collections::HashMap;

use crate::{Room, RoomDef, RoomId, WorldError};

// ---------------------------------------------------------------------------
// GraphConfig
// ---------------------------------------------------------------------------

/// What [`RoomGraph::load`] does when two definitions share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The later definition silently replaces the earlier one.
    #[default]
    Overwrite,

    /// Loading fails with [`WorldError::DuplicateRoom`].
    Reject,
}

/// Configuration for graph loading.
#[derive(Debug, Clone, Default)]
pub struct GraphConfig {
    /// Policy for definitions that reuse an id.
    pub duplicate_ids: DuplicatePolicy,
}

// ---------------------------------------------------------------------------
// RoomGraph
// ---------------------------------------------------------------------------

/// Owns every [`Room`] and resolves ids to rooms and exit mappings.
///
/// The graph is an explicit instance owned by whoever built it — never
/// process-wide state — so multiple dungeons (or tests) stay isolated.
/// It is read-only after [`load`](Self::load): no mutation, no removal.
#[derive(Debug, Default)]
pub struct RoomGraph {
    rooms: HashMap<RoomId, Room>,
}

impl RoomGraph {
    /// Builds a graph from a sequence of definition records.
    ///
    /// Name and description defaults are applied per record. A record
    /// with a missing (blank) id fails the load; duplicate ids are
    /// handled per `config.duplicate_ids`.
    pub fn load(
        defs: impl IntoIterator<Item = RoomDef>,
        config: &GraphConfig,
    ) -> Result<Self, WorldError> {
        let mut rooms: HashMap<RoomId, Room> = HashMap::new();

        for (index, def) in defs.into_iter().enumerate() {
            if def.id.trim().is_empty() {
                return Err(WorldError::MissingRoomId { index });
            }

            let room = Room::from(def);
            tracing::info!(room_id = %room.id, "room loaded");

            if let Some(previous) = rooms.insert(room.id.clone(), room) {
                match config.duplicate_ids {
                    DuplicatePolicy::Overwrite => {
                        tracing::warn!(
                            room_id = %previous.id,
                            "duplicate room id, later definition wins"
                        );
                    }
                    DuplicatePolicy::Reject => {
                        return Err(WorldError::DuplicateRoom(previous.id));
                    }
                }
            }
        }

        tracing::info!(rooms = rooms.len(), "room graph loaded");
        Ok(Self { rooms })
    }

    /// Looks up a room by id.
    pub fn get(&self, id: &RoomId) -> Result<&Room, WorldError> {
        self.rooms
            .get(id)
            .ok_or_else(|| WorldError::RoomNotFound(id.clone()))
    }

    /// Returns the direction → target mapping for a room.
    ///
    /// An empty map means the room has no exits. Targets may reference
    /// ids absent from the graph; callers resolve them at their own
    /// peril and degrade gracefully.
    pub fn exits_of(
        &self,
        id: &RoomId,
    ) -> Result<&HashMap<String, RoomId>, WorldError> {
        Ok(&self.get(id)?.exits)
    }

    /// Returns `true` if the graph contains the given id.
    pub fn contains(&self, id: &RoomId) -> bool {
        self.rooms.contains_key(id)
    }

    /// Returns the number of rooms in the graph.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if the graph has no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
