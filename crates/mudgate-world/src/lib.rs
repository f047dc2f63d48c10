//! The world layer: rooms and the room graph.
//!
//! Rooms are loaded once from external definition records and are
//! read-only for the lifetime of the process. The graph resolves ids to
//! rooms and directional exits. Exit targets are NOT validated at load
//! time — a dangling target is resolved (and degraded gracefully) at
//! traversal time by the engine layer.

mod error;
mod graph;
mod room;

pub use error::WorldError;
pub use graph::{DuplicatePolicy, GraphConfig, RoomGraph};
pub use room::{Room, RoomDef, RoomId};
