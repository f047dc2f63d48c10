//! Error types for the world layer.

use crate::RoomId;

/// Errors that can occur while loading or querying the room graph.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A definition record had a missing or blank room id.
    /// `index` is the record's position in the load sequence.
    #[error("room definition {index} has a missing or blank id")]
    MissingRoomId { index: usize },

    /// Two definitions used the same id and the graph was configured
    /// with [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject).
    #[error("duplicate room id `{0}`")]
    DuplicateRoom(RoomId),

    /// Lookup of a room id absent from the graph. Recoverable — callers
    /// degrade their rendering rather than fail.
    #[error("room `{0}` not found")]
    RoomNotFound(RoomId),
}
