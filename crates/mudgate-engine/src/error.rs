//! Error types for the engine layer.
//!
//! Every variant is a recoverable per-call failure returned to the
//! immediate caller. Nothing here is process-fatal, and nothing is ever
//! thrown across a broadcast loop — a lookup or delivery failure for
//! one recipient cannot starve the rest.

use mudgate_session::SessionKey;
use mudgate_world::WorldError;

/// Errors that can occur during engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No session matches the given (user, channel) key. Surfaced
    /// upward as a user-facing "not your client channel" error.
    #[error("no session for {0}")]
    SessionNotFound(SessionKey),

    /// The session is in the void (no room assigned). Direct queries
    /// surface this; speech and broadcasts silently no-op instead.
    #[error("session {0} is not in any room")]
    Unplaced(SessionKey),

    /// The requested direction is not an exit of the current room.
    /// No state change; callers re-render the exits as guidance.
    #[error("`{direction}` is not a valid exit here")]
    InvalidExit { direction: String },

    /// A room lookup failed — typically a session pinned to a room id
    /// absent from the graph. Degrades rendering, never crashes.
    #[error(transparent)]
    Room(#[from] WorldError),
}
