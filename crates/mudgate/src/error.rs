//! Unified error type for the Mudgate stack.

use mudgate_engine::EngineError;
use mudgate_session::SessionError;
use mudgate_world::WorldError;

/// Top-level error that wraps all layer-specific errors.
///
/// When using the `mudgate` meta crate, callers deal with this single
/// type; `#[from]` on each variant lets `?` convert layer errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum MudgateError {
    /// A world-layer error (load, room lookup).
    #[error(transparent)]
    World(#[from] WorldError),

    /// A session-layer error (resolution, delivery, duplicate key).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// An engine-layer error (unknown session, void, invalid exit).
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The definition store directory could not be read. The only
    /// startup-fatal condition in the stack.
    #[error("definition store unreadable: {0}")]
    Store(#[source] std::io::Error),

    /// The dispatcher task is gone; no more events can be processed.
    #[error("engine dispatcher is gone")]
    Dispatcher,
}
