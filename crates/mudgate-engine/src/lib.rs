//! The dungeon engine: the coordination core of Mudgate.
//!
//! The engine reads the room graph, moves sessions between rooms, and
//! decides who hears what when a user speaks, moves, enters, or leaves.
//! It is the only layer whose behavior depends on both the world and
//! the session registry.
//!
//! # Key types
//!
//! - [`DungeonEngine`] — the operations: describe, move, speak, broadcast
//! - [`RoomView`], [`ExitsView`] — rendered query results
//! - [`EngineError`] — per-request, recoverable failures
//!
//! # Concurrency contract
//!
//! One engine instance expects to be driven by a single dispatcher that
//! runs each operation to completion before the next (the meta crate
//! provides such a dispatcher). Suspension only happens at outbound
//! delivery calls; the `current_room` mutation in a move is committed
//! before the first of them, so broadcast scans always see the
//! post-move world.

mod engine;
mod error;
mod view;

pub use engine::DungeonEngine;
pub use error::EngineError;
pub use view::{ExitView, ExitsView, RoomView};
