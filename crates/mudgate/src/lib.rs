//! # Mudgate
//!
//! A MUD session router: an in-memory room graph, a registry of user
//! sessions pinned to rooms, and an engine that routes chat and
//! movement events between users sharing a room.
//!
//! This meta crate ties the layers together and adds the surface a
//! front end drives:
//!
//! - [`Commands`] — look / go / talk, rendered as [`Reply`] payloads
//! - [`EngineHandle`] / [`spawn_engine`] — the single-dispatcher event
//!   loop that serializes all operations against one engine
//! - [`store`] — loading room and session definition records from
//!   per-record JSON files
//! - [`MudgateError`] — one error type over all the layers
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use mudgate::{spawn_engine, Commands, MudgateError};
//! use mudgate_engine::DungeonEngine;
//!
//! // Load a RoomGraph and SessionRegistry, then:
//! // let commands = Commands::new(DungeonEngine::new(graph, sessions));
//! // let handle = spawn_engine(commands, 64);
//! // let reply = handle.look(key).await?;
//! ```

mod commands;
mod dispatch;
mod error;
pub mod store;

pub use commands::{Commands, Reply};
pub use dispatch::{spawn_engine, EngineHandle};
pub use error::MudgateError;

// One-stop re-exports of the layer crates' main types.
pub use mudgate_engine::{DungeonEngine, EngineError, ExitView, ExitsView, RoomView};
pub use mudgate_session::{
    ChannelId, Identity, LoadReport, Notice, OutboundChannel, Resolver,
    SessionDef, SessionError, SessionKey, SessionRegistry, UserId, UserSession,
};
pub use mudgate_world::{
    DuplicatePolicy, GraphConfig, Room, RoomDef, RoomGraph, RoomId, WorldError,
};
