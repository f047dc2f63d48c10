//! Session management for Mudgate.
//!
//! This crate owns everything about WHO is connected and HOW to reach
//! them:
//!
//! 1. **Sessions** — the live binding between an external identity and
//!    its current room ([`UserSession`], [`SessionRegistry`])
//! 2. **Resolution** — turning persisted user/channel references into
//!    live handles during loading ([`Resolver`] trait)
//! 3. **Delivery** — the capability the engine uses to reach a session
//!    ([`OutboundChannel`] trait, [`Notice`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Engine layer (above)  ← scans sessions to decide who hears what
//!     ↕
//! Session layer (this crate)  ← owns sessions, identities, channels
//!     ↕
//! World layer (below)  ← provides RoomId for the current-room pin
//! ```

#![allow(async_fn_in_trait)]

mod error;
mod outbound;
mod registry;
mod resolve;
mod session;

pub use error::SessionError;
pub use outbound::{Notice, OutboundChannel};
pub use registry::{LoadReport, SessionRegistry, SkippedSession};
pub use resolve::Resolver;
pub use session::{ChannelId, Identity, SessionDef, SessionKey, UserId, UserSession};
