//! The upward command surface: look, go, talk.
//!
//! Whatever front end drives the engine (a chat-platform adapter, a
//! test harness, the demo binary) calls these with a session key and
//! gets back a [`Reply`] to deliver on the caller's own surface. Side
//! effects on OTHER sessions (speech, leave/enter notices) go straight
//! through each recipient's outbound channel and never appear in the
//! reply.

use mudgate_engine::{DungeonEngine, EngineError, ExitsView};
use mudgate_session::{Identity, Notice, OutboundChannel, SessionKey};

const NOT_YOUR_CLIENT: &str = "Error: This isn't your client channel!";
const NO_EXITS: &str = "No obvious exits; you appear to be stuck here.";
const ALONE: &str = "You seem to be alone.";

/// What a command hands back to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    /// A plain line, shown before the notices.
    pub text: Option<String>,
    /// Structured notices, in render order.
    pub notices: Vec<Notice>,
}

impl Reply {
    fn message(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            notices: Vec::new(),
        }
    }

    /// An empty reply — the command had nothing to say to its caller.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.notices.is_empty()
    }
}

/// The command surface over one engine.
pub struct Commands<C: OutboundChannel> {
    engine: DungeonEngine<C>,
}

impl<C: OutboundChannel> Commands<C> {
    pub fn new(engine: DungeonEngine<C>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &DungeonEngine<C> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut DungeonEngine<C> {
        &mut self.engine
    }

    /// Recaps the caller's room: description, exits, other occupants.
    pub fn look(&self, key: SessionKey) -> Reply {
        match self.recap(key) {
            Ok(notices) => Reply {
                text: None,
                notices,
            },
            Err(error) => error_reply(error),
        }
    }

    /// Moves the caller through an exit of their current room.
    ///
    /// On success the reply carries the movement line plus a recap of
    /// the destination; the engine has already broadcast the leave and
    /// enter notices. An invalid direction changes nothing and replies
    /// with the exits as guidance.
    pub async fn go(&mut self, key: SessionKey, direction: &str) -> Reply {
        match self.engine.move_session(key, direction).await {
            Ok(_) => {
                let text =
                    format!("You go {direction} and arrive in a new location...");
                match self.recap(key) {
                    Ok(notices) => Reply {
                        text: Some(text),
                        notices,
                    },
                    // Landed somewhere the graph doesn't know — keep
                    // the movement line, degrade the recap.
                    Err(error) => Reply {
                        text: Some(text),
                        notices: vec![Notice::text(error.to_string())],
                    },
                }
            }
            Err(EngineError::InvalidExit { .. }) => {
                let mut reply = Reply::message(format!(
                    "`{direction}` is not a valid exit in your current location."
                ));
                if let Ok(exits) = self.engine.describe_exits(key) {
                    reply.notices.push(exits_notice(&exits));
                }
                reply
            }
            Err(error) => error_reply(error),
        }
    }

    /// Forwards the caller's speech to their roommates. The speaker
    /// gets nothing back — their own words are never echoed.
    pub async fn talk(&self, key: SessionKey, text: &str) -> Reply {
        match self.engine.speak(key, text).await {
            Ok(()) => Reply::default(),
            Err(error) => error_reply(error),
        }
    }

    /// The three-notice room recap shared by look and a successful go.
    fn recap(&self, key: SessionKey) -> Result<Vec<Notice>, EngineError> {
        let room = self.engine.describe_room(key)?;
        let exits = self.engine.describe_exits(key)?;
        let others = self.engine.describe_others(key)?;

        Ok(vec![
            Notice::titled(room.title, room.description),
            exits_notice(&exits),
            occupants_notice(&room.name, &others),
        ])
    }
}

fn error_reply(error: EngineError) -> Reply {
    match error {
        EngineError::SessionNotFound(_) => Reply::message(NOT_YOUR_CLIENT),
        other => Reply::message(other.to_string()),
    }
}

fn exits_notice(view: &ExitsView) -> Notice {
    if view.is_empty() {
        return Notice::text(NO_EXITS);
    }
    let description = view
        .iter()
        .map(|exit| format!("{}: {}", exit.direction, exit.destination))
        .collect::<Vec<_>>()
        .join("\n");
    Notice::titled("Obvious exits", description)
}

fn occupants_notice(room_name: &str, others: &[Identity]) -> Notice {
    let description = if others.is_empty() {
        ALONE.to_string()
    } else {
        others
            .iter()
            .map(|identity| identity.name.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    };
    Notice::titled(format!("Other users in {room_name}"), description)
}
