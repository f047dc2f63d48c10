//! Rendered query results.
//!
//! The engine answers "look"-style queries with these plain views; the
//! command surface turns them into notices for whatever platform is
//! attached.

/// A view of a session's current room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomView {
    /// The room's display name.
    pub name: String,
    /// e.g. `Current location: The Cellar`
    pub title: String,
    pub description: String,
}

/// One renderable exit: a direction and the destination's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitView {
    pub direction: String,
    pub destination: String,
}

/// The renderable exits of a room, sorted by direction.
///
/// Zero exits is a distinguishable state ([`is_empty`](Self::is_empty))
/// so callers can say "no obvious exits" instead of showing an empty
/// list. Exits whose target room is missing from the graph have
/// already been omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExitsView {
    pub exits: Vec<ExitView>,
}

impl ExitsView {
    /// Returns `true` if the room has no renderable exits.
    pub fn is_empty(&self) -> bool {
        self.exits.is_empty()
    }

    /// Iterates the exits in sorted direction order.
    pub fn iter(&self) -> impl Iterator<Item = &ExitView> {
        self.exits.iter()
    }
}
