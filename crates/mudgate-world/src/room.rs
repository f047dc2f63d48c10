//! Room types: the nodes of the world graph.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Description used when a definition record doesn't provide one.
pub const DEFAULT_DESCRIPTION: &str = "A distinctly non-descript area.";

// ---------------------------------------------------------------------------
// RoomId
// ---------------------------------------------------------------------------

/// A unique identifier for a room.
///
/// Room ids come from external definition records and are also the
/// values of exit mappings, so they are strings rather than numeric
/// handles. `#[serde(transparent)]` keeps the JSON form a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Creates a `RoomId` from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RoomId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// A node in the world graph.
///
/// Rooms are created once during the load phase and never mutated or
/// removed afterward.
#[derive(Debug, Clone)]
pub struct Room {
    /// Unique id, also used as the target of other rooms' exits.
    pub id: RoomId,

    /// Display name. Falls back to the id's text when the definition
    /// omits one.
    pub name: String,

    /// Free-text description, defaulted when the definition omits one.
    pub description: String,

    /// Direction label → target room id. Keys are unique; no ordering
    /// guarantee. Targets are not validated against the graph.
    pub exits: HashMap<String, RoomId>,
}

/// A room definition record, one per room, as produced by an external
/// definition source. The source format (files, database, fixtures) is
/// the adapter's concern — the graph only needs a sequence of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDef {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub exits: HashMap<String, String>,
}

impl From<RoomDef> for Room {
    /// Applies the display-name and description defaults.
    fn from(def: RoomDef) -> Self {
        let name = def.name.unwrap_or_else(|| def.id.clone());
        let description = def
            .description
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
        Self {
            id: RoomId(def.id),
            name,
            description,
            exits: def
                .exits
                .into_iter()
                .map(|(direction, target)| (direction, RoomId(target)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&RoomId::new("cellar")).unwrap();
        assert_eq!(json, "\"cellar\"");
    }

    #[test]
    fn test_room_from_def_applies_defaults() {
        let def = RoomDef {
            id: "cellar".into(),
            name: None,
            description: None,
            exits: HashMap::new(),
        };

        let room = Room::from(def);

        assert_eq!(room.name, "cellar");
        assert_eq!(room.description, DEFAULT_DESCRIPTION);
        assert!(room.exits.is_empty());
    }

    #[test]
    fn test_room_from_def_keeps_declared_fields() {
        let def = RoomDef {
            id: "cellar".into(),
            name: Some("The Cellar".into()),
            description: Some("Dusty casks line the walls.".into()),
            exits: HashMap::from([("up".to_string(), "kitchen".to_string())]),
        };

        let room = Room::from(def);

        assert_eq!(room.name, "The Cellar");
        assert_eq!(room.description, "Dusty casks line the walls.");
        assert_eq!(room.exits.get("up"), Some(&RoomId::new("kitchen")));
    }

    #[test]
    fn test_room_def_minimal_json_parses() {
        // Only `id` is required; everything else is defaulted.
        let def: RoomDef = serde_json::from_str(r#"{"id": "attic"}"#).unwrap();
        assert_eq!(def.id, "attic");
        assert!(def.name.is_none());
        assert!(def.exits.is_empty());
    }

    #[test]
    fn test_room_def_json_without_id_is_rejected() {
        let result: Result<RoomDef, _> =
            serde_json::from_str(r#"{"name": "nowhere"}"#);
        assert!(result.is_err());
    }
}
