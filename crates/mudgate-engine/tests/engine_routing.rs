//! Integration tests for the engine's routing using a recording channel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use mudgate_engine::{DungeonEngine, EngineError};
use mudgate_session::{
    ChannelId, Identity, Notice, OutboundChannel, SessionError, SessionKey,
    SessionRegistry, UserId, UserSession,
};
use mudgate_world::{GraphConfig, RoomDef, RoomGraph, RoomId, WorldError};

// =========================================================================
// Mock channel: records every delivery, optionally fails on demand.
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Delivery {
    Text(String),
    Notice(Notice),
}

#[derive(Clone, Default)]
struct RecordingChannel {
    deliveries: Arc<Mutex<Vec<Delivery>>>,
    fail: bool,
}

impl RecordingChannel {
    /// A channel whose sends always error, for broken-recipient tests.
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    fn texts(&self) -> Vec<String> {
        self.deliveries()
            .into_iter()
            .filter_map(|d| match d {
                Delivery::Text(t) => Some(t),
                Delivery::Notice(_) => None,
            })
            .collect()
    }

    fn notices(&self) -> Vec<Notice> {
        self.deliveries()
            .into_iter()
            .filter_map(|d| match d {
                Delivery::Notice(n) => Some(n),
                Delivery::Text(_) => None,
            })
            .collect()
    }

    fn is_silent(&self) -> bool {
        self.deliveries.lock().unwrap().is_empty()
    }
}

impl OutboundChannel for RecordingChannel {
    async fn send_text(&self, text: &str) -> Result<(), SessionError> {
        if self.fail {
            return Err(SessionError::DeliveryFailed("channel down".into()));
        }
        self.deliveries
            .lock()
            .unwrap()
            .push(Delivery::Text(text.to_string()));
        Ok(())
    }

    async fn send_notice(&self, notice: &Notice) -> Result<(), SessionError> {
        if self.fail {
            return Err(SessionError::DeliveryFailed("channel down".into()));
        }
        self.deliveries
            .lock()
            .unwrap()
            .push(Delivery::Notice(notice.clone()));
        Ok(())
    }
}

// =========================================================================
// Fixture
// =========================================================================

/// Engine plus a tap on each session's channel, keyed by user id.
struct Fixture {
    engine: DungeonEngine<RecordingChannel>,
    taps: HashMap<u64, RecordingChannel>,
}

/// Rooms A and B joined east/west, plus a room with no exits and a room
/// with a dangling exit.
fn world() -> RoomGraph {
    let defs = vec![
        RoomDef {
            id: "A".into(),
            name: Some("Antechamber".into()),
            description: Some("Cold stone and colder drafts.".into()),
            exits: HashMap::from([("east".to_string(), "B".to_string())]),
        },
        RoomDef {
            id: "B".into(),
            name: Some("Ballroom".into()),
            description: None,
            exits: HashMap::from([
                ("west".to_string(), "A".to_string()),
                ("down".to_string(), "oubliette".to_string()),
            ]),
        },
        RoomDef {
            id: "pit".into(),
            name: None,
            description: None,
            exits: HashMap::new(),
        },
    ];
    RoomGraph::load(defs, &GraphConfig::default()).unwrap()
}

/// Seats sessions as (user id, display name, initial room, channel).
/// `None` seats the session in the void.
fn fixture(seats: &[(u64, &str, Option<&str>)]) -> Fixture {
    fixture_with(seats, |_| RecordingChannel::default())
}

fn fixture_with(
    seats: &[(u64, &str, Option<&str>)],
    mut channel_for: impl FnMut(u64) -> RecordingChannel,
) -> Fixture {
    let mut registry = SessionRegistry::new();
    let mut taps = HashMap::new();

    for (user, name, room) in seats {
        let channel = channel_for(*user);
        taps.insert(*user, channel.clone());
        registry
            .insert(UserSession {
                identity: Identity {
                    id: UserId(*user),
                    name: name.to_string(),
                },
                channel_id: ChannelId(user + 100),
                outbound: channel,
                current_room: room.map(RoomId::from),
            })
            .unwrap();
    }

    Fixture {
        engine: DungeonEngine::new(world(), registry),
        taps,
    }
}

fn key(user: u64) -> SessionKey {
    SessionKey::new(UserId(user), ChannelId(user + 100))
}

fn room_of(fx: &Fixture, user: u64) -> Option<RoomId> {
    fx.engine
        .sessions()
        .find(key(user))
        .unwrap()
        .current_room
        .clone()
}

// =========================================================================
// move_session
// =========================================================================

#[tokio::test]
async fn test_move_valid_exit_updates_current_room() {
    let mut fx = fixture(&[(1, "S1", Some("A"))]);

    let target = fx.engine.move_session(key(1), "east").await.unwrap();

    assert_eq!(target, RoomId::from("B"));
    assert_eq!(room_of(&fx, 1), Some(RoomId::from("B")));
}

#[tokio::test]
async fn test_move_invalid_exit_leaves_room_unchanged() {
    let mut fx = fixture(&[(1, "S1", Some("A"))]);

    let result = fx.engine.move_session(key(1), "north").await;

    assert!(
        matches!(result, Err(EngineError::InvalidExit { ref direction }) if direction == "north")
    );
    assert_eq!(room_of(&fx, 1), Some(RoomId::from("A")));
}

#[tokio::test]
async fn test_move_emits_leave_notice_to_origin_only() {
    // S1 and S2 share A. S1 goes east into an empty B: S2 hears the
    // leave, nobody hears an enter, and S1 hears nothing at all.
    let mut fx = fixture(&[(1, "S1", Some("A")), (2, "S2", Some("A"))]);

    fx.engine.move_session(key(1), "east").await.unwrap();

    let heard = fx.taps[&2].notices();
    assert_eq!(heard.len(), 1, "S2 hears exactly the leave notice");
    assert_eq!(
        heard[0].description,
        "S1 leaves, going `east` toward `Ballroom`"
    );
    assert!(fx.taps[&1].is_silent(), "the mover hears nothing");

    // B was empty, so S1 is alone there.
    assert!(fx.engine.describe_others(key(1)).unwrap().is_empty());
}

#[tokio::test]
async fn test_move_emits_enter_notice_to_destination_occupants() {
    let mut fx = fixture(&[
        (1, "S1", Some("A")),
        (2, "S2", Some("A")),
        (3, "S3", Some("B")),
    ]);

    fx.engine.move_session(key(1), "east").await.unwrap();

    let heard = fx.taps[&3].notices();
    assert_eq!(heard.len(), 1);
    assert_eq!(heard[0].description, "S1 enters from Antechamber");
    // The origin occupant only hears the leave.
    assert_eq!(fx.taps[&2].notices().len(), 1);
    assert!(fx.taps[&1].is_silent());
}

#[tokio::test]
async fn test_move_through_dangling_exit_succeeds_and_degrades() {
    // B's "down" exit targets a room the graph doesn't know. The move
    // still commits; the leave notice names the raw id; queries from
    // the unknown room degrade instead of crashing.
    let mut fx = fixture(&[(1, "S1", Some("B")), (2, "S2", Some("B"))]);

    let target = fx.engine.move_session(key(1), "down").await.unwrap();

    assert_eq!(target, RoomId::from("oubliette"));
    assert_eq!(room_of(&fx, 1), Some(RoomId::from("oubliette")));
    assert_eq!(
        fx.taps[&2].notices()[0].description,
        "S1 leaves, going `down` toward `oubliette`"
    );

    let described = fx.engine.describe_room(key(1));
    assert!(matches!(
        described,
        Err(EngineError::Room(WorldError::RoomNotFound(_)))
    ));
}

#[tokio::test]
async fn test_move_from_void_returns_unplaced() {
    let mut fx = fixture(&[(1, "S1", None)]);

    let result = fx.engine.move_session(key(1), "east").await;

    assert!(matches!(result, Err(EngineError::Unplaced(_))));
}

// =========================================================================
// speak
// =========================================================================

#[tokio::test]
async fn test_speak_reaches_roommates_once_and_never_the_speaker() {
    let fx = fixture(&[
        (1, "S1", Some("A")),
        (2, "S2", Some("A")),
        (3, "S3", Some("B")),
    ]);

    fx.engine.speak(key(1), "hi").await.unwrap();

    assert_eq!(fx.taps[&2].texts(), vec!["S1: hi".to_string()]);
    assert!(fx.taps[&3].is_silent(), "other rooms hear nothing");
    assert!(fx.taps[&1].is_silent(), "no echo to the speaker");
}

#[tokio::test]
async fn test_speak_from_void_is_a_silent_noop() {
    let fx = fixture(&[(1, "S1", None), (2, "S2", Some("A"))]);

    fx.engine.speak(key(1), "anyone?").await.unwrap();

    assert!(fx.taps[&2].is_silent());
}

#[tokio::test]
async fn test_speak_delivery_failure_does_not_abort_broadcast() {
    // S2's channel is down; S3 (registered after S2) must still hear.
    let fx = fixture_with(
        &[(1, "S1", Some("A")), (2, "S2", Some("A")), (3, "S3", Some("A"))],
        |user| {
            if user == 2 {
                RecordingChannel::failing()
            } else {
                RecordingChannel::default()
            }
        },
    );

    fx.engine.speak(key(1), "hi").await.unwrap();

    assert_eq!(fx.taps[&3].texts(), vec!["S1: hi".to_string()]);
}

// =========================================================================
// Void isolation
// =========================================================================

#[tokio::test]
async fn test_void_session_is_invisible_to_broadcasts_and_presence() {
    let mut fx = fixture(&[
        (1, "S1", Some("A")),
        (2, "Ghost", None),
    ]);

    // Presence: the void session doesn't show up for anyone.
    assert!(fx.engine.describe_others(key(1)).unwrap().is_empty());

    // Traffic: neither speech nor move notices reach the void.
    fx.engine.speak(key(1), "hello?").await.unwrap();
    fx.engine.move_session(key(1), "east").await.unwrap();
    assert!(fx.taps[&2].is_silent());
}

// =========================================================================
// Queries
// =========================================================================

#[tokio::test]
async fn test_describe_room_renders_title_and_description() {
    let fx = fixture(&[(1, "S1", Some("A"))]);

    let view = fx.engine.describe_room(key(1)).unwrap();

    assert_eq!(view.title, "Current location: Antechamber");
    assert_eq!(view.description, "Cold stone and colder drafts.");
}

#[tokio::test]
async fn test_describe_room_unplaced_returns_error() {
    let fx = fixture(&[(1, "S1", None)]);

    assert!(matches!(
        fx.engine.describe_room(key(1)),
        Err(EngineError::Unplaced(_))
    ));
}

#[tokio::test]
async fn test_describe_exits_omits_dangling_and_sorts_directions() {
    // B has "west" → A (real) and "down" → oubliette (dangling).
    let fx = fixture(&[(1, "S1", Some("B"))]);

    let view = fx.engine.describe_exits(key(1)).unwrap();

    let rendered: Vec<(String, String)> = view
        .iter()
        .map(|e| (e.direction.clone(), e.destination.clone()))
        .collect();
    assert_eq!(
        rendered,
        vec![("west".to_string(), "Antechamber".to_string())]
    );
}

#[tokio::test]
async fn test_describe_exits_is_idempotent_without_a_move() {
    let fx = fixture(&[(1, "S1", Some("A"))]);

    let first = fx.engine.describe_exits(key(1)).unwrap();
    let second = fx.engine.describe_exits(key(1)).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_describe_exits_empty_room_is_distinguishable() {
    let fx = fixture(&[(1, "S1", Some("pit"))]);

    let view = fx.engine.describe_exits(key(1)).unwrap();

    assert!(view.is_empty());
}

#[tokio::test]
async fn test_describe_others_lists_roommates_only() {
    let fx = fixture(&[
        (1, "S1", Some("A")),
        (2, "S2", Some("A")),
        (3, "S3", Some("B")),
    ]);

    let others = fx.engine.describe_others(key(1)).unwrap();

    assert_eq!(others.len(), 1);
    assert_eq!(others[0].name, "S2");
}

#[tokio::test]
async fn test_unknown_session_key_returns_session_not_found() {
    let fx = fixture(&[(1, "S1", Some("A"))]);
    let stranger = SessionKey::new(UserId(99), ChannelId(999));

    assert!(matches!(
        fx.engine.describe_room(stranger),
        Err(EngineError::SessionNotFound(_))
    ));
    assert!(matches!(
        fx.engine.speak(stranger, "hi").await,
        Err(EngineError::SessionNotFound(_))
    ));
}

// =========================================================================
// Broadcast helpers
// =========================================================================

#[tokio::test]
async fn test_broadcast_enter_from_unknown_room_reads_seemingly_nowhere() {
    let fx = fixture(&[(1, "S1", Some("A")), (2, "S2", Some("A"))]);

    fx.engine
        .broadcast_enter(key(1), &RoomId::from("oubliette"))
        .await;

    assert_eq!(
        fx.taps[&2].notices()[0].description,
        "S1 enters from seemingly nowhere"
    );
}

#[tokio::test]
async fn test_broadcast_helpers_noop_for_void_subject() {
    let fx = fixture(&[(1, "Ghost", None), (2, "S2", Some("A"))]);

    fx.engine
        .broadcast_leave(key(1), &RoomId::from("A"), "east")
        .await;
    fx.engine.broadcast_enter(key(1), &RoomId::from("A")).await;

    assert!(fx.taps[&2].is_silent());
}
