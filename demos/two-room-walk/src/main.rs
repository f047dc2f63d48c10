//! Two rooms, two wanderers: a self-contained walkthrough of the router.
//!
//! Everything a platform adapter would normally provide (an identity
//! directory, real outbound channels) is faked with stdout, so the
//! whole flow is visible in one terminal:
//! `RUST_LOG=info cargo run -p two-room-walk`

use mudgate::{
    spawn_engine, ChannelId, Commands, DungeonEngine, GraphConfig, Identity,
    Notice, OutboundChannel, Reply, Resolver, RoomDef, RoomGraph, SessionDef,
    SessionError, SessionKey, SessionRegistry, UserId,
};

// ---------------------------------------------------------------------------
// Console-backed adapter
// ---------------------------------------------------------------------------

/// A channel that "delivers" by printing, labeled so the two users'
/// traffic can be told apart.
struct ConsoleChannel {
    label: String,
}

impl OutboundChannel for ConsoleChannel {
    async fn send_text(&self, text: &str) -> Result<(), SessionError> {
        println!("[{}] {text}", self.label);
        Ok(())
    }

    async fn send_notice(&self, notice: &Notice) -> Result<(), SessionError> {
        match &notice.title {
            Some(title) => {
                println!("[{}] {title}: {}", self.label, notice.description)
            }
            None => println!("[{}] {}", self.label, notice.description),
        }
        Ok(())
    }
}

/// Static stand-in for a platform user directory.
struct DemoDirectory;

impl Resolver for DemoDirectory {
    type Channel = ConsoleChannel;

    async fn resolve_identity(
        &self,
        user: UserId,
    ) -> Result<Identity, SessionError> {
        let name = match user.0 {
            1 => "Ada",
            2 => "Brin",
            _ => {
                return Err(SessionError::ResolveIdentity(
                    user,
                    "not in the demo directory".into(),
                ))
            }
        };
        Ok(Identity {
            id: user,
            name: name.to_string(),
        })
    }

    async fn resolve_channel(
        &self,
        channel: ChannelId,
    ) -> Result<ConsoleChannel, SessionError> {
        Ok(ConsoleChannel {
            label: format!("to {channel}"),
        })
    }
}

// ---------------------------------------------------------------------------
// Walkthrough
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let rooms: Vec<RoomDef> = serde_json::from_value(serde_json::json!([
        {
            "id": "gatehouse",
            "name": "The Gatehouse",
            "description": "Portcullis up, nobody on watch.",
            "exits": {"east": "hall"}
        },
        {
            "id": "hall",
            "name": "The Great Hall",
            "exits": {"west": "gatehouse"}
        }
    ]))?;
    let graph = RoomGraph::load(rooms, &GraphConfig::default())?;

    let sessions: Vec<SessionDef> = serde_json::from_value(serde_json::json!([
        {"user_id": 1, "channel_id": 11, "current_room": "gatehouse"},
        {"user_id": 2, "channel_id": 22, "current_room": "gatehouse"}
    ]))?;
    let (registry, report) =
        SessionRegistry::load(sessions, &DemoDirectory).await;
    for skipped in &report.skipped {
        eprintln!("skipped session record: {}", skipped.error);
    }

    let handle =
        spawn_engine(Commands::new(DungeonEngine::new(graph, registry)), 16);

    let ada = SessionKey::new(UserId(1), ChannelId(11));
    let brin = SessionKey::new(UserId(2), ChannelId(22));

    print_reply("Ada looks around", &handle.look(ada).await?);
    handle.talk(ada, "follow me east").await?;
    print_reply("Ada goes east", &handle.go(ada, "east").await?);
    print_reply("Brin looks around", &handle.look(brin).await?);
    print_reply("Brin tries north", &handle.go(brin, "north").await?);
    print_reply("Brin follows", &handle.go(brin, "east").await?);

    handle.shutdown().await?;
    Ok(())
}

fn print_reply(heading: &str, reply: &Reply) {
    println!("--- {heading}");
    if let Some(text) = &reply.text {
        println!("{text}");
    }
    for notice in &reply.notices {
        match &notice.title {
            Some(title) => println!("{title}: {}", notice.description),
            None => println!("{}", notice.description),
        }
    }
}
