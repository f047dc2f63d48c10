//! Single-dispatcher event loop for one engine instance.
//!
//! The engine's concurrency contract is "one logical actor": each
//! inbound event runs to completion before the next begins, so the
//! registry and graph need no locking. This module provides that actor
//! — the engine (wrapped in its [`Commands`] surface) is owned by a
//! task, and front ends talk to it through a cloneable [`EngineHandle`].
//!
//! Events from a single caller are processed in submission order;
//! between callers only arrival order at the channel applies. Once
//! dispatched, an event is never cancelled.

use mudgate_session::{OutboundChannel, SessionKey};
use tokio::sync::{mpsc, oneshot};

use crate::{Commands, MudgateError, Reply};

/// An inbound event with its reply slot.
enum InboundEvent {
    Look {
        key: SessionKey,
        reply: oneshot::Sender<Reply>,
    },
    Go {
        key: SessionKey,
        direction: String,
        reply: oneshot::Sender<Reply>,
    },
    Talk {
        key: SessionKey,
        text: String,
        reply: oneshot::Sender<Reply>,
    },
    Shutdown,
}

/// Handle to a running engine dispatcher. Cheap to clone — it's an
/// `mpsc::Sender` wrapper.
#[derive(Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<InboundEvent>,
}

impl EngineHandle {
    /// Submits a look and awaits the rendered reply.
    pub async fn look(&self, key: SessionKey) -> Result<Reply, MudgateError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(InboundEvent::Look { key, reply: tx })
            .await
            .map_err(|_| MudgateError::Dispatcher)?;
        rx.await.map_err(|_| MudgateError::Dispatcher)
    }

    /// Submits a move and awaits the rendered reply.
    pub async fn go(
        &self,
        key: SessionKey,
        direction: &str,
    ) -> Result<Reply, MudgateError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(InboundEvent::Go {
                key,
                direction: direction.to_string(),
                reply: tx,
            })
            .await
            .map_err(|_| MudgateError::Dispatcher)?;
        rx.await.map_err(|_| MudgateError::Dispatcher)
    }

    /// Submits speech and awaits the (usually empty) reply.
    pub async fn talk(
        &self,
        key: SessionKey,
        text: &str,
    ) -> Result<Reply, MudgateError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(InboundEvent::Talk {
                key,
                text: text.to_string(),
                reply: tx,
            })
            .await
            .map_err(|_| MudgateError::Dispatcher)?;
        rx.await.map_err(|_| MudgateError::Dispatcher)
    }

    /// Tells the dispatcher to stop after the events already queued.
    pub async fn shutdown(&self) -> Result<(), MudgateError> {
        self.sender
            .send(InboundEvent::Shutdown)
            .await
            .map_err(|_| MudgateError::Dispatcher)
    }
}

/// The dispatcher task state: owns the engine, drains the event queue.
struct EngineActor<C: OutboundChannel> {
    commands: Commands<C>,
    receiver: mpsc::Receiver<InboundEvent>,
}

impl<C: OutboundChannel> EngineActor<C> {
    async fn run(mut self) {
        tracing::info!("engine dispatcher started");

        while let Some(event) = self.receiver.recv().await {
            match event {
                InboundEvent::Look { key, reply } => {
                    let _ = reply.send(self.commands.look(key));
                }
                InboundEvent::Go {
                    key,
                    direction,
                    reply,
                } => {
                    let result = self.commands.go(key, &direction).await;
                    let _ = reply.send(result);
                }
                InboundEvent::Talk { key, text, reply } => {
                    let result = self.commands.talk(key, &text).await;
                    let _ = reply.send(result);
                }
                InboundEvent::Shutdown => break,
            }
        }

        tracing::info!("engine dispatcher stopped");
    }
}

/// Spawns the dispatcher task for an engine and returns its handle.
///
/// `channel_size` bounds the event queue — submitters wait when it
/// fills, which is the only backpressure in the stack.
pub fn spawn_engine<C: OutboundChannel>(
    commands: Commands<C>,
    channel_size: usize,
) -> EngineHandle {
    let (tx, rx) = mpsc::channel(channel_size);
    let actor = EngineActor {
        commands,
        receiver: rx,
    };
    tokio::spawn(actor.run());
    EngineHandle { sender: tx }
}
