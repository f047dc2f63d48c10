//! Outbound delivery: the capability the engine uses to reach a session.
//!
//! The router never touches a chat platform directly. Each session owns
//! one [`OutboundChannel`], and the engine only ever calls
//! `send_text` / `send_notice` on it. Adapters implement the trait over
//! whatever surface they bind: a chat platform's channel, a telnet
//! socket, an in-memory buffer in tests.

use serde::{Deserialize, Serialize};

use crate::SessionError;

/// A structured notice: an optional title plus a description.
///
/// This is the richest payload the router composes; turning it into a
/// platform's native rich format (embeds, ANSI, plain lines) is the
/// adapter's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: Option<String>,
    pub description: String,
}

impl Notice {
    /// A notice with no title.
    pub fn text(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: description.into(),
        }
    }

    /// A titled notice.
    pub fn titled(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: description.into(),
        }
    }
}

/// Delivers messages to one session's user.
///
/// Fire-and-forget from the engine's perspective: delivery confirmation
/// is the adapter's concern, and a failed delivery never aborts the
/// remaining recipients of a broadcast.
///
/// The methods return `impl Future + Send` (rather than plain
/// `async fn`) so that engine operations over any channel type stay
/// spawnable on a multi-threaded runtime. Implementors can still just
/// write `async fn`.
pub trait OutboundChannel: Send + Sync + 'static {
    /// Delivers a plain line of text.
    fn send_text(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), SessionError>> + Send;

    /// Delivers a structured notice.
    fn send_notice(
        &self,
        notice: &Notice,
    ) -> impl std::future::Future<Output = Result<(), SessionError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_text_has_no_title() {
        let notice = Notice::text("a bare line");
        assert!(notice.title.is_none());
        assert_eq!(notice.description, "a bare line");
    }

    #[test]
    fn test_notice_titled_keeps_both_parts() {
        let notice = Notice::titled("Obvious exits", "north: The Gate");
        assert_eq!(notice.title.as_deref(), Some("Obvious exits"));
        assert_eq!(notice.description, "north: The Gate");
    }

    #[test]
    fn test_notice_round_trips_through_json() {
        let notice = Notice::titled("t", "d");
        let bytes = serde_json::to_vec(&notice).unwrap();
        let decoded: Notice = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(notice, decoded);
    }
}
