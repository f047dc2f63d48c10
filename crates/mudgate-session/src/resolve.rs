//! Resolution hook: turning persisted references into live handles.
//!
//! Session records store raw user and channel references. Resolving
//! them into a display identity and a deliverable channel is external
//! I/O — a platform API call, a directory lookup — so it lives behind a
//! trait. The registry calls it during loading and nowhere else.

use crate::{ChannelId, Identity, OutboundChannel, SessionError, UserId};

/// Resolves session-record references into live identities and channels.
///
/// Both methods may suspend on I/O. A resolution failure isolates to
/// the record being loaded: the registry skips it, reports it, and
/// keeps loading the rest of the batch.
pub trait Resolver: Send + Sync {
    /// The channel type produced for each session.
    type Channel: OutboundChannel;

    /// Resolves a user reference to a display identity.
    fn resolve_identity(
        &self,
        user: UserId,
    ) -> impl std::future::Future<Output = Result<Identity, SessionError>> + Send;

    /// Resolves a channel reference to a deliverable channel.
    fn resolve_channel(
        &self,
        channel: ChannelId,
    ) -> impl std::future::Future<Output = Result<Self::Channel, SessionError>> + Send;
}
