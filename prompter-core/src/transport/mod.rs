//! Transport collaborator: the narrow messaging surface the engine needs
//!
//! The engine never talks to a platform directly. Anything that can post,
//! delete, and wait for replies or reactions with a deadline can host prompts.

pub mod scripted;

use crate::error::TransportError;
use crate::models::{ChannelRef, Outgoing, Reaction, Reply, SentMessage};
use async_trait::async_trait;
use std::time::Duration;

pub use scripted::ScriptedTransport;

/// Predicate deciding whether a reply counts toward a wait
pub type ReplyFilter<'a> = &'a (dyn Fn(&Reply) -> bool + Send + Sync);

/// Predicate deciding whether a reaction counts toward a wait
pub type ReactionFilter<'a> = &'a (dyn Fn(&Reaction) -> bool + Send + Sync);

/// Limits for a wait on replies or reactions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwaitOptions {
    /// Stop after this many qualifying events
    pub max: usize,
    /// Give up after this long; `None` waits forever
    pub deadline: Option<Duration>,
}

impl AwaitOptions {
    pub fn new(max: usize, deadline: Option<Duration>) -> Self {
        Self { max, deadline }
    }
}

/// Messaging platform operations consumed by the prompt engine.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Post content on a channel
    async fn send(
        &self,
        channel: &ChannelRef,
        content: Outgoing,
    ) -> Result<SentMessage, TransportError>;

    /// Remove a message now, or after `delay` without blocking the caller
    async fn delete(
        &self,
        message: &SentMessage,
        delay: Option<Duration>,
    ) -> Result<(), TransportError>;

    /// Remove a user's reply message
    async fn delete_reply(&self, reply: &Reply) -> Result<(), TransportError>;

    /// Collect up to `options.max` replies on `channel` that pass `filter`.
    /// Fails with [`TransportError::Timeout`] when the deadline elapses first.
    async fn await_reply(
        &self,
        channel: &ChannelRef,
        filter: ReplyFilter<'_>,
        options: AwaitOptions,
    ) -> Result<Vec<Reply>, TransportError>;

    /// Collect up to `options.max` distinct reactions on `message` that pass
    /// `filter`. Same timeout contract as [`ChatTransport::await_reply`].
    async fn await_reactions(
        &self,
        message: &SentMessage,
        filter: ReactionFilter<'_>,
        options: AwaitOptions,
    ) -> Result<Vec<Reaction>, TransportError>;

    /// Add a reaction to a message. Idempotent per (message, emoji).
    async fn attach_reaction(
        &self,
        message: &SentMessage,
        emoji: &str,
    ) -> Result<(), TransportError>;
}
