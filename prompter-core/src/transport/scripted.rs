//! Scripted in-memory transport
//!
//! Replays queued replies and reaction batches in order and records every
//! call the engine makes, so prompt flows can be driven and inspected without
//! a messaging platform. An exhausted script fails the wait with a transport
//! error, which ends any re-prompt loop.

use super::{AwaitOptions, ChatTransport, ReactionFilter, ReplyFilter};
use crate::error::TransportError;
use crate::models::{ChannelRef, MessageId, Outgoing, Reaction, Reply, SentMessage, UserId};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug)]
enum ReplyStep {
    Reply(Reply),
    /// The wait returns whatever it collected so far
    End,
    Timeout,
    Fail(String),
}

#[derive(Debug)]
enum ReactionStep {
    Batch(Vec<Reaction>),
    End,
    Timeout,
    Fail(String),
}

/// A recorded deletion of an engine-posted message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    pub id: MessageId,
    pub delay: Option<Duration>,
}

#[derive(Debug, Default)]
struct ScriptState {
    next_id: u64,
    replies: VecDeque<ReplyStep>,
    reactions: VecDeque<ReactionStep>,
    sent: Vec<SentMessage>,
    deleted: Vec<Deletion>,
    deleted_replies: Vec<MessageId>,
    reply_waits: Vec<AwaitOptions>,
    reaction_waits: Vec<AwaitOptions>,
    attached: Vec<(MessageId, String)>,
}

impl ScriptState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// Deterministic [`ChatTransport`] for tests and dry runs.
pub struct ScriptedTransport {
    bot: UserId,
    state: Mutex<ScriptState>,
}

impl ScriptedTransport {
    pub fn new(bot: UserId) -> Self {
        Self {
            bot,
            state: Mutex::new(ScriptState::default()),
        }
    }

    /// Queue a reply authored by `author` on `channel`
    pub async fn push_text(&self, author: &UserId, channel: &ChannelRef, text: &str) {
        let mut state = self.state.lock().await;
        let id = state.next_id("reply");
        let reply = Reply::new(id, author.clone(), channel.clone(), text);
        state.replies.push_back(ReplyStep::Reply(reply));
    }

    /// Queue a fully built reply
    pub async fn push_reply(&self, reply: Reply) {
        self.state
            .lock()
            .await
            .replies
            .push_back(ReplyStep::Reply(reply));
    }

    /// Make the next reply wait hit its deadline
    pub async fn push_reply_timeout(&self) {
        self.state.lock().await.replies.push_back(ReplyStep::Timeout);
    }

    /// Make the next reply wait fail with a platform error
    /// End the next reply wait early with what it has collected
    pub async fn push_reply_end(&self) {
        self.state.lock().await.replies.push_back(ReplyStep::End);
    }

    pub async fn push_reply_failure(&self, message: &str) {
        self.state
            .lock()
            .await
            .replies
            .push_back(ReplyStep::Fail(message.to_string()));
    }

    /// Queue a batch of reactions arriving in the given order
    pub async fn push_reactions(&self, reactions: Vec<Reaction>) {
        self.state
            .lock()
            .await
            .reactions
            .push_back(ReactionStep::Batch(reactions));
    }

    pub async fn push_reaction_timeout(&self) {
        self.state
            .lock()
            .await
            .reactions
            .push_back(ReactionStep::Timeout);
    }

    /// End the next reaction wait early with what it has collected
    pub async fn push_reaction_end(&self) {
        self.state.lock().await.reactions.push_back(ReactionStep::End);
    }

    pub async fn push_reaction_failure(&self, message: &str) {
        self.state
            .lock()
            .await
            .reactions
            .push_back(ReactionStep::Fail(message.to_string()));
    }

    /// Every message posted so far, in order
    pub async fn sent(&self) -> Vec<SentMessage> {
        self.state.lock().await.sent.clone()
    }

    /// Text of every message posted so far (rich content contributes its description)
    pub async fn sent_texts(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .sent
            .iter()
            .map(|message| match &message.content {
                Outgoing::Text { text } => text.clone(),
                Outgoing::Rich(rich) => rich.description.clone(),
            })
            .collect()
    }

    pub async fn deleted(&self) -> Vec<Deletion> {
        self.state.lock().await.deleted.clone()
    }

    /// Number of times the message with `id` was deleted
    pub async fn deletions_of(&self, id: &MessageId) -> usize {
        self.state
            .lock()
            .await
            .deleted
            .iter()
            .filter(|deletion| &deletion.id == id)
            .count()
    }

    pub async fn deleted_replies(&self) -> Vec<MessageId> {
        self.state.lock().await.deleted_replies.clone()
    }

    /// Options of every reply wait, in order
    pub async fn reply_waits(&self) -> Vec<AwaitOptions> {
        self.state.lock().await.reply_waits.clone()
    }

    pub async fn reaction_waits(&self) -> Vec<AwaitOptions> {
        self.state.lock().await.reaction_waits.clone()
    }

    pub async fn attached(&self) -> Vec<(MessageId, String)> {
        self.state.lock().await.attached.clone()
    }

    /// Replies and reaction batches not consumed yet
    pub async fn remaining(&self) -> (usize, usize) {
        let state = self.state.lock().await;
        (state.replies.len(), state.reactions.len())
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new(UserId::new("bot"))
    }
}

fn exhausted() -> TransportError {
    TransportError::other("script exhausted")
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn send(
        &self,
        channel: &ChannelRef,
        content: Outgoing,
    ) -> Result<SentMessage, TransportError> {
        let mut state = self.state.lock().await;
        let id = state.next_id("msg");
        let message = SentMessage {
            id: MessageId::new(id),
            channel: channel.clone(),
            author: self.bot.clone(),
            content,
            timestamp: Utc::now(),
        };
        state.sent.push(message.clone());
        Ok(message)
    }

    async fn delete(
        &self,
        message: &SentMessage,
        delay: Option<Duration>,
    ) -> Result<(), TransportError> {
        self.state.lock().await.deleted.push(Deletion {
            id: message.id.clone(),
            delay,
        });
        Ok(())
    }

    async fn delete_reply(&self, reply: &Reply) -> Result<(), TransportError> {
        self.state
            .lock()
            .await
            .deleted_replies
            .push(reply.id.clone());
        Ok(())
    }

    async fn await_reply(
        &self,
        _channel: &ChannelRef,
        filter: ReplyFilter<'_>,
        options: AwaitOptions,
    ) -> Result<Vec<Reply>, TransportError> {
        let mut state = self.state.lock().await;
        state.reply_waits.push(options);

        let mut collected = Vec::new();
        while collected.len() < options.max.max(1) {
            match state.replies.pop_front() {
                Some(ReplyStep::Reply(reply)) => {
                    if filter(&reply) {
                        collected.push(reply);
                    }
                }
                Some(ReplyStep::End) => break,
                Some(ReplyStep::Timeout) => return Err(TransportError::Timeout),
                Some(ReplyStep::Fail(message)) => return Err(TransportError::other(message)),
                None => return Err(exhausted()),
            }
        }
        Ok(collected)
    }

    async fn await_reactions(
        &self,
        _message: &SentMessage,
        filter: ReactionFilter<'_>,
        options: AwaitOptions,
    ) -> Result<Vec<Reaction>, TransportError> {
        let mut state = self.state.lock().await;
        state.reaction_waits.push(options);

        let mut collected: Vec<Reaction> = Vec::new();
        while collected.len() < options.max.max(1) {
            match state.reactions.pop_front() {
                Some(ReactionStep::Batch(batch)) => {
                    for reaction in batch {
                        if collected.len() == options.max.max(1) {
                            break;
                        }
                        let seen = collected.iter().any(|r| r.emoji == reaction.emoji);
                        if !seen && filter(&reaction) {
                            collected.push(reaction);
                        }
                    }
                }
                Some(ReactionStep::End) => break,
                Some(ReactionStep::Timeout) => return Err(TransportError::Timeout),
                Some(ReactionStep::Fail(message)) => return Err(TransportError::other(message)),
                None => return Err(exhausted()),
            }
        }
        Ok(collected)
    }

    async fn attach_reaction(
        &self,
        message: &SentMessage,
        emoji: &str,
    ) -> Result<(), TransportError> {
        let mut state = self.state.lock().await;
        let entry = (message.id.clone(), emoji.to_string());
        if !state.attached.contains(&entry) {
            state.attached.push(entry);
        }
        Ok(())
    }
}
