//! Terminal transport: prompts go to the terminal, answers come from stdin

use async_trait::async_trait;
use chrono::Utc;
use crossterm::style::Stylize;
use prompter_core::models::{
    ChannelId, ChannelRef, Mentions, MessageId, Outgoing, Reaction, Reply, RoleId, SentMessage,
    UserId,
};
use prompter_core::transport::{AwaitOptions, ChatTransport, ReactionFilter, ReplyFilter};
use prompter_core::TransportError;
use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::signal;
use tokio::sync::Mutex;
use uuid::Uuid;

/// The user pressed Ctrl+C while a wait was pending
#[derive(Error, Debug)]
#[error("Interrupted by user (Ctrl+C)")]
pub struct Interrupted;

/// Whether a prompt failed because the user interrupted a wait
pub fn is_interrupt(error: &TransportError) -> bool {
    matches!(error, TransportError::Other(source) if source.is::<Interrupted>())
}

/// A single person at a terminal acting as the prompted user
pub struct ConsoleTransport {
    bot: UserId,
    user: UserId,
    lines: Mutex<Lines<BufReader<Stdin>>>,
    /// Write prompts to stderr so stdout only carries the result
    quiet: bool,
}

impl ConsoleTransport {
    pub fn new(user: UserId, quiet: bool) -> Self {
        Self {
            bot: UserId::new("prompter"),
            user,
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            quiet,
        }
    }

    fn print(&self, text: &str) {
        if self.quiet {
            eprintln!("{}", text);
        } else {
            println!("{}", text);
        }
    }

    fn render(&self, content: &Outgoing) {
        match content {
            Outgoing::Text { text } => self.print(&text.clone().cyan().to_string()),
            Outgoing::Rich(rich) => {
                self.print(&rich.content);
                self.print(&rich.title.clone().bold().to_string());
                self.print(&rich.description);
                for field in &rich.fields {
                    self.print(&format!("  {}  {}", field.name.clone().bold(), field.value));
                }
            }
        }
        let _ = io::stdout().flush();
    }

    async fn next_line(&self) -> Result<String, TransportError> {
        let mut lines = self.lines.lock().await;
        match lines.next_line().await {
            Ok(Some(line)) => Ok(line),
            Ok(None) => Err(TransportError::other("stdin closed")),
            Err(e) => Err(TransportError::other(e)),
        }
    }

    async fn collect_replies(
        &self,
        channel: &ChannelRef,
        filter: ReplyFilter<'_>,
        max: usize,
    ) -> Result<Vec<Reply>, TransportError> {
        let mut replies = Vec::new();
        while replies.len() < max {
            let line = self.next_line().await?;
            let reply = Reply::new(
                Uuid::new_v4().to_string(),
                self.user.clone(),
                channel.clone(),
                line.as_str(),
            )
            .with_mentions(parse_mentions(&line));
            if filter(&reply) {
                replies.push(reply);
            }
        }
        Ok(replies)
    }

    async fn collect_reactions(
        &self,
        filter: ReactionFilter<'_>,
        max: usize,
    ) -> Result<Vec<Reaction>, TransportError> {
        let mut reactions: Vec<Reaction> = Vec::new();
        while reactions.len() < max {
            let line = self.next_line().await?;
            for reaction in parse_reactions(&line, &self.user) {
                if reactions.len() == max {
                    break;
                }
                if filter(&reaction) && !reactions.iter().any(|r| r.emoji == reaction.emoji) {
                    reactions.push(reaction);
                }
            }
        }
        Ok(reactions)
    }
}

/// Run `wait` under an optional deadline, ending early when `interrupt` fires.
///
/// The interrupt surfaces as a transport error so the engine still cleans up
/// the prompt message before the error reaches the caller.
async fn with_deadline<T, F, I>(
    deadline: Option<Duration>,
    interrupt: I,
    wait: F,
) -> Result<T, TransportError>
where
    F: Future<Output = Result<T, TransportError>>,
    I: Future<Output = ()>,
{
    let bounded = async {
        match deadline {
            Some(deadline) => tokio::time::timeout(deadline, wait)
                .await
                .map_err(|_| TransportError::Timeout)?,
            None => wait.await,
        }
    };

    tokio::select! {
        outcome = bounded => outcome,
        _ = interrupt => Err(TransportError::other(Interrupted)),
    }
}

async fn ctrl_c() {
    if signal::ctrl_c().await.is_err() {
        // No signal handler available: never interrupt
        std::future::pending::<()>().await;
    }
}

#[async_trait]
impl ChatTransport for ConsoleTransport {
    async fn send(
        &self,
        channel: &ChannelRef,
        content: Outgoing,
    ) -> Result<SentMessage, TransportError> {
        self.render(&content);
        Ok(SentMessage {
            id: MessageId::new(Uuid::new_v4().to_string()),
            channel: channel.clone(),
            author: self.bot.clone(),
            content,
            timestamp: Utc::now(),
        })
    }

    async fn delete(
        &self,
        message: &SentMessage,
        delay: Option<Duration>,
    ) -> Result<(), TransportError> {
        // Terminal output can not be taken back
        tracing::debug!(message = %message.id, delay = ?delay, "Message removed");
        Ok(())
    }

    async fn delete_reply(&self, reply: &Reply) -> Result<(), TransportError> {
        tracing::debug!(reply = %reply.id, "Reply removed");
        Ok(())
    }

    async fn await_reply(
        &self,
        channel: &ChannelRef,
        filter: ReplyFilter<'_>,
        options: AwaitOptions,
    ) -> Result<Vec<Reply>, TransportError> {
        with_deadline(
            options.deadline,
            ctrl_c(),
            self.collect_replies(channel, filter, options.max),
        )
        .await
    }

    async fn await_reactions(
        &self,
        _message: &SentMessage,
        filter: ReactionFilter<'_>,
        options: AwaitOptions,
    ) -> Result<Vec<Reaction>, TransportError> {
        self.print(&"(react by typing emoji separated by spaces)".dim().to_string());
        with_deadline(
            options.deadline,
            ctrl_c(),
            self.collect_reactions(filter, options.max),
        )
        .await
    }

    async fn attach_reaction(
        &self,
        _message: &SentMessage,
        emoji: &str,
    ) -> Result<(), TransportError> {
        self.print(&format!("[{}]", emoji).dim().to_string());
        Ok(())
    }
}

/// Read `#channel`, `@&role` and `@member` tokens out of a line
pub fn parse_mentions(line: &str) -> Mentions {
    let mut mentions = Mentions::default();
    for token in line.split_whitespace() {
        if let Some(role) = token.strip_prefix("@&") {
            if !role.is_empty() {
                mentions.roles.push(RoleId::new(role));
            }
        } else if let Some(member) = token.strip_prefix('@') {
            if !member.is_empty() {
                mentions.members.push(UserId::new(member));
            }
        } else if let Some(channel) = token.strip_prefix('#') {
            if !channel.is_empty() {
                mentions.channels.push(ChannelId::new(channel));
            }
        }
    }
    mentions
}

/// Every whitespace separated token on a line is one reaction by `user`
pub fn parse_reactions(line: &str, user: &UserId) -> Vec<Reaction> {
    line.split_whitespace()
        .map(|emoji| Reaction::new(emoji, user.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mentions() {
        let mentions = parse_mentions("#banter @&mods @alice hello # @");
        assert_eq!(mentions.channels, vec![ChannelId::new("banter")]);
        assert_eq!(mentions.roles, vec![RoleId::new("mods")]);
        assert_eq!(mentions.members, vec![UserId::new("alice")]);
    }

    #[test]
    fn test_parse_reactions() {
        let user = UserId::new("console");
        let reactions = parse_reactions("  🍎 🍐\t🍌 ", &user);
        let emoji: Vec<_> = reactions.iter().map(|r| r.emoji.as_str()).collect();
        assert_eq!(emoji, vec!["🍎", "🍐", "🍌"]);
        assert!(reactions.iter().all(|r| r.user == user && !r.bot));
    }

    #[tokio::test]
    async fn test_deadline_maps_to_timeout() {
        let result: Result<(), TransportError> = with_deadline(
            Some(Duration::from_millis(10)),
            std::future::pending(),
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            },
        )
        .await;
        assert!(matches!(result, Err(TransportError::Timeout)));
    }

    #[tokio::test]
    async fn test_interrupt_ends_wait_as_transport_error() {
        let result: Result<(), TransportError> =
            with_deadline(None, async {}, std::future::pending()).await;

        let error = result.unwrap_err();
        assert!(is_interrupt(&error));
        assert!(!is_interrupt(&TransportError::Timeout));
        assert!(!is_interrupt(&TransportError::other("stdin closed")));
    }
}
