//! Identifiers, channel references and the messages exchanged with a transport

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $mention:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, $mention, self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

id_type!(
    /// Platform user id. Displays as a user mention.
    UserId,
    "<@{}>"
);
id_type!(
    /// Platform channel id. Displays as a channel mention.
    ChannelId,
    "<#{}>"
);
id_type!(
    /// Platform role id. Displays as a role mention.
    RoleId,
    "<@&{}>"
);

/// Platform message id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of channel a prompt can be sent on or a reply can arrive from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "dm")]
    DirectMessage,
    #[serde(rename = "voice")]
    Voice,
    #[serde(rename = "category")]
    Category,
    #[serde(rename = "announcement")]
    Announcement,
}

impl ChannelKind {
    /// Whether prompts may be sent on this kind of channel
    pub fn accepts_prompts(self) -> bool {
        matches!(self, ChannelKind::Text | ChannelKind::DirectMessage)
    }
}

/// A channel together with its kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    pub id: ChannelId,
    pub kind: ChannelKind,
}

impl ChannelRef {
    pub fn new(id: impl Into<String>, kind: ChannelKind) -> Self {
        Self {
            id: ChannelId::new(id),
            kind,
        }
    }

    pub fn text(id: impl Into<String>) -> Self {
        Self::new(id, ChannelKind::Text)
    }

    pub fn direct(id: impl Into<String>) -> Self {
        Self::new(id, ChannelKind::DirectMessage)
    }

    pub fn is_direct(&self) -> bool {
        self.kind == ChannelKind::DirectMessage
    }
}

/// Everything a reply mentions, in the order the platform reported it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentions {
    #[serde(default)]
    pub channels: Vec<ChannelId>,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    #[serde(default)]
    pub members: Vec<UserId>,
}

/// A reply message authored by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: MessageId,
    pub author: UserId,
    /// Channel the reply arrived on
    pub channel: ChannelRef,
    /// Raw content, mentions left as platform markup
    pub content: String,
    /// Content with mentions rendered as readable names
    pub clean_content: String,
    #[serde(default)]
    pub mentions: Mentions,
    pub timestamp: DateTime<Utc>,
}

impl Reply {
    /// Create a plain text reply whose clean content equals its raw content
    pub fn new(
        id: impl Into<String>,
        author: UserId,
        channel: ChannelRef,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            id: MessageId::new(id),
            author,
            channel,
            clean_content: content.clone(),
            content,
            mentions: Mentions::default(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_clean_content(mut self, clean_content: impl Into<String>) -> Self {
        self.clean_content = clean_content.into();
        self
    }

    pub fn with_mentions(mut self, mentions: Mentions) -> Self {
        self.mentions = mentions;
        self
    }

    /// Whether the trimmed, lower-cased content equals `word`
    pub fn is_word(&self, word: &str) -> bool {
        self.content.trim().to_lowercase() == word
    }
}

/// A reaction placed on a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// Unicode emoji token
    pub emoji: String,
    pub user: UserId,
    #[serde(default)]
    pub bot: bool,
}

impl Reaction {
    pub fn new(emoji: impl Into<String>, user: UserId) -> Self {
        Self {
            emoji: emoji.into(),
            user,
            bot: false,
        }
    }

    pub fn from_bot(emoji: impl Into<String>, user: UserId) -> Self {
        Self {
            bot: true,
            ..Self::new(emoji, user)
        }
    }
}

/// One titled field of rich content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichField {
    pub name: String,
    pub value: String,
}

/// Rich (embed-like) content. Rendering is the transport's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichContent {
    /// Plain text sent alongside the rich body (usually the user mention)
    pub content: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub fields: Vec<RichField>,
}

impl RichContent {
    pub fn new(
        content: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            title: title.into(),
            description: description.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(RichField {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

/// Content to post on a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outgoing {
    Text { text: String },
    Rich(RichContent),
}

impl Outgoing {
    pub fn text(text: impl Into<String>) -> Self {
        Outgoing::Text { text: text.into() }
    }

    /// Plain text view of the content, used for logging and console rendering
    pub fn summary(&self) -> &str {
        match self {
            Outgoing::Text { text } => text,
            Outgoing::Rich(rich) => &rich.title,
        }
    }
}

/// Handle to a message the engine posted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentMessage {
    pub id: MessageId,
    pub channel: ChannelRef,
    pub author: UserId,
    pub content: Outgoing,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display_as_mentions() {
        assert_eq!(UserId::new("42").to_string(), "<@42>");
        assert_eq!(ChannelId::new("7").to_string(), "<#7>");
        assert_eq!(RoleId::new("9").to_string(), "<@&9>");
        assert_eq!(MessageId::new("m1").to_string(), "m1");
    }

    #[test]
    fn test_channel_kinds_accepting_prompts() {
        assert!(ChannelKind::Text.accepts_prompts());
        assert!(ChannelKind::DirectMessage.accepts_prompts());
        assert!(!ChannelKind::Voice.accepts_prompts());
        assert!(!ChannelKind::Category.accepts_prompts());
        assert!(!ChannelKind::Announcement.accepts_prompts());
    }

    #[test]
    fn test_reply_word_matching() {
        let reply = Reply::new("1", UserId::new("u"), ChannelRef::text("c"), "  CanCel ");
        assert!(reply.is_word("cancel"));
        assert!(!reply.is_word("yes"));
    }

    #[test]
    fn test_outgoing_serialization() {
        let outgoing = Outgoing::text("hello");
        let json = serde_json::to_value(&outgoing).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "hello");
    }
}
