//! Prompt specifications: the raw request and its validated form

use super::message::{ChannelRef, UserId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long a prompt waits for its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeout {
    /// Wait until the user answers
    #[default]
    Unbounded,
    Seconds(u64),
}

impl Timeout {
    /// Build a timeout from seconds, 0 meaning no deadline
    pub fn from_secs(seconds: u64) -> Self {
        if seconds == 0 {
            Timeout::Unbounded
        } else {
            Timeout::Seconds(seconds)
        }
    }

    /// Normalize `Seconds(0)` to `Unbounded`
    pub fn normalized(self) -> Self {
        match self {
            Timeout::Seconds(0) => Timeout::Unbounded,
            other => other,
        }
    }

    /// Wait deadline handed to the transport; `None` waits forever
    pub fn deadline(self) -> Option<Duration> {
        match self.normalized() {
            Timeout::Unbounded => None,
            Timeout::Seconds(seconds) => Some(Duration::from_secs(seconds)),
        }
    }

    pub fn is_bounded(self) -> bool {
        self.deadline().is_some()
    }
}

/// A prompt as the caller describes it. Missing fields are filled in or
/// rejected by validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptRequest {
    pub text: Option<String>,
    pub channel: Option<ChannelRef>,
    pub user_id: Option<UserId>,
    pub timeout: Option<Timeout>,
    pub cancelable: Option<bool>,
}

impl PromptRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn channel(mut self, channel: ChannelRef) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn timeout(mut self, timeout: Timeout) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout_secs(self, seconds: u64) -> Self {
        self.timeout(Timeout::from_secs(seconds))
    }

    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = Some(cancelable);
        self
    }
}

/// A validated prompt. Immutable: wrapping layers derive new specs.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    text: String,
    channel: ChannelRef,
    user_id: UserId,
    timeout: Timeout,
    cancelable: bool,
}

impl PromptSpec {
    pub(crate) fn from_parts(
        text: String,
        channel: ChannelRef,
        user_id: UserId,
        timeout: Timeout,
        cancelable: bool,
    ) -> Self {
        Self {
            text,
            channel,
            user_id,
            timeout: timeout.normalized(),
            cancelable,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn channel(&self) -> &ChannelRef {
        &self.channel
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn timeout(&self) -> Timeout {
        self.timeout
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// New spec whose text is this one's followed by `extra`
    pub fn with_appended_text(&self, extra: &str) -> Self {
        Self {
            text: format!("{}{}", self.text, extra),
            ..self.clone()
        }
    }

    /// New spec with the body replaced, keeping channel, user, timeout and cancelability
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn with_cancelable(&self, cancelable: bool) -> Self {
        Self {
            cancelable,
            ..self.clone()
        }
    }
}
