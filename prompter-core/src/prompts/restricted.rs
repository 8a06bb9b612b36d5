//! Restricted decorator: re-prompt until the answer is not already taken

use super::context::PromptContext;
use super::SinglePrompt;
use crate::error::PromptError;
use crate::models::{ChannelId, PromptSpec, RoleId, UserId};
use std::fmt;

const NOT_VALID: &str = "The response is not valid please try again!";

/// A value a restricted prompt can compare against its unavailable list
pub trait Restrictable: PartialEq + fmt::Display + Send + Sync {
    /// Category name; values of different categories never compare
    fn category(&self) -> &'static str;
}

impl Restrictable for ChannelId {
    fn category(&self) -> &'static str {
        "channel"
    }
}

impl Restrictable for RoleId {
    fn category(&self) -> &'static str {
        "role"
    }
}

impl Restrictable for UserId {
    fn category(&self) -> &'static str {
        "member"
    }
}

impl Restrictable for String {
    fn category(&self) -> &'static str {
        "text"
    }
}

impl Restrictable for i64 {
    fn category(&self) -> &'static str {
        "number"
    }
}

/// Any mention, for prompts whose value category is only known at runtime
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mention {
    Channel(ChannelId),
    Role(RoleId),
    Member(UserId),
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mention::Channel(id) => fmt::Display::fmt(id, f),
            Mention::Role(id) => fmt::Display::fmt(id, f),
            Mention::Member(id) => fmt::Display::fmt(id, f),
        }
    }
}

impl Restrictable for Mention {
    fn category(&self) -> &'static str {
        match self {
            Mention::Channel(id) => id.category(),
            Mention::Role(id) => id.category(),
            Mention::Member(id) => id.category(),
        }
    }
}

impl From<ChannelId> for Mention {
    fn from(id: ChannelId) -> Self {
        Mention::Channel(id)
    }
}

impl From<RoleId> for Mention {
    fn from(id: RoleId) -> Self {
        Mention::Role(id)
    }
}

impl From<UserId> for Mention {
    fn from(id: UserId) -> Self {
        Mention::Member(id)
    }
}

/// Wraps any [`SinglePrompt`] so that answers from an unavailable list are refused.
#[derive(Clone)]
pub struct RestrictedPrompt {
    ctx: PromptContext,
}

impl RestrictedPrompt {
    pub fn new(ctx: PromptContext) -> Self {
        Self { ctx }
    }

    /// Ask through `prompt` until the answer is not in `unavailable`.
    ///
    /// The unavailable values are listed in the prompt text.
    ///
    /// # Errors
    /// [`PromptError::TypeMismatch`] when the answer's category differs from
    /// the unavailable list's, plus whatever the wrapped prompt fails with.
    pub async fn single<P>(
        &self,
        prompt: &P,
        spec: &PromptSpec,
        unavailable: &[P::Output],
    ) -> Result<P::Output, PromptError>
    where
        P: SinglePrompt + ?Sized,
        P::Output: Restrictable,
    {
        let listed: Vec<String> = unavailable.iter().map(ToString::to_string).collect();
        let spec = spec.with_appended_text(&format!(
            " \n Unavailable responses: {}",
            listed.join(", ")
        ));
        let mut attempts = self.ctx.attempts("restricted");

        loop {
            attempts.begin()?;
            let response = prompt.invoke(&spec).await?;

            if let Some(first) = unavailable.first() {
                if first.category() != response.category() {
                    return Err(PromptError::TypeMismatch {
                        expected: first.category(),
                        found: response.category(),
                    });
                }
            }

            if !unavailable.contains(&response) {
                return Ok(response);
            }

            attempts.reject(spec.channel(), NOT_VALID);
            self.ctx
                .notice(spec.channel(), spec.user_id(), NOT_VALID)
                .await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mention_categories() {
        assert_eq!(Mention::from(ChannelId::new("1")).category(), "channel");
        assert_eq!(Mention::from(RoleId::new("1")).category(), "role");
        assert_eq!(Mention::from(UserId::new("1")).category(), "member");
        assert_eq!(Mention::from(RoleId::new("5")).to_string(), "<@&5>");
    }
}
