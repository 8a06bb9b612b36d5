//! Special prompts: reactions, emoji and yes/no answers

use super::format::{format_prompt, InstructionType, LINE};
use super::message::MessagePrompt;
use super::reaction::{await_reactions, ReactionRound};
use super::retry::{require_count, sole};
use crate::error::PromptError;
use crate::models::{Outgoing, PromptSpec, Reaction};

const TIMEOUT_NOTICE: &str =
    "Time is up, please try again once you are ready, we recommend you think of the emoji to use first.";
const EMOJI_IN_USE: &str = "That emoji is already in use! Select another emoji!";

#[derive(Clone)]
pub struct SpecialPrompt {
    base: MessagePrompt,
}

impl SpecialPrompt {
    pub fn new(base: MessagePrompt) -> Self {
        Self { base }
    }

    /// Emoji of a single reaction
    pub async fn single_emoji(&self, spec: &PromptSpec) -> Result<String, PromptError> {
        Ok(self.single_reaction(spec).await?.emoji)
    }

    /// Emoji of a single reaction that is not in `unavailable`
    pub async fn single_restricted_emoji<S: AsRef<str>>(
        &self,
        spec: &PromptSpec,
        unavailable: &[S],
    ) -> Result<String, PromptError> {
        Ok(self
            .single_restricted_reaction(spec, unavailable)
            .await?
            .emoji)
    }

    /// Wait for one reaction on the prompt message. Not cancelable.
    pub async fn single_reaction(&self, spec: &PromptSpec) -> Result<Reaction, PromptError> {
        self.multi_reaction(spec, 1).await.and_then(sole)
    }

    /// Wait for one reaction whose emoji is not in `unavailable`, asking again
    /// after each collision.
    pub async fn single_restricted_reaction<S: AsRef<str>>(
        &self,
        spec: &PromptSpec,
        unavailable: &[S],
    ) -> Result<Reaction, PromptError> {
        let ctx = self.base.context();
        let mut attempts = ctx.attempts("restricted_reaction");

        loop {
            attempts.begin()?;
            let reaction = self.single_reaction(spec).await?;
            if !unavailable.iter().any(|emoji| emoji.as_ref() == reaction.emoji) {
                return Ok(reaction);
            }
            attempts.reject(spec.channel(), EMOJI_IN_USE);
            ctx.notice(spec.channel(), spec.user_id(), EMOJI_IN_USE)
                .await?;
        }
    }

    /// Wait for `count` distinct reactions on the prompt message.
    ///
    /// Reaction prompts can not be canceled, whatever `spec` says.
    pub async fn multi_reaction(
        &self,
        spec: &PromptSpec,
        count: usize,
    ) -> Result<Vec<Reaction>, PromptError> {
        require_count(Some(count))?;
        let spec = spec.with_cancelable(false).with_appended_text(&format!(
            "{}React to this message with the emojis.{}You should react with {} different emoji(s).",
            LINE, LINE, count
        ));

        await_reactions(
            self.base.context(),
            Outgoing::text(format_prompt(&spec)),
            ReactionRound {
                spec: &spec,
                attach: &[],
                allowed: None,
                count,
                timeout_notice: TIMEOUT_NOTICE,
            },
        )
        .await
    }

    /// Ask a yes/no question. Any other answer silently asks again.
    pub async fn boolean(&self, spec: &PromptSpec) -> Result<bool, PromptError> {
        let mut attempts = self.base.context().attempts("boolean");

        loop {
            attempts.begin()?;
            let reply = self
                .base
                .instruction_prompt(spec, InstructionType::Boolean, None)
                .await?;
            match reply.clean_content.trim().to_lowercase().as_str() {
                "yes" => return Ok(true),
                "no" => return Ok(false),
                _ => attempts.reject(spec.channel(), "not yes or no"),
            }
        }
    }
}
