//! Base message prompt: send, await one reply, clean up, honor cancel

use super::context::PromptContext;
use super::format::{format_prompt, instruction_lines, InstructionType};
use crate::error::{PromptError, TransportError};
use crate::models::{Outgoing, PromptSpec, Reply};
use crate::services::logging;
use crate::transport::AwaitOptions;

const TIMEOUT_NOTICE: &str = "Time is up, please try again once you are ready, we recommend you write the message first, then react, then send the message.";

/// The text prompt every typed prompt is built on.
#[derive(Clone)]
pub struct MessagePrompt {
    ctx: PromptContext,
}

impl MessagePrompt {
    pub fn new(ctx: PromptContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &PromptContext {
        &self.ctx
    }

    /// Ask `spec` and return the user's reply.
    ///
    /// The prompt message is deleted on every exit path. The reply is deleted
    /// too unless it came over a direct message channel.
    ///
    /// # Errors
    /// [`PromptError::TimedOut`] when the deadline elapses,
    /// [`PromptError::Canceled`] when a cancelable prompt is answered with
    /// "cancel", and any transport failure unchanged.
    pub async fn prompt(&self, spec: &PromptSpec) -> Result<Reply, PromptError> {
        let transport = self.ctx.transport();
        let sent = transport
            .send(spec.channel(), Outgoing::text(format_prompt(spec)))
            .await?;
        logging::log_prompt_event("prompt_sent", spec.channel(), Some(spec.text()));

        let outcome = self.await_one(spec).await;
        let reply = self.ctx.release(&sent, outcome).await?;

        if !reply.channel.is_direct() {
            transport.delete_reply(&reply).await?;
        }

        if spec.cancelable() && reply.is_word("cancel") {
            logging::log_prompt_event("prompt_canceled", spec.channel(), None);
            return Err(PromptError::Canceled);
        }

        Ok(reply)
    }

    /// Ask `spec` with the instruction line for `kind` appended, plus a
    /// count hint when `count` is bounded (never for boolean prompts).
    pub async fn instruction_prompt(
        &self,
        spec: &PromptSpec,
        kind: InstructionType,
        count: Option<usize>,
    ) -> Result<Reply, PromptError> {
        let spec = spec.with_appended_text(&instruction_lines(kind, count));
        self.prompt(&spec).await
    }

    async fn await_one(&self, spec: &PromptSpec) -> Result<Reply, PromptError> {
        let user = spec.user_id();
        let filter = |reply: &Reply| &reply.author == user;
        let options = AwaitOptions::new(1, spec.timeout().deadline());

        match self
            .ctx
            .transport()
            .await_reply(spec.channel(), &filter, options)
            .await
        {
            Ok(mut replies) if !replies.is_empty() => Ok(replies.swap_remove(0)),
            Ok(_) | Err(TransportError::Timeout) => {
                logging::log_prompt_event("prompt_timed_out", spec.channel(), None);
                self.ctx
                    .timeout_notice(spec.channel(), user, TIMEOUT_NOTICE)
                    .await?;
                Err(PromptError::TimedOut)
            }
            Err(err) => Err(err.into()),
        }
    }
}
