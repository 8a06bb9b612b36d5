//! Reaction wait shared by the special prompts and the reaction pickers

use super::context::PromptContext;
use crate::error::{PromptError, TransportError};
use crate::models::{Outgoing, PromptSpec, Reaction, SentMessage};
use crate::services::logging;
use crate::transport::AwaitOptions;

/// One reaction round: which reactions count on the posted message
pub(crate) struct ReactionRound<'a> {
    pub spec: &'a PromptSpec,
    /// Emoji attached to the message, in order, before waiting
    pub attach: &'a [String],
    /// Only these emoji count; `None` accepts any emoji
    pub allowed: Option<&'a [String]>,
    pub count: usize,
    pub timeout_notice: &'static str,
}

/// Post `content`, wait for `count` distinct reactions from the prompted
/// user, and delete the message on every exit path.
pub(crate) async fn await_reactions(
    ctx: &PromptContext,
    content: Outgoing,
    round: ReactionRound<'_>,
) -> Result<Vec<Reaction>, PromptError> {
    let spec = round.spec;
    let sent = ctx.transport().send(spec.channel(), content).await?;
    logging::log_prompt_event("reaction_prompt_sent", spec.channel(), Some(spec.text()));

    let outcome = collect(ctx, &sent, &round).await;
    ctx.release(&sent, outcome).await
}

async fn collect(
    ctx: &PromptContext,
    sent: &SentMessage,
    round: &ReactionRound<'_>,
) -> Result<Vec<Reaction>, PromptError> {
    let transport = ctx.transport();
    for emoji in round.attach {
        transport.attach_reaction(sent, emoji).await?;
    }

    let user = round.spec.user_id();
    let allowed = round.allowed;
    let filter = |reaction: &Reaction| {
        !reaction.bot
            && &reaction.user == user
            && allowed.map_or(true, |allowed| allowed.contains(&reaction.emoji))
    };
    let options = AwaitOptions::new(round.count, round.spec.timeout().deadline());

    match transport.await_reactions(sent, &filter, options).await {
        // A wait that ends short of `count` ran out of time
        Ok(reactions) if reactions.len() >= round.count => Ok(reactions),
        Ok(_) | Err(TransportError::Timeout) => {
            logging::log_prompt_event("reaction_prompt_timed_out", round.spec.channel(), None);
            ctx.timeout_notice(round.spec.channel(), user, round.timeout_notice)
                .await?;
            Err(PromptError::TimedOut)
        }
        Err(err) => Err(err.into()),
    }
}
