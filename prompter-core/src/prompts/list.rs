//! List prompts: reaction pickers over a few options and index choosers over
//! arbitrary lists

use super::context::PromptContext;
use super::format::{format_prompt, LINE};
use super::number::NumberPrompt;
use super::reaction::{await_reactions, ReactionRound};
use super::retry::sole;
use crate::error::PromptError;
use crate::models::{Outgoing, PickerOption, PromptSpec, RichContent};
use std::fmt::Display;

const PICKER_TIMEOUT_NOTICE: &str = "Time is up, please try again once you are ready.";
const CHOOSER_QUESTION: &str = "Please write down the option numbers you would like to choose.";

#[derive(Clone)]
pub struct ListPrompt {
    ctx: PromptContext,
    numbers: NumberPrompt,
}

impl ListPrompt {
    pub fn new(ctx: PromptContext, numbers: NumberPrompt) -> Self {
        Self { ctx, numbers }
    }

    /// Let the user pick one option by reacting with its emoji
    pub async fn single_reaction_picker(
        &self,
        spec: &PromptSpec,
        options: &[PickerOption],
    ) -> Result<PickerOption, PromptError> {
        self.multi_reaction_picker(spec, options, 1)
            .await
            .and_then(sole)
    }

    /// Let the user pick `count` options by reacting with their emoji.
    ///
    /// Works best with a handful of options. Not cancelable. The picked options
    /// come back in the order of `options`, not the order of the reactions.
    pub async fn multi_reaction_picker(
        &self,
        spec: &PromptSpec,
        options: &[PickerOption],
        count: usize,
    ) -> Result<Vec<PickerOption>, PromptError> {
        check_list(options.len(), count)?;
        for option in options {
            option.validate().map_err(PromptError::Config)?;
        }

        let spec = spec.with_cancelable(false).with_appended_text(&format!(
            "{}React to this message with the emoji to select that option!{}You should select {} option(s).",
            LINE, LINE, count
        ));

        let rich = options.iter().fold(
            RichContent::new(
                spec.user_id().to_string(),
                format!("Choose {} option(s)!", count),
                format_prompt(&spec),
            ),
            |rich, option| {
                rich.field(
                    format!("{} - {}", option.emoji, option.name),
                    option.description.clone(),
                )
            },
        );
        let emoji: Vec<String> = options.iter().map(|option| option.emoji.clone()).collect();

        let reactions = await_reactions(
            &self.ctx,
            Outgoing::Rich(rich),
            ReactionRound {
                spec: &spec,
                attach: &emoji,
                allowed: Some(&emoji),
                count,
                timeout_notice: PICKER_TIMEOUT_NOTICE,
            },
        )
        .await?;

        Ok(options
            .iter()
            .filter(|option| reactions.iter().any(|r| r.emoji == option.emoji))
            .cloned()
            .collect())
    }

    /// Let the user choose one item by writing its index
    pub async fn single_list_chooser<T: Display + Clone>(
        &self,
        spec: &PromptSpec,
        items: &[T],
    ) -> Result<T, PromptError> {
        self.multi_list_chooser(spec, items, 1).await.and_then(sole)
    }

    /// Let the user choose `count` distinct items by writing their indices.
    ///
    /// The numbered list is posted once and deleted when the chooser exits.
    /// Chosen items come back in list order.
    pub async fn multi_list_chooser<T: Display + Clone>(
        &self,
        spec: &PromptSpec,
        items: &[T],
        count: usize,
    ) -> Result<Vec<T>, PromptError> {
        check_list(items.len(), count)?;

        let listing: String = items
            .iter()
            .enumerate()
            .map(|(index, item)| format!("\n{} - {}", index, item))
            .collect();
        let rich = RichContent::new(
            spec.user_id().to_string(),
            format!("Select {} option(s)!", count),
            format!("{}{}", spec.text(), listing),
        );

        let sent = self
            .ctx
            .transport()
            .send(spec.channel(), Outgoing::Rich(rich))
            .await?;
        let outcome = self.choose(spec, items, count).await;
        self.ctx.release(&sent, outcome).await
    }

    async fn choose<T: Clone>(
        &self,
        spec: &PromptSpec,
        items: &[T],
        count: usize,
    ) -> Result<Vec<T>, PromptError> {
        let question = spec.with_text(CHOOSER_QUESTION);
        let mut attempts = self.ctx.attempts("list_chooser");

        loop {
            attempts.begin()?;
            let numbers = self.numbers.multi(&question, Some(count)).await?;
            let chosen: Vec<T> = items
                .iter()
                .enumerate()
                .filter(|(index, _)| numbers.iter().any(|&n| n == *index as i64))
                .map(|(_, item)| item.clone())
                .collect();

            if chosen.len() == count {
                return Ok(chosen);
            }

            let notice = format!("You need to respond with {} valid number(s).", count);
            attempts.reject(spec.channel(), &notice);
            self.ctx
                .notice(spec.channel(), spec.user_id(), &notice)
                .await?;
        }
    }
}

/// A list prompt needs at least one entry and a satisfiable count
fn check_list(len: usize, count: usize) -> Result<(), PromptError> {
    if len == 0 {
        return Err(PromptError::config("list prompt needs at least one option"));
    }
    if count == 0 || count > len {
        return Err(PromptError::config(format!(
            "can not select {} of {} option(s)",
            count, len
        )));
    }
    Ok(())
}
