//! Free text prompts, optionally restricted to a set of allowed words

use super::format::LINE;
use super::message::MessagePrompt;
use super::retry::{require_count, sole};
use super::SinglePrompt;
use crate::error::PromptError;
use crate::models::PromptSpec;
use async_trait::async_trait;

#[derive(Clone)]
pub struct StringPrompt {
    base: MessagePrompt,
}

impl StringPrompt {
    pub fn new(base: MessagePrompt) -> Self {
        Self { base }
    }

    /// Ask for free text; returns the reply's clean content
    pub async fn single(&self, spec: &PromptSpec) -> Result<String, PromptError> {
        let reply = self.base.prompt(spec).await?;
        Ok(reply.clean_content)
    }

    /// Ask for one of `allowed` (case sensitive)
    pub async fn restricted<S: AsRef<str>>(
        &self,
        spec: &PromptSpec,
        allowed: &[S],
    ) -> Result<String, PromptError> {
        self.multi_restricted(spec, allowed, 1).await.and_then(sole)
    }

    /// Ask for exactly `count` words out of `allowed` (case sensitive).
    ///
    /// The answer is split on whitespace. Results follow the order of `allowed`.
    pub async fn multi_restricted<S: AsRef<str>>(
        &self,
        spec: &PromptSpec,
        allowed: &[S],
        count: usize,
    ) -> Result<Vec<String>, PromptError> {
        require_count(Some(count))?;
        if allowed.is_empty() {
            return Err(PromptError::config("restricted prompt needs allowed responses"));
        }

        let options: Vec<&str> = allowed.iter().map(AsRef::as_ref).collect();
        let spec = spec.with_appended_text(&format!(
            "{}Your options are (case sensitive): {}",
            LINE,
            options.join(", ")
        ));
        let ctx = self.base.context();
        let mut attempts = ctx.attempts("string");

        loop {
            attempts.begin()?;
            let response = self.single(&spec).await?;
            let words: Vec<&str> = response.split_whitespace().collect();

            let notice = if words.len() != count {
                format!(
                    "You have given {} but I expect only {}. Try again!",
                    words.len(),
                    count
                )
            } else {
                let chosen: Vec<String> = options
                    .iter()
                    .filter(|option| words.contains(*option))
                    .map(|option| option.to_string())
                    .collect();
                if chosen.len() == count {
                    return Ok(chosen);
                }
                format!(
                    "Try again! You need to respond with {} of the valid options!",
                    count
                )
            };

            attempts.reject(spec.channel(), &notice);
            ctx.notice(spec.channel(), spec.user_id(), &notice).await?;
        }
    }
}

#[async_trait]
impl SinglePrompt for StringPrompt {
    type Output = String;

    async fn invoke(&self, spec: &PromptSpec) -> Result<String, PromptError> {
        self.single(spec).await
    }
}
