//! Number prompts

use super::format::InstructionType;
use super::message::MessagePrompt;
use super::retry::{check_cardinality, require_count, sole, Cardinality};
use super::SinglePrompt;
use crate::error::PromptError;
use crate::models::PromptSpec;
use async_trait::async_trait;

/// Prompts for whole numbers.
#[derive(Clone)]
pub struct NumberPrompt {
    base: MessagePrompt,
}

impl NumberPrompt {
    pub fn new(base: MessagePrompt) -> Self {
        Self { base }
    }

    /// Ask for exactly one number
    pub async fn single(&self, spec: &PromptSpec) -> Result<i64, PromptError> {
        self.multi(spec, Some(1)).await.and_then(sole)
    }

    /// Ask for numbers, exactly `count` of them when bounded.
    ///
    /// Every whitespace separated token must parse; otherwise the user is
    /// told so and asked again.
    pub async fn multi(
        &self,
        spec: &PromptSpec,
        count: Option<usize>,
    ) -> Result<Vec<i64>, PromptError> {
        require_count(count)?;
        let ctx = self.base.context();
        let mut attempts = ctx.attempts("number");

        loop {
            attempts.begin()?;
            let reply = self
                .base
                .instruction_prompt(spec, InstructionType::Number, count)
                .await?;

            let notice = match parse_numbers(&reply.clean_content) {
                Err(token) => format!(
                    "\"{}\" is not a number! Respond with numbers only. Try again!",
                    token
                ),
                Ok(numbers) => match check_cardinality(numbers.len(), count) {
                    Cardinality::Accepted => return Ok(numbers),
                    Cardinality::WrongCount(expected) => format!(
                        "You should only respond with {} number(s)! Try again!",
                        expected
                    ),
                    Cardinality::Empty => {
                        "You need to respond with at least one number! Try again!".to_string()
                    }
                },
            };

            attempts.reject(spec.channel(), &notice);
            ctx.notice(spec.channel(), spec.user_id(), &notice).await?;
        }
    }
}

#[async_trait]
impl SinglePrompt for NumberPrompt {
    type Output = i64;

    async fn invoke(&self, spec: &PromptSpec) -> Result<i64, PromptError> {
        self.single(spec).await
    }
}

/// Parse every whitespace separated token, returning the first bad token on failure
pub(crate) fn parse_numbers(text: &str) -> Result<Vec<i64>, String> {
    text.split_whitespace()
        .map(|token| token.parse::<i64>().map_err(|_| token.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_numbers("1 23"), Ok(vec![1, 23]));
        assert_eq!(parse_numbers("  -4\t7 "), Ok(vec![-4, 7]));
        assert_eq!(parse_numbers(""), Ok(vec![]));
    }

    #[test]
    fn test_any_bad_token_invalidates_response() {
        assert_eq!(parse_numbers("1 asdf"), Err("asdf".to_string()));
        assert_eq!(parse_numbers("1 2 asdf"), Err("asdf".to_string()));
        assert_eq!(parse_numbers("1.5"), Err("1.5".to_string()));
    }
}
