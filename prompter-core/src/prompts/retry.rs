//! Attempt accounting for re-prompt loops

use crate::error::PromptError;
use crate::models::ChannelRef;
use crate::services::logging;

/// Counts the attempts of one re-prompt loop and enforces the optional ceiling.
#[derive(Debug)]
pub struct Attempts {
    prompt: &'static str,
    made: u32,
    max: Option<u32>,
}

impl Attempts {
    pub fn new(prompt: &'static str, max: Option<u32>) -> Self {
        Self {
            prompt,
            made: 0,
            max,
        }
    }

    /// Start the next attempt, failing once the ceiling has been reached
    pub fn begin(&mut self) -> Result<u32, PromptError> {
        if let Some(max) = self.max {
            if self.made >= max {
                return Err(PromptError::AttemptsExhausted {
                    attempts: self.made,
                });
            }
        }
        self.made += 1;
        Ok(self.made)
    }

    /// Record why the current attempt's answer was rejected
    pub fn reject(&self, channel: &ChannelRef, reason: &str) {
        logging::log_reprompt(self.prompt, channel, self.made, reason);
    }

    /// Attempts started so far
    pub fn made(&self) -> u32 {
        self.made
    }
}

/// How an extracted answer set compares to the requested count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cardinality {
    Accepted,
    WrongCount(usize),
    Empty,
}

pub(crate) fn check_cardinality(len: usize, count: Option<usize>) -> Cardinality {
    match count {
        Some(expected) if len != expected => Cardinality::WrongCount(expected),
        _ if len == 0 => Cardinality::Empty,
        _ => Cardinality::Accepted,
    }
}

/// Take the only value of a single-answer set; an empty set means no answer arrived
pub(crate) fn sole<T>(values: Vec<T>) -> Result<T, PromptError> {
    values.into_iter().next().ok_or(PromptError::TimedOut)
}

/// Reject counts that can never be satisfied
pub(crate) fn require_count(count: Option<usize>) -> Result<(), PromptError> {
    if count == Some(0) {
        return Err(PromptError::config("count must be at least 1"));
    }
    Ok(())
}
