//! Prompt families and the protocol they share

mod context;
pub mod format;
pub mod list;
pub mod mention;
pub mod message;
pub mod number;
mod reaction;
pub mod restricted;
pub mod retry;
pub mod special;
pub mod string;
pub mod validation;

pub use context::PromptContext;
pub use format::{format_prompt, InstructionType};
pub use list::ListPrompt;
pub use mention::{ChannelPrompt, MemberPrompt, RolePrompt};
pub use message::MessagePrompt;
pub use number::NumberPrompt;
pub use restricted::{Mention, Restrictable, RestrictedPrompt};
pub use special::SpecialPrompt;
pub use string::StringPrompt;
pub use validation::validate_prompt;

use crate::error::PromptError;
use crate::models::PromptSpec;
use async_trait::async_trait;

/// A prompt that resolves to one value per invocation.
///
/// Implemented by every single-value family so decorators such as
/// [`RestrictedPrompt`] can wrap any of them.
#[async_trait]
pub trait SinglePrompt: Send + Sync {
    type Output: Send;

    async fn invoke(&self, spec: &PromptSpec) -> Result<Self::Output, PromptError>;
}
