//! # Prompter Core Library
//!
//! Prompt-response protocol for turn-based chat conversations: send a question,
//! await a qualifying reply or reaction within a deadline, validate it, and
//! re-prompt with corrective guidance until the answer is usable.

pub mod error;
pub mod models;
pub mod prompter;
pub mod prompts;
pub mod services;
pub mod transport;

pub use error::{PromptError, TransportError};
pub use prompter::Prompter;
