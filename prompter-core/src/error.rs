//! Error taxonomy for prompts and the transport collaborator

use thiserror::Error;

/// Errors reported by a [`ChatTransport`](crate::transport::ChatTransport).
#[derive(Error, Debug)]
pub enum TransportError {
    /// The wait deadline elapsed before enough qualifying events arrived.
    #[error("wait deadline elapsed")]
    Timeout,

    /// Any other platform failure. Passed through to callers untouched.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wrap an arbitrary platform error
    pub fn other<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Other(error.into())
    }
}

/// Outcome of a prompt that did not resolve to a value.
///
/// Malformed answers (wrong count, unparseable input, restricted collisions)
/// never appear here: they are handled by re-prompting.
#[derive(Error, Debug)]
pub enum PromptError {
    /// The prompt specification is malformed. Never retried.
    #[error("invalid prompt configuration: {0}")]
    Config(String),

    /// No qualifying response arrived before the deadline.
    #[error("Prompt timed out.")]
    TimedOut,

    /// The user answered with "cancel" on a cancelable prompt.
    #[error("Prompt was canceled by user.")]
    Canceled,

    /// A restricted prompt compared values of different categories.
    #[error("list and response items do not match: expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The configured attempt ceiling was reached without a valid answer.
    #[error("no valid answer after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl PromptError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_pass_through_unchanged() {
        let err: PromptError = TransportError::other("socket closed").into();
        assert_eq!(err.to_string(), "socket closed");
        assert!(matches!(err, PromptError::Transport(TransportError::Other(_))));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(PromptError::TimedOut.to_string(), "Prompt timed out.");
        assert_eq!(PromptError::Canceled.to_string(), "Prompt was canceled by user.");
        assert!(PromptError::config("missing channel")
            .to_string()
            .contains("missing channel"));
    }
}
