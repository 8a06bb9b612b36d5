//! Prompt request validation
//!
//! Turns a caller's [`PromptRequest`] into a [`PromptSpec`], filling the
//! timeout and cancelability from [`PromptConfig`] when they are absent.

use crate::error::PromptError;
use crate::models::{PromptConfig, PromptRequest, PromptSpec};

/// Validate and normalize a prompt request
pub fn validate_prompt(
    request: PromptRequest,
    config: &PromptConfig,
) -> Result<PromptSpec, PromptError> {
    let text = match request.text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(PromptError::config("missing prompt text")),
    };

    let channel = request
        .channel
        .ok_or_else(|| PromptError::config("missing channel"))?;

    if !channel.kind.accepts_prompts() {
        return Err(PromptError::config(format!(
            "invalid channel kind {:?}: prompts need a text or direct message channel",
            channel.kind
        )));
    }

    let user_id = request
        .user_id
        .ok_or_else(|| PromptError::config("missing user id"))?;
    if user_id.as_str().trim().is_empty() {
        return Err(PromptError::config("missing user id"));
    }

    Ok(PromptSpec::from_parts(
        text,
        channel,
        user_id,
        request.timeout.unwrap_or(config.default_timeout),
        request.cancelable.unwrap_or(config.default_cancelable),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChannelKind, ChannelRef, Timeout, UserId};

    fn request() -> PromptRequest {
        PromptRequest::new("Which channel?")
            .channel(ChannelRef::text("general"))
            .user(UserId::new("0000"))
    }

    fn config_error(request: PromptRequest) -> String {
        match validate_prompt(request, &PromptConfig::default()) {
            Err(PromptError::Config(message)) => message,
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_are_filled() {
        let spec = validate_prompt(request(), &PromptConfig::default()).unwrap();
        assert_eq!(spec.timeout(), Timeout::Unbounded);
        assert!(!spec.cancelable());
        assert_eq!(spec.text(), "Which channel?");
    }

    #[test]
    fn test_injected_defaults() {
        let config = PromptConfig {
            default_timeout: Timeout::Seconds(20),
            default_cancelable: true,
            ..PromptConfig::default()
        };
        let spec = validate_prompt(request(), &config).unwrap();
        assert_eq!(spec.timeout(), Timeout::Seconds(20));
        assert!(spec.cancelable());

        let explicit = validate_prompt(request().timeout_secs(0).cancelable(false), &config)
            .unwrap();
        assert_eq!(explicit.timeout(), Timeout::Unbounded);
        assert!(!explicit.cancelable());
    }

    #[test]
    fn test_missing_text() {
        let mut missing = request();
        missing.text = None;
        assert!(config_error(missing).contains("missing prompt text"));

        let mut blank = request();
        blank.text = Some("   ".to_string());
        assert!(config_error(blank).contains("missing prompt text"));
    }

    #[test]
    fn test_missing_channel() {
        let mut missing = request();
        missing.channel = None;
        assert!(config_error(missing).contains("missing channel"));
    }

    #[test]
    fn test_invalid_channel_kind() {
        for kind in [ChannelKind::Voice, ChannelKind::Category, ChannelKind::Announcement] {
            let message = config_error(request().channel(ChannelRef::new("x", kind)));
            assert!(message.contains("invalid channel kind"));
        }
    }

    #[test]
    fn test_direct_message_channel_is_valid() {
        let spec = validate_prompt(
            request().channel(ChannelRef::direct("dm")),
            &PromptConfig::default(),
        )
        .unwrap();
        assert!(spec.channel().is_direct());
    }

    #[test]
    fn test_missing_user() {
        let mut missing = request();
        missing.user_id = None;
        assert!(config_error(missing).contains("missing user id"));
    }
}
