//! Logging service

use crate::models::{ChannelRef, LogLevel};

/// Initialize logging with the specified level
pub fn init_logging(
    level: LogLevel,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match level {
        LogLevel::Error => "prompter=error,prompter_core=error",
        LogLevel::Warn => "prompter=warn,prompter_core=warn",
        LogLevel::Info => "prompter=info,prompter_core=info",
        LogLevel::Debug => "prompter=debug,prompter_core=debug",
        LogLevel::Trace => "prompter=trace,prompter_core=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()?;

    Ok(())
}

/// Log a prompt lifecycle event
pub fn log_prompt_event(event_type: &str, channel: &ChannelRef, details: Option<&str>) {
    tracing::info!(
        event_type = event_type,
        channel = channel.id.as_str(),
        details = details.unwrap_or(""),
        "Prompt event"
    );
}

/// Log an answer that was rejected and will be asked for again
pub fn log_reprompt(prompt: &str, channel: &ChannelRef, attempt: u32, reason: &str) {
    tracing::debug!(
        prompt = prompt,
        channel = channel.id.as_str(),
        attempt = attempt,
        reason = reason,
        "Re-prompting"
    );
}

/// Log a failure that is not surfaced to the caller
pub fn log_error(error: &str, context: Option<&str>) {
    tracing::warn!(
        error = error,
        context = context.unwrap_or(""),
        "Suppressed prompt error"
    );
}
