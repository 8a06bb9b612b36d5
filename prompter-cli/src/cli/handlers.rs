//! Command handlers: one prompt per invocation on the console transport

use crate::console::{is_interrupt, ConsoleTransport};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use prompter_core::models::{
    ChannelRef, LogLevel, PickerOption, PromptConfig, PromptRequest, PromptSpec, UserId,
};
use prompter_core::{PromptError, Prompter};
use serde_json::{json, Value};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

/// Options shared by every prompt command
#[derive(Args, Debug, Clone)]
pub struct PromptArgs {
    /// Prompt text shown to the user
    pub text: String,

    /// Response timeout in seconds (0 = no timeout, default from config)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Allow answering "cancel" to abort the prompt
    #[arg(long)]
    pub cancelable: bool,
}

/// What a mention prompt asks for
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionKind {
    Channel,
    Member,
    Role,
}

/// Everything a prompt command needs: the engine, who is asked, and where
pub struct Session {
    prompter: Prompter,
    user: UserId,
    channel: ChannelRef,
    json: bool,
}

impl Session {
    /// Build a session on the console transport
    pub fn open(config: PromptConfig, user: String, channel: String, json: bool) -> Self {
        let user = UserId::new(user);
        let transport = Arc::new(ConsoleTransport::new(user.clone(), json));
        Self {
            prompter: Prompter::new(transport).with_config(config),
            user,
            channel: ChannelRef::direct(channel),
            json,
        }
    }

    fn spec(&self, args: &PromptArgs) -> Result<PromptSpec, PromptError> {
        let mut request = PromptRequest::new(args.text.clone())
            .channel(self.channel.clone())
            .user(self.user.clone());
        if let Some(timeout) = args.timeout {
            request = request.timeout_secs(timeout);
        }
        if args.cancelable {
            request = request.cancelable(true);
        }
        self.prompter.spec(request)
    }

    /// Await a prompt and print its outcome.
    ///
    /// Ctrl+C ends the pending wait inside the console transport, so the
    /// prompt still cleans up before it is reported as a cancel.
    async fn finish<F>(&self, prompt: F) -> Result<()>
    where
        F: Future<Output = Result<(Value, String), PromptError>>,
    {
        match prompt.await {
            Ok((value, text)) => {
                if self.json {
                    let response = json!({
                        "response": value,
                        "channel": self.channel.id,
                        "timestamp": chrono::Utc::now().to_rfc3339()
                    });
                    println!("{}", serde_json::to_string_pretty(&response)?);
                } else {
                    println!("{}", text);
                }
                Ok(())
            }
            Err(error) => {
                if self.json {
                    let response = json!({
                        "error": error_kind(&error),
                        "message": error.to_string(),
                        "channel": self.channel.id,
                        "timestamp": chrono::Utc::now().to_rfc3339()
                    });
                    println!("{}", serde_json::to_string_pretty(&response)?);
                } else {
                    match error_kind(&error) {
                        "timeout" => println!("⏱️  {}", error),
                        "cancelled" => println!("⚠️  {}", error),
                        _ => {}
                    }
                }
                Err(error.into())
            }
        }
    }
}

fn error_kind(error: &PromptError) -> &'static str {
    match error {
        PromptError::Config(_) => "config",
        PromptError::TimedOut => "timeout",
        PromptError::Canceled => "cancelled",
        PromptError::Transport(source) if is_interrupt(source) => "cancelled",
        PromptError::TypeMismatch { .. } => "type_mismatch",
        PromptError::AttemptsExhausted { .. } => "attempts_exhausted",
        PromptError::Transport(_) => "transport",
    }
}

/// Handle the 'ask' command
pub async fn handle_ask(
    session: &Session,
    args: PromptArgs,
    options: Vec<String>,
    unavailable: Vec<String>,
    count: usize,
) -> Result<()> {
    let prompter = &session.prompter;
    session
        .finish(async {
            let spec = session.spec(&args)?;
            let answers = if !options.is_empty() {
                prompter
                    .string()
                    .multi_restricted(&spec, &options, count)
                    .await?
            } else if !unavailable.is_empty() {
                let restricted = prompter.restricted();
                vec![
                    restricted
                        .single(&prompter.string(), &spec, &unavailable)
                        .await?,
                ]
            } else {
                vec![prompter.string().single(&spec).await?]
            };
            let text = answers.join(" ");
            let value = match answers.as_slice() {
                [single] => json!(single),
                _ => json!(answers),
            };
            Ok::<_, PromptError>((value, text))
        })
        .await
}

/// Handle the 'number' command
pub async fn handle_number(session: &Session, args: PromptArgs, count: Option<usize>) -> Result<()> {
    let prompter = &session.prompter;
    session
        .finish(async {
            let spec = session.spec(&args)?;
            let numbers = match count {
                Some(1) => vec![prompter.number().single(&spec).await?],
                _ => prompter.number().multi(&spec, count).await?,
            };
            let text = numbers
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            let value = match (count, numbers.as_slice()) {
                (Some(1), [single]) => json!(single),
                _ => json!(numbers),
            };
            Ok::<_, PromptError>((value, text))
        })
        .await
}

/// Handle the 'confirm' command
pub async fn handle_confirm(session: &Session, args: PromptArgs) -> Result<()> {
    let prompter = &session.prompter;
    session
        .finish(async {
            let spec = session.spec(&args)?;
            let answer = prompter.special().boolean(&spec).await?;
            Ok::<_, PromptError>((json!(answer), if answer { "yes" } else { "no" }.to_string()))
        })
        .await
}

/// Handle the 'choose' command
pub async fn handle_choose(
    session: &Session,
    args: PromptArgs,
    items: Vec<String>,
    count: usize,
) -> Result<()> {
    let prompter = &session.prompter;
    session
        .finish(async {
            let spec = session.spec(&args)?;
            let chosen = prompter.list().multi_list_chooser(&spec, &items, count).await?;
            Ok::<_, PromptError>((json!(chosen), chosen.join("\n")))
        })
        .await
}

/// Handle the 'pick' command
pub async fn handle_pick(
    session: &Session,
    args: PromptArgs,
    options: Vec<String>,
    count: usize,
) -> Result<()> {
    let options = options
        .iter()
        .map(|option| parse_option(option))
        .collect::<Result<Vec<_>>>()?;
    let prompter = &session.prompter;
    session
        .finish(async {
            let spec = session.spec(&args)?;
            let picked = prompter
                .list()
                .multi_reaction_picker(&spec, &options, count)
                .await?;
            let text = picked
                .iter()
                .map(|option| format!("{} {}", option.emoji, option.name))
                .collect::<Vec<_>>()
                .join("\n");
            Ok::<_, PromptError>((json!(picked), text))
        })
        .await
}

/// Handle the 'mention' command
pub async fn handle_mention(
    session: &Session,
    args: PromptArgs,
    kind: MentionKind,
    count: Option<usize>,
) -> Result<()> {
    let prompter = &session.prompter;
    session
        .finish(async {
            let spec = session.spec(&args)?;
            let names: Vec<String> = match kind {
                MentionKind::Channel => prompter
                    .channel()
                    .multi(&spec, count)
                    .await?
                    .iter()
                    .map(|id| id.as_str().to_string())
                    .collect(),
                MentionKind::Member => prompter
                    .member()
                    .multi(&spec, count)
                    .await?
                    .iter()
                    .map(|id| id.as_str().to_string())
                    .collect(),
                MentionKind::Role => prompter
                    .role()
                    .multi(&spec, count)
                    .await?
                    .iter()
                    .map(|id| id.as_str().to_string())
                    .collect(),
            };
            Ok::<_, PromptError>((json!(names), names.join(" ")))
        })
        .await
}

/// Parse a picker option written as `emoji:name[:description]`
pub fn parse_option(raw: &str) -> Result<PickerOption> {
    let mut parts = raw.splitn(3, ':');
    let emoji = parts.next().unwrap_or("").trim();
    let name = parts
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!("Invalid option '{}'. Expected: 'emoji:name[:description]'", raw)
        })?;
    let description = parts.next().unwrap_or("").trim();

    let option = PickerOption::new(name, description, emoji);
    option
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid option '{}': {}", raw, e))?;
    Ok(option)
}

/// Resolve the configuration file path, falling back to the XDG default
pub fn resolve_config_path(config_file: Option<PathBuf>) -> Result<PathBuf> {
    match config_file {
        Some(path) => Ok(path),
        None => PromptConfig::default_config_path()
            .map_err(|e| anyhow::anyhow!("Failed to get default config path: {}", e)),
    }
}

/// Load and validate the configuration
pub fn load_config(path: &PathBuf) -> Result<PromptConfig> {
    let config = PromptConfig::load_from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?;
    config
        .validate()
        .map_err(|errors| anyhow::anyhow!("Invalid configuration: {}", errors.join("; ")))?;
    Ok(config)
}

/// Parse a log level name
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    match level.trim().to_lowercase().as_str() {
        "error" => Ok(LogLevel::Error),
        "warn" => Ok(LogLevel::Warn),
        "info" => Ok(LogLevel::Info),
        "debug" => Ok(LogLevel::Debug),
        "trace" => Ok(LogLevel::Trace),
        other => Err(anyhow::anyhow!(
            "Invalid log level '{}'. Expected one of: error, warn, info, debug, trace",
            other
        )),
    }
}

/// Handle the 'config' command
pub fn handle_config(path: &PathBuf, show: bool, init: bool, json: bool) -> Result<()> {
    if init {
        println!("⚙️  Initializing prompter configuration");
        println!("📄 Config file: {}", path.display());
        if path.exists() {
            println!("⚠️  Configuration file already exists, leaving it untouched");
        } else {
            PromptConfig::default()
                .save_to_file(path)
                .map_err(|e| anyhow::anyhow!("Failed to save config: {}", e))?;
            println!("✨ Created configuration with defaults");
        }
    }

    if show || !init {
        let config = load_config(path)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            let content = toml::to_string_pretty(&config).context("Failed to render config")?;
            println!("# {}", path.display());
            print!("{}", content);
        }
    }

    Ok(())
}
