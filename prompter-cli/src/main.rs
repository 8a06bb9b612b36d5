mod cli;
mod console;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::handlers::{self, MentionKind, PromptArgs, Session};
use prompter_core::services::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prompter")]
#[command(version = "0.1.0")]
#[command(about = "Ask, await, validate and re-prompt from the terminal")]
#[command(
    help_template = "{name} - {version}\n{about}\n\n{usage-heading}\n  {usage}\n\n{all-args}{options}\n"
)]
struct Cli {
    /// Path to configuration file (default: ~/.config/prompter/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error/warn/info/debug/trace), overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// User id the prompts are addressed to
    #[arg(long, global = true, default_value = "you")]
    user: String,

    /// Channel name the conversation happens on
    #[arg(long, global = true, default_value = "console")]
    channel: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask for a free text answer
    ///
    /// With --options the answer must be made of the listed words (case
    /// sensitive). With --unavailable the listed answers are refused.
    ///
    /// Examples:
    ///   prompter ask "What is your name?"
    ///   prompter ask "Pick a side" --options red,blue --timeout 30
    ///   prompter ask "Team name?" --unavailable hackers,builders --cancelable
    Ask {
        #[command(flatten)]
        prompt: PromptArgs,

        /// Allowed answers, comma separated
        #[arg(long, value_delimiter = ',')]
        options: Vec<String>,

        /// Answers that are already taken, comma separated
        #[arg(long, value_delimiter = ',', conflicts_with = "options")]
        unavailable: Vec<String>,

        /// Number of allowed answers to give (with --options)
        #[arg(long, default_value = "1", requires = "options")]
        count: usize,
    },

    /// Ask for one or more whole numbers
    Number {
        #[command(flatten)]
        prompt: PromptArgs,

        /// Exact count of numbers expected (default: any)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Ask a yes/no question
    Confirm {
        #[command(flatten)]
        prompt: PromptArgs,
    },

    /// Choose items from a numbered list by writing their indices
    ///
    /// Examples:
    ///   prompter choose "Which workshops?" Rust Go Zig --count 2
    Choose {
        #[command(flatten)]
        prompt: PromptArgs,

        /// List items
        #[arg(required = true, num_args = 1..)]
        items: Vec<String>,

        /// Number of items to choose
        #[arg(long, default_value = "1")]
        count: usize,
    },

    /// Pick options by reacting with their emoji
    ///
    /// Options are written as "emoji:name[:description]".
    ///
    /// Examples:
    ///   prompter pick "Snack?" "🍎:Apple" "🍐:Pear:ripe" --count 1
    Pick {
        #[command(flatten)]
        prompt: PromptArgs,

        /// Options as "emoji:name[:description]"
        #[arg(required = true, num_args = 1..)]
        options: Vec<String>,

        /// Number of options to pick
        #[arg(long, default_value = "1")]
        count: usize,
    },

    /// Ask for channel (#name), member (@name) or role (@&name) mentions
    Mention {
        #[command(flatten)]
        prompt: PromptArgs,

        /// What to mention
        #[arg(long, value_enum)]
        kind: MentionKind,

        /// Exact count of mentions expected (default: any)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Show or initialize the configuration file
    Config {
        /// Print the effective configuration
        #[arg(long)]
        show: bool,

        /// Write a configuration file with defaults if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = handlers::resolve_config_path(cli.config)?;
    let open_session = || -> Result<Session> {
        let mut config = handlers::load_config(&config_path)?;
        if let Some(level) = &cli.log_level {
            config.log_level = handlers::parse_log_level(level)?;
        }
        init_logging(config.log_level)
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
        Ok(Session::open(
            config,
            cli.user.clone(),
            cli.channel.clone(),
            cli.json,
        ))
    };

    match cli.command {
        Commands::Ask {
            prompt,
            options,
            unavailable,
            count,
        } => {
            handlers::handle_ask(&open_session()?, prompt, options, unavailable, count).await?;
        }
        Commands::Number { prompt, count } => {
            handlers::handle_number(&open_session()?, prompt, count).await?;
        }
        Commands::Confirm { prompt } => {
            handlers::handle_confirm(&open_session()?, prompt).await?;
        }
        Commands::Choose {
            prompt,
            items,
            count,
        } => {
            handlers::handle_choose(&open_session()?, prompt, items, count).await?;
        }
        Commands::Pick {
            prompt,
            options,
            count,
        } => {
            handlers::handle_pick(&open_session()?, prompt, options, count).await?;
        }
        Commands::Mention {
            prompt,
            kind,
            count,
        } => {
            handlers::handle_mention(&open_session()?, prompt, kind, count).await?;
        }
        Commands::Config { show, init } => {
            handlers::handle_config(&config_path, show, init, cli.json)?;
        }
    }

    Ok(())
}
