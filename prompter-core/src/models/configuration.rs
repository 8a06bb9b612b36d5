//! Configuration data structures

use super::spec::Timeout;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Logging level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "info")]
    #[default]
    Info,
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "trace")]
    Trace,
}

/// Engine defaults, injected into every prompt family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Timeout used when a request does not set one
    pub default_timeout: Timeout,
    /// Cancelability used when a request does not set it
    pub default_cancelable: bool,
    /// Seconds a corrective notice stays up before it is deleted
    pub notice_seconds: u64,
    /// Seconds the "time is up" notice stays up
    pub timeout_notice_seconds: u64,
    /// Ceiling on attempts per re-prompt loop (None = retry until answered)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    /// Logging verbosity level
    pub log_level: LogLevel,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            default_timeout: Timeout::Unbounded,
            default_cancelable: false,
            notice_seconds: 3,
            timeout_notice_seconds: 10,
            max_attempts: None,
            log_level: LogLevel::Info,
        }
    }
}

impl PromptConfig {
    pub fn notice_delay(&self) -> Duration {
        Duration::from_secs(self.notice_seconds)
    }

    pub fn timeout_notice_delay(&self) -> Duration {
        Duration::from_secs(self.timeout_notice_seconds)
    }

    /// Load configuration from file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: PromptConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Return default configuration if file doesn't exist
            Ok(PromptConfig::default())
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn default_config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_dir = dirs::config_dir().ok_or("Could not determine config directory")?;
        Ok(config_dir.join("prompter").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Timeout::Seconds(seconds) = self.default_timeout {
            if seconds > 86_400 {
                errors.push("default_timeout cannot exceed 86400 seconds (1 day)".to_string());
            }
        }

        if self.notice_seconds > 60 {
            errors.push("notice_seconds cannot exceed 60".to_string());
        }

        if self.timeout_notice_seconds > 60 {
            errors.push("timeout_notice_seconds cannot exceed 60".to_string());
        }

        if self.max_attempts == Some(0) {
            errors.push("max_attempts must be at least 1 when set".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
