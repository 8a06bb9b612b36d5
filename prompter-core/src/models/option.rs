//! Options offered by reaction pickers

use serde::{Deserialize, Serialize};

/// An option the user selects by reacting with its emoji
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerOption {
    pub name: String,
    pub description: String,
    /// Unicode emoji token. Custom platform emoji are not supported.
    pub emoji: String,
}

impl PickerOption {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        emoji: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            emoji: emoji.into(),
        }
    }

    /// Check the emoji token is a simple (non-custom) emoji
    pub fn validate(&self) -> Result<(), String> {
        let emoji = self.emoji.trim();
        if emoji.is_empty() {
            return Err(format!("option '{}' has no emoji", self.name));
        }
        if is_custom_emoji(emoji) {
            return Err(format!(
                "option '{}' uses custom emoji {}; only unicode emoji are allowed",
                self.name, emoji
            ));
        }
        Ok(())
    }
}

/// Custom emoji use the `<:name:id>` or `<a:name:id>` markup
fn is_custom_emoji(token: &str) -> bool {
    token.starts_with('<') && token.ends_with('>') && token.matches(':').count() >= 2
}
