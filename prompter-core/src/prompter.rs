//! Entry point tying a transport and configuration to every prompt family

use crate::error::PromptError;
use crate::models::{PromptConfig, PromptRequest, PromptSpec};
use crate::prompts::{
    validate_prompt, ChannelPrompt, ListPrompt, MemberPrompt, MessagePrompt, NumberPrompt,
    PromptContext, RestrictedPrompt, RolePrompt, SpecialPrompt, StringPrompt,
};
use crate::transport::ChatTransport;
use std::sync::Arc;

/// Hands out prompt families sharing one transport and one configuration.
#[derive(Clone)]
pub struct Prompter {
    ctx: PromptContext,
}

impl Prompter {
    /// Create a prompter with default configuration
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            ctx: PromptContext::new(transport, PromptConfig::default()),
        }
    }

    /// Replace the configuration
    pub fn with_config(self, config: PromptConfig) -> Self {
        Self {
            ctx: PromptContext::new(self.ctx.shared_transport(), config),
        }
    }

    pub fn config(&self) -> &PromptConfig {
        self.ctx.config()
    }

    /// Validate a request, filling defaults from the configuration
    pub fn spec(&self, request: PromptRequest) -> Result<PromptSpec, PromptError> {
        validate_prompt(request, self.ctx.config())
    }

    pub fn message(&self) -> MessagePrompt {
        MessagePrompt::new(self.ctx.clone())
    }

    pub fn string(&self) -> StringPrompt {
        StringPrompt::new(self.message())
    }

    pub fn number(&self) -> NumberPrompt {
        NumberPrompt::new(self.message())
    }

    pub fn channel(&self) -> ChannelPrompt {
        ChannelPrompt::new(self.message())
    }

    pub fn role(&self) -> RolePrompt {
        RolePrompt::new(self.message())
    }

    pub fn member(&self) -> MemberPrompt {
        MemberPrompt::new(self.message())
    }

    pub fn special(&self) -> SpecialPrompt {
        SpecialPrompt::new(self.message())
    }

    pub fn list(&self) -> ListPrompt {
        ListPrompt::new(self.ctx.clone(), self.number())
    }

    pub fn restricted(&self) -> RestrictedPrompt {
        RestrictedPrompt::new(self.ctx.clone())
    }
}
