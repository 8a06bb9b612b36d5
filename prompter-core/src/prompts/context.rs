//! Shared prompt context: transport, configuration, notices and cleanup

use super::retry::Attempts;
use crate::error::PromptError;
use crate::models::{ChannelRef, Outgoing, PromptConfig, SentMessage, UserId};
use crate::services::logging;
use crate::transport::ChatTransport;
use std::sync::Arc;

/// Transport and configuration shared by every prompt family
#[derive(Clone)]
pub struct PromptContext {
    transport: Arc<dyn ChatTransport>,
    config: Arc<PromptConfig>,
}

impl PromptContext {
    pub fn new(transport: Arc<dyn ChatTransport>, config: PromptConfig) -> Self {
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    pub fn transport(&self) -> &dyn ChatTransport {
        self.transport.as_ref()
    }

    pub(crate) fn shared_transport(&self) -> Arc<dyn ChatTransport> {
        Arc::clone(&self.transport)
    }

    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    /// Fresh attempt counter for one re-prompt loop
    pub fn attempts(&self, prompt: &'static str) -> Attempts {
        Attempts::new(prompt, self.config.max_attempts)
    }

    /// Post a corrective notice mentioning `user`, wait, then remove it
    pub async fn notice(
        &self,
        channel: &ChannelRef,
        user: &UserId,
        text: &str,
    ) -> Result<(), PromptError> {
        let message = self
            .transport
            .send(channel, Outgoing::text(format!("{} {}", user, text)))
            .await?;
        tokio::time::sleep(self.config.notice_delay()).await;
        self.transport.delete(&message, None).await?;
        Ok(())
    }

    /// Post the "time is up" notice; the transport removes it later
    pub async fn timeout_notice(
        &self,
        channel: &ChannelRef,
        user: &UserId,
        text: &str,
    ) -> Result<(), PromptError> {
        let message = self
            .transport
            .send(channel, Outgoing::text(format!("{} {}", user, text)))
            .await?;
        self.transport
            .delete(&message, Some(self.config.timeout_notice_delay()))
            .await?;
        Ok(())
    }

    /// Delete the primary prompt message once `outcome` is known.
    ///
    /// The message is deleted on every path. A cleanup failure is reported
    /// only when the outcome itself succeeded.
    pub async fn release<T>(
        &self,
        message: &SentMessage,
        outcome: Result<T, PromptError>,
    ) -> Result<T, PromptError> {
        let cleanup = self.transport.delete(message, None).await;
        match (outcome, cleanup) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) => Err(err.into()),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(cleanup_err)) => {
                logging::log_error(
                    &cleanup_err.to_string(),
                    Some("deleting prompt message after failure"),
                );
                Err(err)
            }
        }
    }
}
