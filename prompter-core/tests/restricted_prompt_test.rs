//! Restricted decorator over arbitrary single-value prompts

use async_trait::async_trait;
use prompter_core::models::{
    ChannelId, ChannelRef, Mentions, PromptConfig, PromptRequest, PromptSpec, Reply, RoleId,
    UserId,
};
use prompter_core::prompts::{Mention, SinglePrompt};
use prompter_core::transport::ScriptedTransport;
use prompter_core::{PromptError, Prompter};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

fn user() -> UserId {
    UserId::new("0000")
}

fn general() -> ChannelRef {
    ChannelRef::text("general")
}

fn setup() -> (Arc<ScriptedTransport>, Prompter) {
    let transport = Arc::new(ScriptedTransport::default());
    let prompter = Prompter::new(transport.clone()).with_config(PromptConfig {
        notice_seconds: 0,
        ..PromptConfig::default()
    });
    (transport, prompter)
}

fn spec(prompter: &Prompter) -> PromptSpec {
    prompter
        .spec(PromptRequest::new("Pick a channel").channel(general()).user(user()))
        .expect("valid prompt")
}

/// Prompt that answers from a fixed queue and records the specs it was given
struct QueuedPrompt<T> {
    answers: Mutex<VecDeque<T>>,
    seen: Mutex<Vec<String>>,
}

impl<T> QueuedPrompt<T> {
    fn new(answers: Vec<T>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl<T: Send + Sync> SinglePrompt for QueuedPrompt<T> {
    type Output = T;

    async fn invoke(&self, spec: &PromptSpec) -> Result<T, PromptError> {
        self.seen.lock().unwrap().push(spec.text().to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(PromptError::TimedOut)
    }
}

#[tokio::test]
async fn test_reprompts_until_answer_is_available() {
    let (transport, prompter) = setup();
    let a = ChannelId::new("a");
    let b = ChannelId::new("b");
    let c = ChannelId::new("c");
    let prompt = QueuedPrompt::new(vec![a.clone(), b.clone(), c.clone()]);

    let answer = prompter
        .restricted()
        .single(&prompt, &spec(&prompter), &[a, b])
        .await
        .unwrap();

    assert_eq!(answer, c);
    assert_eq!(prompt.calls(), 3);
    assert_eq!(
        transport.sent_texts().await,
        vec![
            "<@0000> The response is not valid please try again!",
            "<@0000> The response is not valid please try again!",
        ]
    );
}

#[tokio::test]
async fn test_unavailable_values_are_listed() {
    let (_transport, prompter) = setup();
    let prompt = QueuedPrompt::new(vec![RoleId::new("3")]);

    prompter
        .restricted()
        .single(
            &prompt,
            &spec(&prompter),
            &[RoleId::new("1"), RoleId::new("2")],
        )
        .await
        .unwrap();

    let seen = prompt.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec!["Pick a channel \n Unavailable responses: <@&1>, <@&2>"]
    );
}

#[tokio::test]
async fn test_category_mismatch_is_an_error() {
    let (transport, prompter) = setup();
    let prompt = QueuedPrompt::new(vec![Mention::Role(RoleId::new("r"))]);

    let result = prompter
        .restricted()
        .single(
            &prompt,
            &spec(&prompter),
            &[Mention::Channel(ChannelId::new("c"))],
        )
        .await;

    assert!(matches!(
        result,
        Err(PromptError::TypeMismatch {
            expected: "channel",
            found: "role"
        })
    ));
    assert_eq!(prompt.calls(), 1);
    assert!(transport.sent().await.is_empty());
}

#[tokio::test]
async fn test_wraps_channel_prompt() {
    let (transport, prompter) = setup();
    for (id, channel) in [("r1", "used"), ("r2", "free")] {
        transport
            .push_reply(
                Reply::new(id, user(), general(), "#channel").with_mentions(Mentions {
                    channels: vec![ChannelId::new(channel)],
                    ..Mentions::default()
                }),
            )
            .await;
    }

    let channel = prompter
        .restricted()
        .single(&prompter.channel(), &spec(&prompter), &[ChannelId::new("used")])
        .await
        .unwrap();

    assert_eq!(channel, ChannelId::new("free"));
    assert_eq!(transport.reply_waits().await.len(), 2);
    assert!(transport.sent_texts().await[0].contains("Unavailable responses: <#used>"));
}

#[tokio::test]
async fn test_wrapped_prompt_errors_surface() {
    let (_transport, prompter) = setup();
    let prompt: QueuedPrompt<i64> = QueuedPrompt::new(vec![]);

    let result = prompter
        .restricted()
        .single(&prompt, &spec(&prompter), &[1, 2])
        .await;

    assert!(matches!(result, Err(PromptError::TimedOut)));
}
