//! Number, string, boolean and mention prompts: parsing, counts and re-prompts

use prompter_core::models::{
    ChannelId, ChannelRef, Mentions, PromptConfig, PromptRequest, PromptSpec, Reply, RoleId,
    UserId,
};
use prompter_core::transport::ScriptedTransport;
use prompter_core::{PromptError, Prompter};
use std::sync::Arc;

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
        .spec(
            PromptRequest::new("Prompt text!!!")
                .channel(general())
                .user(user()),
        )
        .expect("valid prompt")
}

fn mention_reply(id: &str, mentions: Mentions) -> Reply {
    Reply::new(id, user(), general(), "mentions").with_mentions(mentions)
}

/// Texts of notices: everything sent that is not a prompt
async fn notices(transport: &ScriptedTransport) -> Vec<String> {
    transport
        .sent_texts()
        .await
        .into_iter()
        .filter(|text| !text.contains("Prompt text!!!"))
        .collect()
}

#[tokio::test]
async fn test_number_multi_unbounded() {
    let (transport, prompter) = setup();
    transport.push_text(&user(), &general(), "4 8 15").await;

    let numbers = prompter.number().multi(&spec(&prompter), None).await.unwrap();

    assert_eq!(numbers, vec![4, 8, 15]);
    assert!(transport.sent_texts().await[0].contains("Respond with a number only!"));
    assert!(!transport.sent_texts().await[0].contains("Please respond with only"));
}

#[tokio::test]
async fn test_number_multi_reprompts_on_wrong_count() {
    let (transport, prompter) = setup();
    transport.push_text(&user(), &general(), "1").await;
    transport.push_text(&user(), &general(), "1 23").await;

    let numbers = prompter
        .number()
        .multi(&spec(&prompter), Some(2))
        .await
        .unwrap();

    assert_eq!(numbers, vec![1, 23]);
    assert_eq!(transport.reply_waits().await.len(), 2);
    assert_eq!(
        notices(&transport).await,
        vec!["<@0000> You should only respond with 2 number(s)! Try again!"]
    );
}

#[tokio::test]
async fn test_number_multi_reprompts_on_empty_answer() {
    let (transport, prompter) = setup();
    transport.push_text(&user(), &general(), "   ").await;
    transport.push_text(&user(), &general(), "7").await;

    let numbers = prompter.number().multi(&spec(&prompter), None).await.unwrap();

    assert_eq!(numbers, vec![7]);
    assert_eq!(
        notices(&transport).await,
        vec!["<@0000> You need to respond with at least one number! Try again!"]
    );
}

#[tokio::test]
async fn test_number_multi_reprompts_on_text_token() {
    for (count, bad) in [(None, "1 asdf"), (Some(1), "1 asdf"), (Some(1), "1 2 asdf")] {
        let (transport, prompter) = setup();
        transport.push_text(&user(), &general(), bad).await;
        transport.push_text(&user(), &general(), "1").await;

        let numbers = prompter
            .number()
            .multi(&spec(&prompter), count)
            .await
            .unwrap();

        assert_eq!(numbers, vec![1]);
        assert_eq!(transport.reply_waits().await.len(), 2);
        assert!(notices(&transport).await[0].contains("\"asdf\" is not a number"));
    }
}

#[tokio::test]
async fn test_number_single() {
    let (transport, prompter) = setup();
    transport.push_text(&user(), &general(), "42").await;

    let number = prompter.number().single(&spec(&prompter)).await.unwrap();

    assert_eq!(number, 42);
    assert!(transport.sent_texts().await[0].contains("Please respond with only 1."));
}

#[tokio::test]
async fn test_zero_count_is_rejected_before_sending() {
    let (transport, prompter) = setup();

    let result = prompter.number().multi(&spec(&prompter), Some(0)).await;

    assert!(matches!(result, Err(PromptError::Config(_))));
    assert!(transport.sent().await.is_empty());
}

#[tokio::test]
async fn test_attempt_ceiling_stops_reprompting() {
    let transport = Arc::new(ScriptedTransport::default());
    let prompter = Prompter::new(transport.clone()).with_config(PromptConfig {
        notice_seconds: 0,
        max_attempts: Some(2),
        ..PromptConfig::default()
    });
    transport.push_text(&user(), &general(), "nope").await;
    transport.push_text(&user(), &general(), "still nope").await;
    transport.push_text(&user(), &general(), "5").await;

    let result = prompter.number().single(&spec(&prompter)).await;

    assert!(matches!(
        result,
        Err(PromptError::AttemptsExhausted { attempts: 2 })
    ));
    assert_eq!(transport.remaining().await, (1, 0));
}

#[tokio::test]
async fn test_string_single_returns_clean_content() {
    let (transport, prompter) = setup();
    transport
        .push_reply(
            Reply::new("r1", user(), general(), "hi <@1234>").with_clean_content("hi @John"),
        )
        .await;

    let text = prompter.string().single(&spec(&prompter)).await.unwrap();

    assert_eq!(text, "hi @John");
}

#[tokio::test]
async fn test_string_restricted_lists_options() {
    let (transport, prompter) = setup();
    transport.push_text(&user(), &general(), "blue").await;

    let choice = prompter
        .string()
        .restricted(&spec(&prompter), &["red", "blue"])
        .await
        .unwrap();

    assert_eq!(choice, "blue");
    assert!(transport.sent_texts().await[0]
        .contains("Your options are (case sensitive): red, blue"));
}

#[tokio::test]
async fn test_string_multi_restricted_reprompts() {
    let (transport, prompter) = setup();
    transport.push_text(&user(), &general(), "red").await;
    transport.push_text(&user(), &general(), "red Green").await;
    transport.push_text(&user(), &general(), "green red").await;

    let choices = prompter
        .string()
        .multi_restricted(&spec(&prompter), &["red", "green", "blue"], 2)
        .await
        .unwrap();

    assert_eq!(choices, vec!["red", "green"]);
    assert_eq!(
        notices(&transport).await,
        vec![
            "<@0000> You have given 1 but I expect only 2. Try again!",
            "<@0000> Try again! You need to respond with 2 of the valid options!",
        ]
    );
}

#[tokio::test]
async fn test_string_restricted_keeps_cancelability() {
    let (transport, prompter) = setup();
    transport.push_text(&user(), &general(), "cancel").await;
    let spec = prompter
        .spec(
            PromptRequest::new("Prompt text!!!")
                .channel(general())
                .user(user())
                .cancelable(true),
        )
        .unwrap();

    let result = prompter.string().restricted(&spec, &["a", "b"]).await;

    assert!(matches!(result, Err(PromptError::Canceled)));
}

#[tokio::test]
async fn test_boolean_answers() {
    for (answer, expected) in [("yes", true), (" YES ", true), ("no", false), ("No", false)] {
        let (transport, prompter) = setup();
        transport.push_text(&user(), &general(), answer).await;

        let value = prompter.special().boolean(&spec(&prompter)).await.unwrap();

        assert_eq!(value, expected);
    }
}

#[tokio::test]
async fn test_boolean_reprompts_silently() {
    let (transport, prompter) = setup();
    transport.push_text(&user(), &general(), "maybe").await;
    transport.push_text(&user(), &general(), "yes").await;

    let value = prompter.special().boolean(&spec(&prompter)).await.unwrap();

    assert!(value);
    assert_eq!(transport.reply_waits().await.len(), 2);
    assert!(notices(&transport).await.is_empty());
    assert!(transport.sent_texts().await[0].contains("Respond with \"yes\" or \"no\" only!"));
}

#[tokio::test]
async fn test_channel_multi_reprompts_on_wrong_count() {
    let (transport, prompter) = setup();
    transport
        .push_reply(mention_reply(
            "r1",
            Mentions {
                channels: vec![ChannelId::new("c1")],
                ..Mentions::default()
            },
        ))
        .await;
    transport
        .push_reply(mention_reply(
            "r2",
            Mentions {
                channels: vec![ChannelId::new("c1"), ChannelId::new("c2")],
                ..Mentions::default()
            },
        ))
        .await;

    let channels = prompter
        .channel()
        .multi(&spec(&prompter), Some(2))
        .await
        .unwrap();

    assert_eq!(channels, vec![ChannelId::new("c1"), ChannelId::new("c2")]);
    assert_eq!(
        notices(&transport).await,
        vec!["<@0000> You should only mention 2 channel(s)! Try again!"]
    );
    assert!(transport.sent_texts().await[0].contains("To mention a channel use \"#\"!"));
}

#[tokio::test]
async fn test_role_multi_reprompts_when_nothing_mentioned() {
    let (transport, prompter) = setup();
    transport
        .push_reply(mention_reply("r1", Mentions::default()))
        .await;
    transport
        .push_reply(mention_reply(
            "r2",
            Mentions {
                roles: vec![RoleId::new("admin")],
                ..Mentions::default()
            },
        ))
        .await;

    let roles = prompter.role().multi(&spec(&prompter), None).await.unwrap();

    assert_eq!(roles, vec![RoleId::new("admin")]);
    assert_eq!(
        notices(&transport).await,
        vec!["<@0000> You need to mention roles with \"@\"! Try again!"]
    );
}

#[tokio::test]
async fn test_member_single() {
    let (transport, prompter) = setup();
    transport
        .push_reply(mention_reply(
            "r1",
            Mentions {
                members: vec![UserId::new("42"), UserId::new("42")],
                ..Mentions::default()
            },
        ))
        .await;

    let member = prompter.member().single(&spec(&prompter)).await.unwrap();

    assert_eq!(member, UserId::new("42"));
    assert!(transport.sent_texts().await[0]
        .contains("To mention a user or a role use \"@\"!"));
}

#[tokio::test]
async fn test_typed_prompt_timeout_is_not_retried() {
    let (transport, prompter) = setup();
    transport.push_reply_timeout().await;
    transport.push_text(&user(), &general(), "1").await;

    let result = prompter.number().single(&spec(&prompter)).await;

    assert!(matches!(result, Err(PromptError::TimedOut)));
    assert_eq!(transport.remaining().await, (1, 0));
}
