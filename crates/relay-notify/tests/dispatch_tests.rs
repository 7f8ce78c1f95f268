//! Notification tools driven through the dispatcher.

use relay_core::{CallRequest, Dispatcher};
use relay_notify::{NotifyConfig, NotifyHandler, SEND_EMBED_TOOL, SEND_FILE_TOOL, SEND_MESSAGE_TOOL};
use relay_test_utils::TestWebhook;
use serde_json::{Value, json};

fn dispatcher(webhook: &TestWebhook) -> Dispatcher {
    let handler = NotifyHandler::new(NotifyConfig::new(webhook.url())).unwrap();
    Dispatcher::builder().handler(handler).unwrap().build()
}

fn call(tool: &str, args: Value) -> CallRequest {
    CallRequest::from_value(tool, args).unwrap()
}

#[tokio::test]
async fn test_message_success_envelope() {
    let webhook = TestWebhook::start(200).await;
    let result = dispatcher(&webhook)
        .dispatch(call(SEND_MESSAGE_TOOL, json!({"content": "hi", "tts": false})))
        .await;

    assert!(result.is_success());
    assert_eq!(result.text(), "Message sent");
    assert_eq!(result.structured_content().unwrap()["delivered"], true);

    let body: Value = serde_json::from_slice(&webhook.only_request().await.body).unwrap();
    assert_eq!(body, json!({"content": "hi", "tts": false}));
}

#[tokio::test]
async fn test_message_rejected_envelope() {
    let webhook = TestWebhook::start(404).await;
    let result = dispatcher(&webhook)
        .dispatch(call(SEND_MESSAGE_TOOL, json!({"content": "hi"})))
        .await;

    assert!(!result.is_success());
    assert_eq!(result.text(), "HTTP error! status: 404");
}

#[tokio::test]
async fn test_missing_content_sends_nothing() {
    let webhook = TestWebhook::start(200).await;
    let result = dispatcher(&webhook)
        .dispatch(call(SEND_MESSAGE_TOOL, json!({})))
        .await;

    assert!(!result.is_success());
    assert!(result.text().contains("'content'"));
    assert!(webhook.requests().await.is_empty());
}

#[tokio::test]
async fn test_mistyped_optional_field_sends_nothing() {
    let webhook = TestWebhook::start(200).await;
    let result = dispatcher(&webhook)
        .dispatch(call(SEND_MESSAGE_TOOL, json!({"content": "hi", "tts": "yes"})))
        .await;

    assert!(!result.is_success());
    assert!(result.text().contains("'tts'"));
    assert!(webhook.requests().await.is_empty());
}

#[tokio::test]
async fn test_embed_default_color() {
    let webhook = TestWebhook::start(204).await;
    let result = dispatcher(&webhook)
        .dispatch(call(
            SEND_EMBED_TOOL,
            json!({"title": "Nightly", "description": "Done"}),
        ))
        .await;

    assert!(result.is_success());
    assert_eq!(result.text(), "Embed sent");

    let body: Value = serde_json::from_slice(&webhook.only_request().await.body).unwrap();
    assert_eq!(body["embeds"][0]["color"], 0x0099ff);
}

#[tokio::test]
async fn test_embed_bad_color_sends_nothing() {
    let webhook = TestWebhook::start(204).await;
    let result = dispatcher(&webhook)
        .dispatch(call(
            SEND_EMBED_TOOL,
            json!({"title": "Nightly", "description": "Done", "color": "zzz"}),
        ))
        .await;

    assert!(!result.is_success());
    assert!(result.text().contains("'color'"));
    assert!(webhook.requests().await.is_empty());
}

#[tokio::test]
async fn test_missing_file_envelope() {
    let webhook = TestWebhook::start(200).await;
    let result = dispatcher(&webhook)
        .dispatch(call(
            SEND_FILE_TOOL,
            json!({"file_path": "/definitely/not/here.png"}),
        ))
        .await;

    assert!(!result.is_success());
    assert!(result.text().contains("/definitely/not/here.png"));
    assert!(webhook.requests().await.is_empty());
}
