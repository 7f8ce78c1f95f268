//! Upload tool driven through the dispatcher, as the servers use it.

#![cfg(unix)]

use relay_core::{CallRequest, Dispatcher};
use relay_test_utils::TestScripts;
use relay_upload::{UPLOAD_TOOL, UploadConfig, UploadHandler};
use serde_json::{Value, json};

fn dispatcher(scripts: &TestScripts, url: &str) -> Dispatcher {
    let script = scripts.remote_url_script(url);
    let config = UploadConfig::new("test-key", script)
        .unwrap()
        .with_interpreter("sh");
    Dispatcher::builder()
        .handler(UploadHandler::new(config))
        .unwrap()
        .build()
}

fn call(args: Value) -> CallRequest {
    CallRequest::from_value(UPLOAD_TOOL, args).unwrap()
}

#[tokio::test]
async fn test_end_to_end_upload() {
    let scripts = TestScripts::new();
    let image = scripts.file("a.png", b"\x89PNG");
    let dispatcher = dispatcher(&scripts, "https://cdn.test/a.png");

    let result = dispatcher
        .dispatch(call(json!({"image_path": image.to_str().unwrap()})))
        .await;

    assert!(result.is_success());
    assert!(result.text().contains("https://cdn.test/a.png"));

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["content"][0]["type"], "text");
    assert_eq!(value["structuredContent"]["url"], "https://cdn.test/a.png");
}

#[tokio::test]
async fn test_missing_image_path_argument() {
    let scripts = TestScripts::new();
    let dispatcher = dispatcher(&scripts, "https://cdn.test/a.png");

    let result = dispatcher.dispatch(call(json!({}))).await;

    assert!(!result.is_success());
    assert!(result.text().contains("image_path"));
}

#[tokio::test]
async fn test_nonexistent_image_is_error_envelope() {
    let scripts = TestScripts::new();
    let dispatcher = dispatcher(&scripts, "https://cdn.test/a.png");
    let missing = scripts.root().join("missing.png");

    let result = dispatcher
        .dispatch(call(json!({"image_path": missing.to_str().unwrap()})))
        .await;

    assert!(!result.is_success());
    assert!(result.text().starts_with("File not found"));
    assert!(result.text().contains("missing.png"));
}

#[tokio::test]
async fn test_same_call_twice_gives_independent_results() {
    let scripts = TestScripts::new();
    let image = scripts.file("a.png", b"\x89PNG");
    let dispatcher = dispatcher(&scripts, "https://cdn.test/a.png");
    let args = json!({"image_path": image.to_str().unwrap()});

    let first = dispatcher.dispatch(call(args.clone())).await;
    let second = dispatcher.dispatch(call(args)).await;

    assert!(first.is_success());
    assert!(second.is_success());
    assert_eq!(first, second);
}
