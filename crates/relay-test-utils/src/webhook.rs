//! [`TestWebhook`]: a loopback webhook endpoint for delivery tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::post;
use tokio::sync::Mutex;

/// A request received by [`TestWebhook`]
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    /// Body as lossy UTF-8
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Clone)]
struct WebhookState {
    status: StatusCode,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// HTTP server on 127.0.0.1 that answers every `POST /webhook` with a
/// fixed status and records the request.
///
/// Must be started inside a tokio runtime; the server task lives until
/// the runtime shuts down.
pub struct TestWebhook {
    url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl TestWebhook {
    /// Start a server answering with `status`.
    pub async fn start(status: u16) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = WebhookState {
            status: StatusCode::from_u16(status).unwrap(),
            requests: Arc::clone(&requests),
        };

        let app = Router::new()
            .route("/webhook", post(capture))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            url: format!("http://{addr}/webhook"),
            requests,
        }
    }

    /// URL to configure as the webhook endpoint
    pub fn url(&self) -> &str {
        &self.url
    }

    /// All requests received so far
    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().await.clone()
    }

    /// The single request received; panics if there is not exactly one.
    pub async fn only_request(&self) -> CapturedRequest {
        let requests = self.requests().await;
        assert_eq!(requests.len(), 1, "expected exactly one webhook request");
        requests.into_iter().next().unwrap()
    }
}

async fn capture(State(state): State<WebhookState>, headers: HeaderMap, body: Bytes) -> StatusCode {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.requests.lock().await.push(CapturedRequest {
        content_type,
        body: body.to_vec(),
    });
    state.status
}
