//! In-process fakes for the review API and the messenger.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};
use serde_json::Value;
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use crate::core::notifier::Messenger;

pub const STATUSES_PATH: &str = "/api/user_api/homework_statuses/";

pub fn find_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr").port()
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub from_date: Option<String>,
}

#[derive(Clone)]
struct CannedResponse {
    status: u16,
    content_type: &'static str,
    body: String,
}

#[derive(Clone)]
struct MockState {
    response: Arc<Mutex<CannedResponse>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn homework_statuses(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state
        .requests
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .push(RecordedRequest {
            authorization: headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            from_date: params.get("from_date").cloned(),
        });

    let canned = state
        .response
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .clone();
    let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, canned.content_type)], canned.body).into_response()
}

/// Review API stand-in bound to an ephemeral localhost port.
pub struct MockReviewApi {
    port: u16,
    state: MockState,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl MockReviewApi {
    pub async fn start() -> Self {
        let state = MockState {
            response: Arc::new(Mutex::new(CannedResponse {
                status: 200,
                content_type: "application/json",
                body: r#"{"homeworks":[]}"#.to_string(),
            })),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route(STATUSES_PATH, get(homework_statuses))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock review api");
        let port = listener.local_addr().expect("mock api addr").port();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            port,
            state,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}{}", self.port, STATUSES_PATH)
    }

    pub fn respond_json(&self, status: u16, body: Value) {
        self.set_response(status, "application/json", body.to_string());
    }

    pub fn respond_text(&self, status: u16, body: &str) {
        self.set_response(status, "text/html", body.to_string());
    }

    fn set_response(&self, status: u16, content_type: &'static str, body: String) {
        *self.state.response.lock().unwrap_or_else(|e| e.into_inner()) = CannedResponse {
            status,
            content_type,
            body,
        };
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(String),
    Animation { url: String, caption: String },
}

/// Messenger that keeps successful sends in memory and can be told to fail.
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
    fail_text: bool,
    fail_animation: bool,
}

impl RecordingMessenger {
    pub fn failing_animations() -> Self {
        Self {
            fail_animation: true,
            ..Self::default()
        }
    }

    pub fn failing_all() -> Self {
        Self {
            fail_text: true,
            fail_animation: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(text) => Some(text),
                Sent::Animation { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, text: &str) -> Result<()> {
        if self.fail_text {
            return Err(anyhow!("Bad Request: chat not found"));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn send_animation(&self, url: &str, caption: &str) -> Result<()> {
        if self.fail_animation {
            return Err(anyhow!("Bad Request: wrong file identifier/HTTP URL specified"));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Sent::Animation {
                url: url.to_string(),
                caption: caption.to_string(),
            });
        Ok(())
    }
}
