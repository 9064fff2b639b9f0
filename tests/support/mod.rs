#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use eveshield::config::Config;
use eveshield::session::{Coordinate, SessionContext};
use eveshield::ui::RecordingSink;
use eveshield::{Dispatcher, actions::Geolocator, actions::PositionUnavailable};
use futures_util::future::BoxFuture;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

impl MockReply {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::json(StatusCode::OK, body)
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self::text(status, "")
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Hit {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct MockState {
    replies: Arc<Mutex<HashMap<String, VecDeque<MockReply>>>>,
    hits: Arc<Mutex<Vec<Hit>>>,
}

/// In-process backend that answers scripted replies per path and records
/// every request it sees.
pub struct MockBackend {
    pub base_url: String,
    state: MockState,
    server_task: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    pub async fn spawn(prefix: &str) -> Self {
        let state = MockState::default();
        let app = Router::new()
            .fallback(mock_handler)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let local_addr = listener
            .local_addr()
            .expect("listener address should resolve");

        let server_task = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("mock backend should run");
        });

        Self {
            base_url: format!("http://{local_addr}{prefix}"),
            state,
            server_task,
        }
    }

    pub async fn script(&self, path: &str, replies: Vec<MockReply>) {
        self.state
            .replies
            .lock()
            .await
            .entry(path.to_string())
            .or_default()
            .extend(replies);
    }

    pub async fn hits(&self) -> Vec<Hit> {
        self.state.hits.lock().await.clone()
    }

    pub async fn hits_on(&self, path: &str) -> Vec<Hit> {
        self.hits()
            .await
            .into_iter()
            .filter(|hit| hit.path == path)
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server_task.abort();
    }
}

async fn mock_handler(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.hits.lock().await.push(Hit {
        method,
        path: path.clone(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });

    let reply = state
        .replies
        .lock()
        .await
        .get_mut(&path)
        .and_then(VecDeque::pop_front)
        .unwrap_or_else(|| MockReply::text(StatusCode::NOT_FOUND, "no scripted reply"));

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    (
        reply.status,
        [(CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}

/// Base URL nothing listens on, for connection-refused failures.
pub async fn unreachable_url(prefix: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("address should resolve");
    drop(listener);
    format!("http://{addr}{prefix}")
}

pub fn test_config(primary_api_url: String, secondary_api_url: String) -> Config {
    Config {
        primary_api_url,
        secondary_api_url,
        request_timeout_ms: 300,
        chat_retry_delay_ms: 10,
        ..Config::default()
    }
}

pub struct Harness {
    pub dispatcher: Dispatcher,
    pub session: Arc<SessionContext>,
    pub sink: Arc<RecordingSink>,
}

pub fn harness(config: &Config) -> Harness {
    let session = Arc::new(SessionContext::in_memory());
    let sink = Arc::new(RecordingSink::new());
    let dispatcher =
        Dispatcher::new(config, session.clone(), sink.clone()).expect("dispatcher should build");
    Harness {
        dispatcher,
        session,
        sink,
    }
}

pub struct FixedGeolocator(pub Option<Coordinate>);

impl Geolocator for FixedGeolocator {
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, PositionUnavailable>> {
        let fix = self.0;
        Box::pin(async move { fix.ok_or_else(|| PositionUnavailable("permission denied".into())) })
    }
}
