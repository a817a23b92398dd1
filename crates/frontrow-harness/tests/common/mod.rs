#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use frontrow_harness::{EndpointProfile, Harness, HarnessConfig};
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone)]
pub enum StubBody {
    Json(Value),
    Text(String),
}

/// Canned answer for one path.
#[derive(Debug, Clone)]
pub struct StubRoute {
    pub status: u16,
    pub body: StubBody,
    pub delay: Option<Duration>,
}

impl StubRoute {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: StubBody::Json(body),
            delay: None,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: StubBody::Text(body.to_string()),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct StubState {
    routes: Arc<HashMap<String, StubRoute>>,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

/// Stand-in for the FrontRow backend, listening on an ephemeral local port.
pub struct StubBackend {
    base_url: String,
    state: StubState,
    handle: JoinHandle<()>,
}

impl StubBackend {
    pub async fn start(routes: Vec<(&str, StubRoute)>) -> StubBackend {
        let state = StubState {
            routes: Arc::new(
                routes
                    .into_iter()
                    .map(|(path, route)| (path.to_string(), route))
                    .collect(),
            ),
            received: Arc::default(),
        };

        let app = Router::new()
            .fallback(handle_request)
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let addr = listener.local_addr().expect("Stub backend has no address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Stub backend stopped unexpectedly");
        });

        StubBackend {
            base_url: format!("http://{addr}"),
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.state.received.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<ReceivedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_request(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let body = serde_json::from_slice(&body).ok();

    state.received.lock().unwrap().push(ReceivedRequest {
        method,
        path: path.clone(),
        body,
    });

    let Some(route) = state.routes.get(&path).cloned() else {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response();
    };

    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(route.status).expect("Stub route has invalid status");
    match route.body {
        StubBody::Json(value) => (status, Json(value)).into_response(),
        StubBody::Text(text) => (status, text).into_response(),
    }
}

/// Config pointed at `base_url` with short timings so tests stay fast.
pub fn test_config(base_url: &str, profile: EndpointProfile) -> HarnessConfig {
    let mut config = HarnessConfig::new(base_url).with_profile(profile);
    config.request_timeout = Duration::from_secs(5);
    config.settle_delay = Duration::from_millis(10);
    config
}

pub fn create_harness(base_url: &str, profile: EndpointProfile) -> Harness<Vec<u8>> {
    Harness::new(test_config(base_url, profile), Vec::new()).expect("Failed to build harness")
}

pub fn output_of(harness: Harness<Vec<u8>>) -> String {
    String::from_utf8(harness.into_output()).expect("Console output was not UTF-8")
}

/// A local address nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
