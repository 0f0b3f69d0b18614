// Stub upstream shared by the integration tests.
//
// One axum app plays both upstreams: the MCP resource server (`/`,
// `/resource/{name}`) and the Ollama runtime (`/api/tags`, `/api/pull`,
// `/api/delete`). Tags, pull and delete can be held behind gates so tests decide
// in which order responses arrive.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Notify;
use url::Url;

use mcp_dashboard::config::DashboardConfig;
use mcp_dashboard::state::AppState;

pub const API_KEY: &str = "supersecretkey123";

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub route: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self { status: StatusCode::OK, body }
    }
}

#[derive(Clone)]
pub struct Stub {
    pub catalog: Arc<Mutex<Reply>>,
    pub tags: Arc<Mutex<Reply>>,
    pub invoke: Arc<Mutex<Reply>>,
    pub pull_status: Arc<Mutex<StatusCode>>,
    pub delete_status: Arc<Mutex<StatusCode>>,
    /// When set, the tags/pull/delete handlers wait for a permit before answering.
    pub tags_gate: Arc<Mutex<Option<Arc<Notify>>>>,
    pub pull_gate: Arc<Mutex<Option<Arc<Notify>>>>,
    pub delete_gate: Arc<Mutex<Option<Arc<Notify>>>>,
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Default for Stub {
    fn default() -> Self {
        Self {
            catalog: Arc::new(Mutex::new(Reply::ok(json!({ "resources": [] })))),
            tags: Arc::new(Mutex::new(Reply::ok(json!({ "models": [] })))),
            invoke: Arc::new(Mutex::new(Reply::ok(json!({ "ok": true })))),
            pull_status: Arc::new(Mutex::new(StatusCode::OK)),
            delete_status: Arc::new(Mutex::new(StatusCode::OK)),
            tags_gate: Arc::new(Mutex::new(None)),
            pull_gate: Arc::new(Mutex::new(None)),
            delete_gate: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Stub {
    pub fn set_catalog(&self, reply: Reply) {
        *self.catalog.lock().unwrap() = reply;
    }

    pub fn set_tags(&self, reply: Reply) {
        *self.tags.lock().unwrap() = reply;
    }

    pub fn set_invoke(&self, reply: Reply) {
        *self.invoke.lock().unwrap() = reply;
    }

    pub fn gate_tags(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.tags_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn gate_pull(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.pull_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn gate_delete(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.delete_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, route: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.route == route).collect()
    }

    /// Wait until `route` has been hit `count` times.
    pub async fn wait_for_calls(&self, route: &str, count: usize) {
        for _ in 0..500 {
            if self.calls_to(route).len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("timed out waiting for {} call(s) to {}", count, route);
    }

    fn record(&self, route: String, headers: &HeaderMap, body: Value) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        self.calls.lock().unwrap().push(RecordedCall {
            route,
            authorization,
            body,
        });
    }
}

async fn list_resources(State(stub): State<Stub>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    stub.record("GET /".into(), &headers, Value::Null);
    let reply = stub.catalog.lock().unwrap().clone();
    (reply.status, Json(reply.body))
}

async fn invoke_resource(
    State(stub): State<Stub>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.record(format!("POST /resource/{}", name), &headers, body);
    let reply = stub.invoke.lock().unwrap().clone();
    (reply.status, Json(reply.body))
}

async fn tags(State(stub): State<Stub>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    stub.record("GET /api/tags".into(), &headers, Value::Null);
    let gate = stub.tags_gate.lock().unwrap().clone();
    if let Some(gate) = gate {
        gate.notified().await;
    }
    let reply = stub.tags.lock().unwrap().clone();
    (reply.status, Json(reply.body))
}

async fn pull(State(stub): State<Stub>, headers: HeaderMap, Json(body): Json<Value>) -> StatusCode {
    stub.record("POST /api/pull".into(), &headers, body);
    let gate = stub.pull_gate.lock().unwrap().clone();
    if let Some(gate) = gate {
        gate.notified().await;
    }
    *stub.pull_status.lock().unwrap()
}

async fn remove(State(stub): State<Stub>, headers: HeaderMap, Json(body): Json<Value>) -> StatusCode {
    stub.record("DELETE /api/delete".into(), &headers, body);
    let gate = stub.delete_gate.lock().unwrap().clone();
    if let Some(gate) = gate {
        gate.notified().await;
    }
    *stub.delete_status.lock().unwrap()
}

/// Serve `stub` on an ephemeral port and return its base URL.
pub async fn spawn_upstream(stub: Stub) -> Url {
    let app = Router::new()
        .route("/", get(list_resources))
        .route("/resource/{name}", post(invoke_resource))
        .route("/api/tags", get(tags))
        .route("/api/pull", post(pull))
        .route("/api/delete", delete(remove))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{}/", addr)).unwrap()
}

/// A base URL on which nothing listens.
pub fn unreachable_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}/", addr)).unwrap()
}

pub fn config(resources: Url, runtime: Url) -> DashboardConfig {
    let mut config = DashboardConfig::for_upstreams(resources, runtime);
    config.api_key = Some(API_KEY.to_string());
    config
}

pub fn state_for(config: DashboardConfig) -> AppState {
    AppState::new(config).unwrap()
}

/// Stub plus a state whose both upstreams point at it.
pub async fn stubbed_state() -> (Stub, AppState) {
    let stub = Stub::default();
    let base = spawn_upstream(stub.clone()).await;
    let state = state_for(config(base.clone(), base));
    (stub, state)
}
