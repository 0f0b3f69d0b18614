// Resource invocation flow against a stub upstream.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{config, spawn_upstream, state_for, stubbed_state, unreachable_url, Reply, Stub, API_KEY};
use mcp_dashboard::config::PayloadParsePolicy;
use mcp_dashboard::invocation::{self, InvokeError};

#[tokio::test]
async fn submit_without_selection_is_a_no_op() {
    let (stub, state) = stubbed_state().await;

    let err = invocation::submit(&state).await.unwrap_err();

    assert!(matches!(err, InvokeError::NothingSelected));
    assert!(stub.calls().is_empty());
    assert_eq!(state.invocation.read().await.response, "");
    assert_eq!(state.invocation.read().await.error, None);
}

#[tokio::test]
async fn invalid_json_falls_back_to_empty_object() {
    let (stub, state) = stubbed_state().await;
    {
        let mut flow = state.invocation.write().await;
        flow.select("a");
        flow.set_input("{");
    }

    invocation::submit(&state).await.unwrap();

    let calls = stub.calls_to("POST /resource/a");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, json!({}));
    assert_eq!(calls[0].authorization.as_deref(), Some(&*format!("Bearer {}", API_KEY)));
}

#[tokio::test]
async fn payload_is_forwarded_and_reply_pretty_printed() {
    let (stub, state) = stubbed_state().await;
    stub.set_invoke(Reply::ok(json!({ "you_sent": { "msg": "hi" } })));
    {
        let mut flow = state.invocation.write().await;
        flow.select("rustEcho");
        flow.set_input(r#"{"msg":"hi"}"#);
    }

    let response = invocation::submit(&state).await.unwrap();

    assert_eq!(stub.calls_to("POST /resource/rustEcho")[0].body, json!({ "msg": "hi" }));
    let expected = "{\n  \"you_sent\": {\n    \"msg\": \"hi\"\n  }\n}";
    assert_eq!(response, expected);
    assert_eq!(state.invocation.read().await.response, expected);
}

#[tokio::test]
async fn error_reply_with_json_body_is_shown() {
    let (stub, state) = stubbed_state().await;
    stub.set_invoke(Reply {
        status: StatusCode::NOT_FOUND,
        body: json!({ "detail": "Unknown resource" }),
    });
    state.invocation.write().await.select("missing");

    let response = invocation::submit(&state).await.unwrap();

    assert_eq!(response, "{\n  \"detail\": \"Unknown resource\"\n}");
    assert_eq!(state.invocation.read().await.error, None);
}

#[tokio::test]
async fn each_submission_overwrites_response() {
    let (stub, state) = stubbed_state().await;
    state.invocation.write().await.select("a");

    stub.set_invoke(Reply::ok(json!(1)));
    invocation::submit(&state).await.unwrap();
    stub.set_invoke(Reply::ok(json!(2)));
    invocation::submit(&state).await.unwrap();

    assert_eq!(state.invocation.read().await.response, "2");
}

#[tokio::test]
async fn transport_failure_keeps_previous_response() {
    let stub = Stub::default();
    let runtime = spawn_upstream(stub).await;
    let state = state_for(config(unreachable_url(), runtime));
    {
        let mut flow = state.invocation.write().await;
        flow.select("a");
        flow.response = "earlier".into();
    }

    let err = invocation::submit(&state).await.unwrap_err();

    assert!(matches!(err, InvokeError::Transport(_)));
    let flow = state.invocation.read().await;
    assert_eq!(flow.response, "earlier");
    assert!(flow.error.is_some());
}

#[tokio::test]
async fn strict_policy_sends_nothing_for_invalid_json() {
    let stub = Stub::default();
    let base = spawn_upstream(stub.clone()).await;
    let mut cfg = config(base.clone(), base);
    cfg.payload_parse_policy = PayloadParsePolicy::Strict;
    let state = state_for(cfg);
    {
        let mut flow = state.invocation.write().await;
        flow.select("a");
        flow.set_input("{");
    }

    let err = invocation::submit(&state).await.unwrap_err();

    assert!(matches!(err, InvokeError::InvalidPayload(_)));
    assert!(stub.calls_to("POST /resource/a").is_empty());
    assert!(state.invocation.read().await.error.as_deref().unwrap().starts_with("invalid JSON payload"));
}

#[tokio::test]
async fn selection_survives_catalog_reload() {
    let (stub, state) = stubbed_state().await;
    state.invocation.write().await.select("gone");
    stub.set_catalog(Reply::ok(json!({ "resources": [{ "name": "other", "description": "" }] })));

    mcp_dashboard::catalog::load_resources(&state).await;

    assert_eq!(state.invocation.read().await.selected.as_deref(), Some("gone"));
}
