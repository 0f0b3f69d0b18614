// MCP Dashboard - Resource invocation flow
//
// selected + input buffer + response buffer. Selecting never clears the
// buffers; only a completed submission overwrites the response. A failed
// submission is recorded in `error` and leaves `response` as it was.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::PayloadParsePolicy;
use crate::state::AppState;
use crate::transport::TransportError;

pub const DEFAULT_INPUT: &str = "{}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationFlow {
    pub selected: Option<String>,
    pub input: String,
    pub response: String,
    pub error: Option<String>,
}

impl Default for InvocationFlow {
    fn default() -> Self {
        Self {
            selected: None,
            input: DEFAULT_INPUT.to_string(),
            response: String::new(),
            error: None,
        }
    }
}

impl InvocationFlow {
    pub fn select(&mut self, name: impl Into<String>) {
        self.selected = Some(name.into());
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("no resource selected")]
    NothingSelected,

    #[error("invalid JSON payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Parse the payload buffer. Under the lenient policy anything unparsable
/// becomes `{}`.
pub fn parse_payload(input: &str, policy: PayloadParsePolicy) -> Result<Value, InvokeError> {
    match serde_json::from_str::<Value>(input) {
        Ok(value) => Ok(value),
        Err(e) => match policy {
            PayloadParsePolicy::Lenient => {
                tracing::debug!("invocation: payload is not JSON, sending {{}} ({})", e);
                Ok(Value::Object(Map::new()))
            }
            PayloadParsePolicy::Strict => Err(InvokeError::InvalidPayload(e)),
        },
    }
}

/// Send the buffered payload to the selected resource and store the
/// pretty-printed reply. Returns the new response text.
///
/// A transport failure leaves the response buffer untouched.
pub async fn submit(state: &AppState) -> Result<String, InvokeError> {
    let (selected, input) = {
        let flow = state.invocation.read().await;
        match flow.selected.clone() {
            Some(name) if !name.is_empty() => (name, flow.input.clone()),
            _ => return Err(InvokeError::NothingSelected),
        }
    };

    let payload = match parse_payload(&input, state.config.payload_parse_policy) {
        Ok(payload) => payload,
        Err(e) => {
            state.invocation.write().await.error = Some(e.to_string());
            return Err(e);
        }
    };

    let reply = match state.resources_client.invoke(&selected, &payload).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("invocation: '{}' failed: {}", selected, e);
            state.invocation.write().await.error = Some(format!("Request to '{}' failed", selected));
            return Err(e.into());
        }
    };

    if !reply.status.is_success() {
        tracing::info!("invocation: '{}' answered {}", selected, reply.status);
    }

    // Value -> String cannot fail: map keys are always strings.
    let pretty = serde_json::to_string_pretty(&reply.body).unwrap_or_else(|_| reply.body.to_string());
    let mut flow = state.invocation.write().await;
    flow.response = pretty.clone();
    flow.error = None;
    Ok(pretty)
}
