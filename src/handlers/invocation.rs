// ---------------------------------------------------------------------------
// handlers/invocation.rs - Resource selection, payload buffer, submission
// ---------------------------------------------------------------------------

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::invocation;
use crate::state::AppState;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub input: String,
}

/// POST /api/invocation/select
pub async fn select_resource(
    State(state): State<AppState>,
    Json(body): Json<SelectRequest>,
) -> Result<Json<Value>, ApiError> {
    if body.name.is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".to_string()));
    }
    let mut flow = state.invocation.write().await;
    flow.select(body.name);
    Ok(Json(json!({ "selected": flow.selected })))
}

/// PUT /api/invocation/input
pub async fn set_input(
    State(state): State<AppState>,
    Json(body): Json<InputRequest>,
) -> Json<Value> {
    state.invocation.write().await.set_input(body.input);
    Json(json!({ "updated": true }))
}

/// POST /api/invocation/submit
pub async fn submit_invocation(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let response = invocation::submit(&state).await?;
    Ok(Json(json!({ "response": response })))
}
