// ---------------------------------------------------------------------------
// handlers/models.rs - Pull / delete actions on the model runtime
// ---------------------------------------------------------------------------

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

use crate::actions::ModelAction;
use crate::state::AppState;

/// POST /api/models/{name}/pull - returns as soon as the status is `pulling`.
pub async fn pull_model(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    start_action(&state, &name, ModelAction::Pull)
}

/// DELETE /api/models/{name} - returns as soon as the status is `deleting`.
pub async fn delete_model(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    start_action(&state, &name, ModelAction::Delete)
}

fn start_action(state: &AppState, name: &str, action: ModelAction) -> (StatusCode, Json<Value>) {
    // The spawned task owns the request; the handle is not awaited here.
    drop(state.actions.start(name, action));
    (
        StatusCode::ACCEPTED,
        Json(json!({ "name": name, "status": action.in_progress() })),
    )
}
