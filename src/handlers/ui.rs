// ---------------------------------------------------------------------------
// handlers/ui.rs - Form endpoints behind the HTML page
// Each one performs the same operation as its JSON twin, then sends the
// browser back to `/`. Failures are already recorded in the view state.
// ---------------------------------------------------------------------------

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;

use crate::actions::ModelAction;
use crate::invocation;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SelectForm {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub input: String,
}

/// POST /ui/select
pub async fn ui_select(State(state): State<AppState>, Form(form): Form<SelectForm>) -> Redirect {
    if !form.name.is_empty() {
        state.invocation.write().await.select(form.name);
    }
    Redirect::to("/")
}

/// POST /ui/submit - stores the textarea content, then submits it.
pub async fn ui_submit(State(state): State<AppState>, Form(form): Form<SubmitForm>) -> Redirect {
    state.invocation.write().await.set_input(form.input);
    if let Err(e) = invocation::submit(&state).await {
        tracing::debug!("ui: submit failed: {}", e);
    }
    Redirect::to("/")
}

/// POST /ui/models/{name}/pull
pub async fn ui_pull_model(State(state): State<AppState>, Path(name): Path<String>) -> Redirect {
    drop(state.actions.start(&name, ModelAction::Pull));
    Redirect::to("/")
}

/// POST /ui/models/{name}/delete
pub async fn ui_delete_model(State(state): State<AppState>, Path(name): Path<String>) -> Redirect {
    drop(state.actions.start(&name, ModelAction::Delete));
    Redirect::to("/")
}
