// MCP Dashboard - Catalog loaders
//
// Two independent loaders fill two disjoint lists. They share nothing and
// may finish in either order. Failure visibility differs on purpose:
// a failed resource load is only logged, a failed model load is shown.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Model, Resource};
use crate::state::AppState;

/// Text shown when the model catalog cannot be fetched.
pub const MODELS_FETCH_ERROR: &str = "Failed to fetch models";

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourcesView {
    pub resources: Vec<Resource>,
    pub loaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ModelsView {
    pub models: Vec<Model>,
    pub loading: bool,
    pub error: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Replace the resource list with the server's catalog. On failure the
/// previous list stays and nothing is surfaced to the view.
pub async fn load_resources(state: &AppState) {
    match state.resources_client.list_resources().await {
        Ok(resources) => {
            tracing::info!("catalog: {} resources loaded", resources.len());
            let mut view = state.resources.write().await;
            view.resources = resources;
            view.loaded_at = Some(Utc::now());
        }
        Err(e) => {
            tracing::warn!("catalog: resource list unavailable: {}", e);
        }
    }
}

/// Replace the model list with the runtime's catalog, tracking `loading`
/// and setting a visible error on failure.
pub async fn load_models(state: &AppState) {
    state.models.write().await.loading = true;

    let result = state.runtime_client.list_models().await;

    let mut view = state.models.write().await;
    view.loading = false;
    match result {
        Ok(models) => {
            tracing::info!("catalog: {} models loaded", models.len());
            view.models = models;
            view.error = None;
            view.loaded_at = Some(Utc::now());
        }
        Err(e) => {
            tracing::warn!("catalog: model list unavailable: {}", e);
            view.error = Some(MODELS_FETCH_ERROR.to_string());
        }
    }
}

/// Run both loaders concurrently and wait for both.
pub async fn refresh(state: &AppState) {
    tokio::join!(load_resources(state), load_models(state));
}

/// Spawn both loaders as independent tasks. The state is marked ready once
/// both have finished, whichever order they finish in.
pub fn spawn_startup(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let resources = {
            let state = state.clone();
            tokio::spawn(async move { load_resources(&state).await })
        };
        let models = {
            let state = state.clone();
            tokio::spawn(async move { load_models(&state).await })
        };

        if let Err(e) = resources.await {
            tracing::error!("startup: resource loader panicked: {}", e);
        }
        if let Err(e) = models.await {
            tracing::error!("startup: model loader panicked: {}", e);
        }
        state.mark_ready();
    })
}
