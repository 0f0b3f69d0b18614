pub mod actions;
pub mod catalog;
pub mod config;
pub mod handlers;
pub mod invocation;
pub mod mcp;
pub mod models;
pub mod ollama;
pub mod state;
pub mod transport;
pub mod view;

use axum::routing::{delete, get, post, put};
use axum::Router;

use state::AppState;

/// Build the application router with the given state.
/// Extracted from `main()` so integration tests can construct the app
/// without binding to a network port.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // HTML page
        .route("/", get(handlers::dashboard_page))
        // Health
        .route("/api/health", get(handlers::health))
        .route("/api/health/ready", get(handlers::readiness))
        // View state
        .route("/api/dashboard", get(handlers::dashboard_snapshot))
        .route("/api/catalog/refresh", post(handlers::refresh_catalogs))
        // Resource invocation
        .route("/api/invocation/select", post(handlers::select_resource))
        .route("/api/invocation/input", put(handlers::set_input))
        .route("/api/invocation/submit", post(handlers::submit_invocation))
        // Model actions
        .route("/api/models/{name}/pull", post(handlers::pull_model))
        .route("/api/models/{name}", delete(handlers::delete_model))
        // Form endpoints for the HTML page
        .route("/ui/select", post(handlers::ui_select))
        .route("/ui/submit", post(handlers::ui_submit))
        .route("/ui/models/{name}/pull", post(handlers::ui_pull_model))
        .route("/ui/models/{name}/delete", post(handlers::ui_delete_model))
        // Shared state
        .with_state(state)
}
