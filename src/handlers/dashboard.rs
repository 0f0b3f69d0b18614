// ---------------------------------------------------------------------------
// handlers/dashboard.rs - View snapshot, catalog refresh, HTML page
// ---------------------------------------------------------------------------

use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::Json;

use crate::catalog;
use crate::state::AppState;
use crate::view::{self, DashboardView};

/// GET /api/dashboard
pub async fn dashboard_snapshot(State(state): State<AppState>) -> Json<DashboardView> {
    Json(view::snapshot(&state).await)
}

/// POST /api/catalog/refresh - reload both catalogs, then return the new view.
pub async fn refresh_catalogs(State(state): State<AppState>) -> Json<DashboardView> {
    catalog::refresh(&state).await;
    Json(view::snapshot(&state).await)
}

/// GET /
pub async fn dashboard_page(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = view::snapshot(&state).await;
    (
        [(header::CACHE_CONTROL, "no-store")],
        Html(view::render_page(&snapshot)),
    )
}
