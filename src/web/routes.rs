use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::report::export::{to_csv, CSV_CONTENT_TYPE, CSV_FILE_NAME};
use crate::report::{transform, Report};
use crate::web::error::DashboardError;
use crate::web::html::{render_error_page, render_page};
use crate::web::state::AppState;

pub const CSV_ROUTE: &str = "/data_kripto_realtime.csv";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route(CSV_ROUTE, get(download_csv))
        .route("/health", get(health))
}

async fn load_report(state: &AppState) -> Result<(Report, Duration), DashboardError> {
    let cached = state.cache.get().await?;
    let report = Report::build(&cached.snapshot, state.top_n)?;
    Ok((report, cached.age))
}

/// GET /: the dashboard. Upstream failures still render a page, with a 502.
async fn index(State(state): State<Arc<AppState>>) -> (StatusCode, Html<String>) {
    debug!("rendering dashboard");
    match load_report(&state).await {
        Ok((report, age)) => (
            StatusCode::OK,
            Html(render_page(&report, state.top_n, age, state.cache.ttl())),
        ),
        Err(e) => {
            warn!(error = %e, "dashboard render failed");
            (e.status(), Html(render_error_page(&e.user_message())))
        }
    }
}

/// GET /data_kripto_realtime.csv: full table as an attachment.
async fn download_csv(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, DashboardError> {
    let cached = state.cache.get().await.inspect_err(|e| warn!(error = %e, "csv export fetch failed"))?;
    let rows = transform::to_display_rows(&cached.snapshot)?;
    let body = to_csv(&rows)?;
    debug!(rows = rows.len(), bytes = body.len(), "csv export");

    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{CSV_FILE_NAME}\"")),
        ],
        body,
    ))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
