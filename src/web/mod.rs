// HTTP shell: one page, one csv download, one health check
pub mod error;
pub mod html;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::DashboardError;
pub use state::AppState;

/// Assemble the app router with its state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
