use std::sync::Arc;

use crate::market_data::SnapshotCache;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
pub struct AppState {
    pub cache: SnapshotCache,
    pub top_n: usize,
}

impl AppState {
    pub fn new(cache: SnapshotCache, top_n: usize) -> Arc<Self> {
        Arc::new(Self { cache, top_n })
    }
}
