use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::market_data::FetchError;
use crate::report::export::ExportError;
use crate::report::SchemaError;

/// Unified error type for dashboard responses.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("upstream fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("unexpected market data: {0}")]
    Schema(#[from] SchemaError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

impl DashboardError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Fetch(_) | Self::Schema(_) => StatusCode::BAD_GATEWAY,
            Self::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short message for the page, saying what broke and what to do about it.
    pub fn user_message(&self) -> String {
        match self {
            Self::Fetch(e) if e.is_network() => format!(
                "Gagal menghubungi CoinGecko ({e}). Periksa koneksi atau batas permintaan API, lalu muat ulang halaman."
            ),
            Self::Fetch(e) => format!(
                "Respons CoinGecko tidak dapat dibaca ({e}). Muat ulang halaman untuk mencoba lagi."
            ),
            Self::Schema(e) => format!(
                "Format data CoinGecko berubah ({e}). Muat ulang halaman untuk mencoba lagi."
            ),
            Self::Export(e) => format!("Gagal membuat file CSV ({e})."),
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        (self.status(), self.user_message()).into_response()
    }
}
