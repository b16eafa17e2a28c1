// Shared trait + errors for upstream market data sources

use thiserror::Error;

use crate::market_data::types::MarketRecord;

#[derive(Debug, Error)]
pub enum FetchError {
    // Request never completed (connect, TLS, timeout, body read).
    #[error("network error on page {page}: {message}")]
    Network { page: u32, message: String },

    #[error("upstream answered HTTP {status} for page {page}")]
    Status { page: u32, status: u16 },

    #[error("could not decode page {page}: {message}")]
    Decode { page: u32, message: String },
}

impl FetchError {
    pub fn page(&self) -> u32 {
        match self {
            FetchError::Network { page, .. }
            | FetchError::Status { page, .. }
            | FetchError::Decode { page, .. } => *page,
        }
    }

    /// True for the network class of failures (transport or non-2xx status).
    pub fn is_network(&self) -> bool {
        !matches!(self, FetchError::Decode { .. })
    }
}

#[async_trait::async_trait]
pub trait MarketSource: Send + Sync {
    // One page of records, 1-based. An empty Vec means the upstream ran out.
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<MarketRecord>, FetchError>;
}

pub mod coingecko;
pub mod coingecko_types;
