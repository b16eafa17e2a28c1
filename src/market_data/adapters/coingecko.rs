// CoinGecko REST adapter: one GET per page against /coins/markets

use std::time::Duration;

use tracing::{debug, warn};

use super::coingecko_types::{decode_markets_page, MarketsQuery, MARKETS_PATH};
use super::{FetchError, MarketSource};
use crate::market_data::types::MarketRecord;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct CoinGeckoAdapter {
    client: reqwest::Client,
    markets_url: String, // e.g. "https://api.coingecko.com/api/v3/coins/markets"
}

impl CoinGeckoAdapter {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kripto-rs/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            markets_url: format!("{}{}", base_url.trim_end_matches('/'), MARKETS_PATH),
        })
    }

    pub fn markets_url(&self) -> &str {
        &self.markets_url
    }
}

#[async_trait::async_trait]
impl MarketSource for CoinGeckoAdapter {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<MarketRecord>, FetchError> {
        let query = MarketsQuery::page(page, per_page);

        let res = self
            .client
            .get(&self.markets_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                warn!(page, error = %e, "markets request failed");
                FetchError::Network { page, message: e.to_string() }
            })?;

        let status = res.status();
        if !status.is_success() {
            warn!(page, status = status.as_u16(), "markets request rejected");
            return Err(FetchError::Status { page, status: status.as_u16() });
        }

        let body = res
            .bytes()
            .await
            .map_err(|e| FetchError::Network { page, message: e.to_string() })?;

        let rows = decode_markets_page(&body)
            .map_err(|e| FetchError::Decode { page, message: e.to_string() })?;

        debug!(page, count = rows.len(), "fetched markets page");
        Ok(rows)
    }
}
