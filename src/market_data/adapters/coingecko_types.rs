// Source: https://api.coingecko.com/api/v3/coins/markets
use serde_json::{Map, Value};

use crate::market_data::types::MarketRecord;

pub const MARKETS_PATH: &str = "/coins/markets";

// Field names on each market object that the report reads.
pub const FIELD_NAME: &str = "name";
pub const FIELD_SYMBOL: &str = "symbol";
pub const FIELD_CURRENT_PRICE: &str = "current_price";
pub const FIELD_MARKET_CAP: &str = "market_cap";
pub const FIELD_PRICE_CHANGE_24H: &str = "price_change_percentage_24h";

// Query string for GET /coins/markets
#[derive(Debug, serde::Serialize)]
pub struct MarketsQuery<'a> {
    pub vs_currency: &'a str,
    pub order: &'a str,
    pub per_page: u32,
    pub page: u32,
    pub sparkline: bool,
}

impl MarketsQuery<'static> {
    // usd quotes, biggest market cap first, no sparkline payload
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            vs_currency: "usd",
            order: "market_cap_desc",
            per_page,
            page,
            sparkline: false,
        }
    }
}

/// Decode one page body. The upstream answers with a JSON array of objects;
/// anything else (an error object, a bare string, an array of scalars) is rejected.
pub fn decode_markets_page(body: &[u8]) -> Result<Vec<MarketRecord>, serde_json::Error> {
    let rows: Vec<Map<String, Value>> = serde_json::from_slice(body)?;
    Ok(rows.into_iter().map(MarketRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_array_of_objects() {
        let body = br#"[{"name":"Bitcoin","symbol":"btc","current_price":65000}]"#;
        let rows = decode_markets_page(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(FIELD_SYMBOL).and_then(Value::as_str), Some("btc"));
    }

    #[test]
    fn test_decode_empty_page() {
        assert!(decode_markets_page(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_error_object() {
        // what CoinGecko sends when rate limited with a 200 behind some proxies
        let body = br#"{"status":{"error_code":429,"error_message":"Throttled"}}"#;
        assert!(decode_markets_page(body).is_err());
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(decode_markets_page(b"<html>busy</html>").is_err());
        assert!(decode_markets_page(b"[1, 2, 3]").is_err());
    }
}
