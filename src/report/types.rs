use serde::{Deserialize, Serialize};
use thiserror::Error;

// Display labels, in column order. Also the CSV header.
pub const COLUMNS: [&str; 5] = ["Nama", "Simbol", "Harga (USD)", "Market Cap", "Perubahan 24h (%)"];

/// One projected table row. Absent numeric values stay `None` (null upstream).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    #[serde(rename = "Nama")]
    pub name: String,
    #[serde(rename = "Simbol")]
    pub symbol: String,
    #[serde(rename = "Harga (USD)")]
    pub price_usd: Option<f64>,
    #[serde(rename = "Market Cap")]
    pub market_cap: Option<f64>,
    #[serde(rename = "Perubahan 24h (%)")]
    pub change_24h_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("record {index} has no `{field}` field")]
    MissingField { index: usize, field: &'static str },

    #[error("record {index} field `{field}` should be {expected}")]
    WrongType {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },
}

/// Top-N subsequence of the display table, descending by price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedView {
    pub rows: Vec<DisplayRow>,
}

impl RankedView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
