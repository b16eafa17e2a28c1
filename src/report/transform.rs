//! Projection of raw upstream records onto the five display columns.
//!
//! Every record must carry all five keys. `name` and `symbol` must be strings;
//! the numeric columns accept `null` (kept as `None`) but nothing non-numeric.

use serde_json::Value;

use crate::market_data::adapters::coingecko_types::{
    FIELD_CURRENT_PRICE, FIELD_MARKET_CAP, FIELD_NAME, FIELD_PRICE_CHANGE_24H, FIELD_SYMBOL,
};
use crate::market_data::types::{MarketRecord, MarketSnapshot};
use crate::report::types::{DisplayRow, SchemaError};

pub fn to_display_rows(snapshot: &MarketSnapshot) -> Result<Vec<DisplayRow>, SchemaError> {
    snapshot
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| project(index, record))
        .collect()
}

fn project(index: usize, record: &MarketRecord) -> Result<DisplayRow, SchemaError> {
    Ok(DisplayRow {
        name: text(index, record, FIELD_NAME)?,
        symbol: text(index, record, FIELD_SYMBOL)?,
        price_usd: number(index, record, FIELD_CURRENT_PRICE)?,
        market_cap: number(index, record, FIELD_MARKET_CAP)?,
        change_24h_pct: number(index, record, FIELD_PRICE_CHANGE_24H)?,
    })
}

fn field<'a>(index: usize, record: &'a MarketRecord, key: &'static str) -> Result<&'a Value, SchemaError> {
    record.get(key).ok_or(SchemaError::MissingField { index, field: key })
}

fn text(index: usize, record: &MarketRecord, name: &'static str) -> Result<String, SchemaError> {
    match field(index, record, name)? {
        Value::String(s) => Ok(s.clone()),
        _ => Err(SchemaError::WrongType { index, field: name, expected: "a string" }),
    }
}

fn number(index: usize, record: &MarketRecord, name: &'static str) -> Result<Option<f64>, SchemaError> {
    match field(index, record, name)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        _ => Err(SchemaError::WrongType { index, field: name, expected: "a number or null" }),
    }
}
