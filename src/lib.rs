//! Realtime crypto market dashboard: pulls the top coins from CoinGecko, caches
//! the snapshot for a few minutes, and serves a table, a top-N bar chart and a
//! CSV export over HTTP.

pub mod config;
pub mod market_data;
pub mod report;
pub mod telemetry;
pub mod web;
