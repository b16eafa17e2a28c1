// Report module: raw snapshot -> display table -> ranked view -> chart / csv
pub mod chart;     // bar chart model + svg
pub mod export;    // csv download
pub mod rank;      // top-N by price
pub mod transform; // raw records -> display rows
pub mod types;

pub use types::{DisplayRow, RankedView, SchemaError, COLUMNS};

use crate::market_data::types::MarketSnapshot;

/// Everything the page shows, derived from one snapshot.
#[derive(Debug, Clone)]
pub struct Report {
    pub table: Vec<DisplayRow>,
    pub ranked: RankedView,
    pub chart: chart::BarChart,
}

impl Report {
    pub fn build(snapshot: &MarketSnapshot, top_n: usize) -> Result<Self, SchemaError> {
        let table = transform::to_display_rows(snapshot)?;
        let ranked = rank::top_by_price(&table, top_n);
        let chart = chart::BarChart::from_ranked(&ranked, top_n);
        Ok(Self { table, ranked, chart })
    }
}
