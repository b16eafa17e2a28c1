//! Paginated pull of a full market snapshot from a [`MarketSource`].

use tracing::{debug, info, instrument};

use crate::market_data::adapters::{FetchError, MarketSource};
use crate::market_data::types::MarketSnapshot;

/// How many pages to pull and how big each one is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    pub per_page: u32,
    pub max_pages: u32,
}

impl PagePlan {
    pub const fn max_records(&self) -> usize {
        self.per_page as usize * self.max_pages as usize
    }
}

impl Default for PagePlan {
    // 4 x 250 = the top 1000 coins by market cap
    fn default() -> Self {
        Self { per_page: 250, max_pages: 4 }
    }
}

/// Fetch pages 1..=max_pages in order and concatenate them.
///
/// Stops at the first empty page. Any failing page aborts the whole cycle; there
/// is no retry and no partial snapshot.
#[instrument(skip(source), level = "debug")]
pub async fn fetch_snapshot(
    source: &dyn MarketSource,
    plan: PagePlan,
) -> Result<MarketSnapshot, FetchError> {
    let mut records = Vec::with_capacity(plan.max_records());

    for page in 1..=plan.max_pages {
        let rows = source.fetch_page(page, plan.per_page).await.map_err(|e| {
            metrics::counter!("kripto_upstream_errors_total").increment(1);
            e
        })?;
        metrics::counter!("kripto_upstream_pages_total").increment(1);

        if rows.is_empty() {
            debug!(page, "empty page, stopping");
            break;
        }
        records.extend(rows);
    }

    info!(records = records.len(), "market snapshot fetched");
    metrics::gauge!("kripto_snapshot_records").set(records.len() as f64);
    Ok(MarketSnapshot::new(records))
}
