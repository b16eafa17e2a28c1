use crate::report::types::{DisplayRow, RankedView};

pub const DEFAULT_TOP_N: usize = 10;

/// The `n` most expensive rows, highest price first.
///
/// Rows without a price cannot be ordered and are left out. Equal prices keep
/// their table order.
pub fn top_by_price(rows: &[DisplayRow], n: usize) -> RankedView {
    let mut priced: Vec<(usize, f64)> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.price_usd.map(|p| (i, p)))
        .collect();

    // sort_by is stable, so ties stay in snapshot order
    priced.sort_by(|a, b| b.1.total_cmp(&a.1));

    RankedView {
        rows: priced.into_iter().take(n).map(|(i, _)| rows[i].clone()).collect(),
    }
}
