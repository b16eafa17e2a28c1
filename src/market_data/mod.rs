// Market data module entrypoint
pub mod adapters; // upstream sources (e.g. CoinGecko)
pub mod cache;    // time-boxed snapshot memo
pub mod fetcher;  // paginated pull into one snapshot
pub mod types;    // raw records + snapshot

pub use adapters::{FetchError, MarketSource};
pub use cache::{CachedSnapshot, SnapshotCache};
pub use types::{MarketRecord, MarketSnapshot};
