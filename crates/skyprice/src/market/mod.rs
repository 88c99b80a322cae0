//! Auction market data: records, price statistics and aggregation.

pub mod aggregate;
pub mod record;
pub mod stats;

pub use aggregate::{
    AggregateReport, EXCLUDED_IDENTITIES, PriceAggregator, PriceSample, SkipCounts, aggregate,
};
pub use record::{AuctionPage, AuctionRecord};
pub use stats::{PriceStats, mean, median};
