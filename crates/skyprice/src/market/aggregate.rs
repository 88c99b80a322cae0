//! Per-identity price aggregation over a batch of auction records.
//!
//! Aggregation is best effort: a record that is not a BIN listing, does not
//! decode, or has no usable identity is skipped and counted, and the rest of
//! the batch is still processed.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::config::{AggregatorConfig, PriceMode};
use crate::error::RecordError;
use crate::item::{ItemIdentity, ItemView};
use crate::market::{AuctionRecord, PriceStats};

/// Identities that are never aggregated.
pub const EXCLUDED_IDENTITIES: &[&str] = &["RUNE"];

/// One accepted observation: the listing's starting bid for an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSample {
    pub identity: ItemIdentity,
    pub starting_bid: i64,
    /// Stack size of the listed item, at least 1.
    pub count: u32,
}

impl PriceSample {
    /// The price this sample contributes under `mode`.
    pub fn price(&self, mode: PriceMode) -> i64 {
        match mode {
            PriceMode::PerListing => self.starting_bid,
            PriceMode::PerUnit => self.starting_bid / i64::from(self.count),
        }
    }
}

/// Tally of skipped records by reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SkipCounts {
    pub not_bin: usize,
    pub invalid_base64: usize,
    pub decode_failed: usize,
    pub no_identity: usize,
    pub excluded: usize,
}

impl SkipCounts {
    fn record(&mut self, reason: &RecordError) {
        let slot = match reason {
            RecordError::NotBin => &mut self.not_bin,
            RecordError::InvalidBase64(_) => &mut self.invalid_base64,
            RecordError::Decode(_) => &mut self.decode_failed,
            RecordError::NoIdentity => &mut self.no_identity,
            RecordError::Excluded(_) => &mut self.excluded,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        self.not_bin + self.invalid_base64 + self.decode_failed + self.no_identity + self.excluded
    }
}

/// Result of one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    /// Statistics keyed by identity; only identities with samples appear.
    pub stats: BTreeMap<String, PriceStats>,
    pub skipped: SkipCounts,
    /// Records seen.
    pub records: usize,
    /// Records that contributed a price.
    pub samples: usize,
}

/// Turns auction records into per-identity price statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceAggregator {
    config: AggregatorConfig,
}

impl PriceAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Extracts the price sample of one record, or the reason it has none.
    pub fn sample(&self, record: &AuctionRecord) -> Result<PriceSample, RecordError> {
        if !record.bin {
            return Err(RecordError::NotBin);
        }

        let root = record.decode_item()?;
        let view = ItemView::from_root(&root).ok_or(RecordError::NoIdentity)?;
        let identity = view.identity().ok_or(RecordError::NoIdentity)?;

        if let ItemIdentity::Item(id) = &identity {
            if EXCLUDED_IDENTITIES.contains(&id.as_str()) {
                return Err(RecordError::Excluded(id.clone()));
            }
        }

        Ok(PriceSample {
            identity,
            starting_bid: record.starting_bid,
            count: view.count(),
        })
    }

    /// Aggregates `records` into statistics keyed by identity.
    pub fn aggregate(&self, records: &[AuctionRecord]) -> BTreeMap<String, PriceStats> {
        self.aggregate_with_report(records).stats
    }

    /// Aggregates `records`, also reporting what was skipped.
    pub fn aggregate_with_report(&self, records: &[AuctionRecord]) -> AggregateReport {
        let mut prices: FxHashMap<String, Vec<i64>> = FxHashMap::default();
        let mut skipped = SkipCounts::default();
        let mut samples = 0;

        for record in records {
            match self.sample(record) {
                Ok(sample) => {
                    let price = sample.price(self.config.price_mode);
                    prices.entry(sample.identity.key()).or_default().push(price);
                    samples += 1;
                }
                Err(RecordError::NotBin) => {
                    trace!(auction = %record.id, "skipping non-BIN auction");
                    skipped.record(&RecordError::NotBin);
                }
                Err(reason) => {
                    debug!(auction = %record.id, %reason, "skipping auction");
                    skipped.record(&reason);
                }
            }
        }

        let stats: BTreeMap<String, PriceStats> = prices
            .into_iter()
            .filter_map(|(key, mut list)| PriceStats::from_prices(&mut list).map(|s| (key, s)))
            .collect();

        info!(
            records = records.len(),
            samples,
            identities = stats.len(),
            skipped = skipped.total(),
            price_mode = self.config.price_mode.as_str(),
            "aggregated auction prices"
        );

        AggregateReport {
            stats,
            skipped,
            records: records.len(),
            samples,
        }
    }
}

/// Aggregates `records` with the default configuration.
pub fn aggregate(records: &[AuctionRecord]) -> BTreeMap<String, PriceStats> {
    PriceAggregator::default().aggregate(records)
}
