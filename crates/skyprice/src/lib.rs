//! skyprice: tag-tree item decoding and auction price aggregation.
//!
//! This crate decodes the binary, tag-based item format used in SkyBlock
//! auction payloads, derives a stable identity for each item, and summarizes
//! fixed-price listings into per-identity price statistics.
//!
//! # Quick Start
//!
//! ```rust
//! use skyprice::codec::{decode, Writer};
//! use skyprice::item::ItemView;
//! use skyprice::model::TagType;
//!
//! // {ExtraAttributes: {id: "DIAMOND"}}
//! let mut w = Writer::new();
//! w.write_entry_header(TagType::Compound, "");
//! w.write_entry_header(TagType::Compound, "ExtraAttributes");
//! w.write_entry_header(TagType::String, "id");
//! w.write_string("DIAMOND");
//! w.write_end();
//! w.write_end();
//!
//! let root = decode(w.as_bytes()).unwrap();
//! let identity = ItemView::from_root(&root).and_then(|v| v.identity()).unwrap();
//! assert_eq!(identity.key(), "DIAMOND");
//! ```
//!
//! # Modules
//!
//! - [`codec`]: Binary decoding with gzip envelope detection
//! - [`model`]: Tag tree types (Tag, Compound, List)
//! - [`item`]: Item identity extraction
//! - [`market`]: Auction records and price aggregation
//! - [`config`]: Aggregation settings
//! - [`error`]: Error types
//! - [`limits`]: Security limits for decoding
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Nesting depth and decompressed size are bounded
//! - Lengths are checked against the remaining input before allocating
//! - Invalid data is rejected with descriptive errors, never a partial tree
//!
//! # Wire Format
//!
//! Big-endian, one unnamed root entry, optionally gzip-wrapped. The decoder
//! detects gzip by its magic bytes.

pub mod codec;
pub mod config;
pub mod error;
pub mod item;
pub mod limits;
pub mod market;
pub mod model;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types at crate root
pub use codec::decode;
pub use config::{AggregatorConfig, PriceMode};
pub use error::{ConfigError, DecodeError, RecordError};
pub use item::{ItemIdentity, ItemView, PetInfo};
pub use market::{
    AggregateReport, AuctionPage, AuctionRecord, PriceAggregator, PriceSample, PriceStats,
    SkipCounts, aggregate,
};
pub use model::{Compound, List, Lookup, Tag, TagType};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
