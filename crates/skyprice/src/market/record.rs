//! Auction records as delivered by the upstream auctions endpoint.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::codec::decode;
use crate::error::RecordError;
use crate::model::Tag;

/// One auction listing.
///
/// Unknown fields are ignored. `bin` is only sent for fixed-price listings,
/// so a missing flag means a bidding auction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionRecord {
    #[serde(rename = "uuid", default)]
    pub id: String,
    #[serde(default)]
    pub bin: bool,
    pub starting_bid: i64,
    #[serde(default)]
    pub item_name: String,
    /// Base64 of the gzip-or-raw tag stream describing the item.
    pub item_bytes: String,
}

impl AuctionRecord {
    /// Base64-decodes the item payload.
    pub fn item_payload(&self) -> Result<Vec<u8>, RecordError> {
        STANDARD
            .decode(self.item_bytes.trim())
            .map_err(|e| RecordError::InvalidBase64(e.to_string()))
    }

    /// Decodes the item payload into its root tag.
    pub fn decode_item(&self) -> Result<Tag, RecordError> {
        Ok(decode(&self.item_payload()?)?)
    }
}

/// One page of the upstream auctions listing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionPage {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_auctions: u64,
    #[serde(default)]
    pub last_updated: i64,
    #[serde(default)]
    pub auctions: Vec<AuctionRecord>,
}
