//! Item identity extraction.
//!
//! An [`ItemView`] reads a decoded item tree without assuming one fixed
//! schema. Every miss along the way (absent field, wrong kind, unparsable
//! pet document) yields `None` rather than an error.

use std::fmt;

use serde::Deserialize;

use crate::model::{Compound, List, Tag};

/// Item id that marks a pet; its identity comes from `petInfo`.
pub const PET_ID: &str = "PET";

const EXTRA_ATTRIBUTES: &str = "ExtraAttributes";

/// Aggregation key of a traded good.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemIdentity {
    /// The raw `id` of ExtraAttributes.
    Item(String),
    /// A pet, keyed by its type and rarity tier.
    Pet { pet_type: String, tier: String },
}

impl ItemIdentity {
    /// Returns the canonical string key, e.g. `DIAMOND` or `pet:WOLF:LEGENDARY`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ItemIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemIdentity::Item(id) => f.write_str(id),
            ItemIdentity::Pet { pet_type, tier } => write!(f, "pet:{}:{}", pet_type, tier),
        }
    }
}

/// The JSON document stored as a string under `petInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PetInfo {
    #[serde(rename = "type")]
    pub pet_type: String,
    pub tier: String,
}

impl PetInfo {
    /// Parses a `petInfo` string; unknown fields are ignored.
    pub fn parse(json: &str) -> Option<PetInfo> {
        serde_json::from_str(json).ok()
    }
}

/// Read-only projection over one item compound.
#[derive(Debug, Clone, Copy)]
pub struct ItemView<'a> {
    item: &'a Compound,
}

impl<'a> ItemView<'a> {
    /// Views `item` directly as the item compound.
    pub fn new(item: &'a Compound) -> Self {
        Self { item }
    }

    /// Resolves the item compound of a decoded payload root.
    ///
    /// Auction payloads wrap the item as the first compound of a list named
    /// `i`; when that wrapper is absent the root compound is the item.
    pub fn from_root(root: &'a Tag) -> Option<Self> {
        let root = root.as_compound()?;
        let wrapped = root
            .get_list("i")
            .and_then(List::first)
            .and_then(Tag::as_compound);
        Some(Self::new(wrapped.unwrap_or(root)))
    }

    /// The underlying item compound.
    pub fn compound(&self) -> &'a Compound {
        self.item
    }

    /// Locates ExtraAttributes, directly or under `tag`.
    pub fn extra_attributes(&self) -> Option<&'a Compound> {
        self.item.get_compound(EXTRA_ATTRIBUTES).or_else(|| {
            self.item
                .get_compound("tag")
                .and_then(|tag| tag.get_compound(EXTRA_ATTRIBUTES))
        })
    }

    /// The raw ExtraAttributes `id`.
    pub fn id(&self) -> Option<&'a str> {
        self.extra_attributes()?.get_string("id")
    }

    /// Parsed `petInfo` document, if present and well-formed.
    pub fn pet_info(&self) -> Option<PetInfo> {
        PetInfo::parse(self.extra_attributes()?.get_string("petInfo")?)
    }

    /// Derives the aggregation identity.
    pub fn identity(&self) -> Option<ItemIdentity> {
        let id = self.id()?;
        if id == PET_ID {
            let pet = self.pet_info()?;
            return Some(ItemIdentity::Pet {
                pet_type: pet.pet_type,
                tier: pet.tier,
            });
        }
        Some(ItemIdentity::Item(id.to_string()))
    }

    /// Stack size from `Count`, at least 1.
    pub fn count(&self) -> u32 {
        self.item
            .get("Count")
            .and_then(Tag::as_integer)
            .and_then(|n| u32::try_from(n).ok())
            .filter(|&n| n > 0)
            .unwrap_or(1)
    }
}

/// Derives the identity of an item compound.
pub fn identity(item: &Compound) -> Option<ItemIdentity> {
    ItemView::new(item).identity()
}
