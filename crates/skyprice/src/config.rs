//! Aggregation settings, loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `SKYPRICE_PRICE_MODE`: `listing` | `unit` (default: listing)

use std::str::FromStr;

use crate::error::ConfigError;

/// Environment variable selecting the [`PriceMode`].
pub const PRICE_MODE_ENV: &str = "SKYPRICE_PRICE_MODE";

/// How a listing's starting bid becomes a price sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceMode {
    /// The starting bid as listed, whatever the stack size.
    #[default]
    PerListing,
    /// The starting bid divided by the item's stack count (integer division).
    PerUnit,
}

impl PriceMode {
    /// Get the setting name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PerListing => "listing",
            Self::PerUnit => "unit",
        }
    }
}

impl FromStr for PriceMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "listing" | "per_listing" => Ok(Self::PerListing),
            "unit" | "per_unit" => Ok(Self::PerUnit),
            _ => Err(ConfigError::InvalidValue {
                key: PRICE_MODE_ENV,
                value: s.to_string(),
                expected: "listing, unit",
            }),
        }
    }
}

/// Settings for [`PriceAggregator`](crate::market::PriceAggregator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregatorConfig {
    pub price_mode: PriceMode,
}

impl AggregatorConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unrecognized value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let price_mode = match lookup(PRICE_MODE_ENV) {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => PriceMode::default(),
        };
        Ok(Self { price_mode })
    }
}
