//! Summary statistics over price samples.

use serde::{Deserialize, Serialize};

/// Price summary for one identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub lowest: i64,
    pub highest: i64,
    pub median: i64,
    pub mean: f64,
}

impl PriceStats {
    /// Sorts `prices` ascending and summarizes them. Returns `None` when empty.
    pub fn from_prices(prices: &mut [i64]) -> Option<Self> {
        prices.sort_unstable();
        Some(Self {
            lowest: *prices.first()?,
            highest: *prices.last()?,
            median: median(prices)?,
            mean: mean(prices)?,
        })
    }
}

/// Median of an ascending slice, using the market's established rule.
///
/// One or two samples give the first. An even count above two averages the
/// elements at `n/2` and `n/2 + 1` (the upper-middle pair), rounding toward
/// zero. An odd count gives the element at `n/2`. Published prices depend on
/// these exact values, so this is not the textbook median.
pub fn median(sorted: &[i64]) -> Option<i64> {
    match sorted.len() {
        0 => None,
        1 | 2 => Some(sorted[0]),
        n if n % 2 == 0 => {
            let middle = n / 2;
            let sum = i128::from(sorted[middle]) + i128::from(sorted[middle + 1]);
            Some((sum / 2) as i64)
        }
        n => Some(sorted[n / 2]),
    }
}

/// Arithmetic mean as a float.
pub fn mean(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|&v| v as f64).sum();
    Some(sum / values.len() as f64)
}
