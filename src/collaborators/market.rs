use crate::errors::{CertigradeError, Result};
use std::collections::HashMap;

/// Source of raw (ungraded) market values.
///
/// A card without a known price is an upstream failure, never a default.
pub trait MarketData: Send + Sync {
    fn base_value(&self, card_id: &str) -> Result<f64>;
}

/// Fixed price list, e.g. a snapshot exported from a pricing feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceList {
    prices: HashMap<String, f64>,
}

impl PriceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, card_id: impl Into<String>, value: f64) -> Self {
        self.prices.insert(card_id.into(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl FromIterator<(String, f64)> for PriceList {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

impl MarketData for PriceList {
    fn base_value(&self, card_id: &str) -> Result<f64> {
        self.prices.get(card_id).copied().ok_or_else(|| {
            CertigradeError::upstream("market-data", format!("no price for card {}", card_id))
        })
    }
}
