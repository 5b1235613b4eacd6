// src/model/product.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a part variant (e.g. "IS", "IR", "IAP").
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Static definition of a product the machine can build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub rate_per_minute: f64,    // Pieces per minute of machine time
    pub cost_per_piece: f64,     // Raw material cost
    pub scrap_rate_percent: f64, // Average defective share, in percent
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        rate_per_minute: f64,
        cost_per_piece: f64,
        scrap_rate_percent: f64,
    ) -> Self {
        Self {
            id: id.into(),
            rate_per_minute,
            cost_per_piece,
            scrap_rate_percent,
        }
    }

    pub fn scrap_fraction(&self) -> f64 {
        self.scrap_rate_percent / 100.0
    }

    /// Whole pieces that fit into `minutes` of machine time.
    pub fn max_producible(&self, minutes: f64) -> u32 {
        if minutes <= 0.0 {
            return 0;
        }
        (minutes * self.rate_per_minute).floor() as u32
    }

    /// Machine minutes needed to build `quantity` pieces.
    pub fn minutes_for(&self, quantity: u32) -> f64 {
        quantity as f64 / self.rate_per_minute
    }

    /// Defective pieces in a batch, rounded down.
    pub fn scrap_for(&self, produced: u32) -> u32 {
        (produced as f64 * self.scrap_fraction()).floor() as u32
    }
}
