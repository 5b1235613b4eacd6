// src/model/backlog.rs

use crate::model::product::ProductId;
use std::collections::BTreeMap;

/// Requested quantities for a single day, keyed by product.
pub type DailyDemand = BTreeMap<ProductId, u32>;

/// Unfilled quantities carried from one day to the next.
///
/// Only strictly positive entries are stored: writing zero removes the
/// product from the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Backlog {
    entries: BTreeMap<ProductId, u32>,
}

impl Backlog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding quantity for a product (0 when absent).
    pub fn get(&self, product: &ProductId) -> u32 {
        self.entries.get(product).copied().unwrap_or(0)
    }

    pub fn set(&mut self, product: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.entries.remove(product);
        } else {
            self.entries.insert(product.clone(), quantity);
        }
    }

    pub fn remove(&mut self, product: &ProductId) {
        self.entries.remove(product);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all outstanding pieces, capped at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.entries
            .values()
            .fold(0u32, |acc, qty| acc.saturating_add(*qty))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, u32)> {
        self.entries.iter().map(|(id, qty)| (id, *qty))
    }
}

impl FromIterator<(ProductId, u32)> for Backlog {
    fn from_iter<I: IntoIterator<Item = (ProductId, u32)>>(iter: I) -> Self {
        let mut backlog = Backlog::new();
        for (id, qty) in iter {
            backlog.set(&id, qty);
        }
        backlog
    }
}
