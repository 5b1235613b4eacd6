// src/model/batch.rs

use crate::model::product::ProductId;
use serde::{Serialize, Serializer};

/// Outcome of one product attempted on one day.
///
/// Field order matches the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRecord {
    pub day: usize,
    pub product: ProductId,
    pub requested_qty: u32, // Backlog + new demand
    pub produced_qty: u32,
    pub scrap_qty: u32,
    pub good_qty: u32,
    #[serde(serialize_with = "two_decimals")]
    pub production_minutes: f64,
    #[serde(serialize_with = "two_decimals")]
    pub setup_minutes: f64,
    #[serde(serialize_with = "two_decimals")]
    pub total_cost: f64,
}

/// Rounds to 2 decimal places (half away from zero).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_places() {
        assert_eq!(round2(140.0), 140.0);
        assert_eq!(round2(83.333333), 83.33);
        assert_eq!(round2(66.666666), 66.67);
    }
}
