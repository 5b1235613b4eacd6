// src/simulation/config.rs

use crate::model::product::{Product, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("duplicate product '{0}'")]
    DuplicateProduct(ProductId),

    #[error("production order references unknown product '{0}'")]
    UnknownProduct(ProductId),

    #[error("product '{0}' appears more than once in the production order")]
    RepeatedInOrder(ProductId),
}

fn invalid(field: impl Into<String>, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidField {
        field: field.into(),
        reason: reason.into(),
    }
}

/// Plant parameters, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub daily_minutes: f64,
    pub setup_time: f64,
    pub setup_cost: f64,
    pub cost_per_minute_running: f64,
    pub demand_range: (u32, u32), // Inclusive (min, max)
    pub simulation_days: usize,
    pub products: Vec<Product>,
    pub production_order: Vec<ProductId>,
    #[serde(default)]
    pub seed: Option<u64>, // Demand generator seed; entropy when absent
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            daily_minutes: 480.0, // One 8 hour shift
            setup_time: 30.0,
            setup_cost: 15.0,
            cost_per_minute_running: 0.10,
            demand_range: (50, 150),
            simulation_days: 30,
            products: vec![
                Product::new("IS", 0.5, 1.20, 3.0),  // Standard gear
                Product::new("IR", 0.4, 1.50, 4.0),  // Reinforced gear
                Product::new("IAP", 0.3, 1.80, 5.0), // High precision gear
            ],
            production_order: vec!["IS".into(), "IR".into(), "IAP".into()],
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Loads and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        let config: SimulationConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: display,
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Checks every range constraint and cross reference.
    ///
    /// Comparisons are written so that NaN fails them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.daily_minutes > 0.0) {
            return Err(invalid("daily_minutes", "must be greater than 0"));
        }
        if !(self.setup_time >= 0.0) {
            return Err(invalid("setup_time", "must not be negative"));
        }
        if !(self.setup_cost >= 0.0) {
            return Err(invalid("setup_cost", "must not be negative"));
        }
        if !(self.cost_per_minute_running >= 0.0) {
            return Err(invalid("cost_per_minute_running", "must not be negative"));
        }
        let (min_demand, max_demand) = self.demand_range;
        if min_demand > max_demand {
            return Err(invalid(
                "demand_range",
                format!("min {} is above max {}", min_demand, max_demand),
            ));
        }
        if self.simulation_days < 1 {
            return Err(invalid("simulation_days", "must be at least 1"));
        }

        let mut seen = BTreeSet::new();
        for product in &self.products {
            if !seen.insert(&product.id) {
                return Err(ConfigError::DuplicateProduct(product.id.clone()));
            }
            if !(product.rate_per_minute > 0.0) {
                return Err(invalid(
                    format!("products.{}.rate_per_minute", product.id),
                    "must be greater than 0",
                ));
            }
            if !(product.cost_per_piece >= 0.0) {
                return Err(invalid(
                    format!("products.{}.cost_per_piece", product.id),
                    "must not be negative",
                ));
            }
            if !(product.scrap_rate_percent >= 0.0 && product.scrap_rate_percent < 100.0) {
                return Err(invalid(
                    format!("products.{}.scrap_rate_percent", product.id),
                    "must be in [0, 100)",
                ));
            }
        }

        let mut ordered = BTreeSet::new();
        for id in &self.production_order {
            if !seen.contains(id) {
                return Err(ConfigError::UnknownProduct(id.clone()));
            }
            if !ordered.insert(id) {
                return Err(ConfigError::RepeatedInOrder(id.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.products.len(), 3);
        assert_eq!(config.product(&"IR".into()).unwrap().rate_per_minute, 0.4);
    }

    #[test]
    fn rejects_non_positive_daily_minutes() {
        let config = SimulationConfig {
            daily_minutes: 0.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidField { ref field, .. }) if field == "daily_minutes"
        ));
    }

    #[test]
    fn rejects_inverted_demand_range() {
        let config = SimulationConfig {
            demand_range: (20, 10),
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_days() {
        let config = SimulationConfig {
            simulation_days: 0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_product_parameters() {
        let mut config = SimulationConfig::default();
        config.products[0].rate_per_minute = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.products[1].scrap_rate_percent = 100.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.products[2].cost_per_piece = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_order_problems() {
        let mut config = SimulationConfig::default();
        config.production_order.push("XX".into());
        assert!(matches!(config.validate(), Err(ConfigError::UnknownProduct(_))));

        let mut config = SimulationConfig::default();
        config.production_order = vec!["IS".into(), "IS".into()];
        assert!(matches!(config.validate(), Err(ConfigError::RepeatedInOrder(_))));

        let mut config = SimulationConfig::default();
        config.products.push(Product::new("IS", 1.0, 1.0, 0.0));
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateProduct(_))));
    }

    #[test]
    fn partial_production_order_is_allowed() {
        let config = SimulationConfig {
            production_order: vec!["IAP".into()],
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_json_file() {
        let json = r#"{
            "daily_minutes": 480,
            "setup_time": 30,
            "setup_cost": 15.0,
            "cost_per_minute_running": 0.1,
            "demand_range": [10, 20],
            "simulation_days": 5,
            "products": [
                {"id": "X", "rate_per_minute": 0.5, "cost_per_piece": 1.2, "scrap_rate_percent": 3.0}
            ],
            "production_order": ["X"],
            "seed": 7
        }"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = SimulationConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.demand_range, (10, 20));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.production_order, vec![ProductId::new("X")]);
    }

    #[test]
    fn reports_missing_and_malformed_files() {
        let missing = SimulationConfig::from_json_file("/nonexistent/plant.json");
        assert!(matches!(missing, Err(ConfigError::Read { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let malformed = SimulationConfig::from_json_file(file.path());
        assert!(matches!(malformed, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn invalid_file_contents_fail_validation() {
        let mut config = SimulationConfig::default();
        config.setup_time = -1.0;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&config).unwrap().as_bytes())
            .unwrap();

        let loaded = SimulationConfig::from_json_file(file.path());
        assert!(matches!(loaded, Err(ConfigError::InvalidField { .. })));
    }
}
