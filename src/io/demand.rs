// src/io/demand.rs

use crate::model::backlog::DailyDemand;
use crate::simulation::config::SimulationConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

/// Supplies one day of customer demand at a time.
pub trait DemandSource {
    fn next_demand(&mut self, config: &SimulationConfig) -> DailyDemand;
}

/// Draws an integer uniformly from `demand_range` (inclusive) for every
/// configured product.
pub fn generate_daily_demand<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> DailyDemand {
    let (min_demand, max_demand) = config.demand_range;
    let range = Uniform::new_inclusive(min_demand, max_demand);

    config
        .products
        .iter()
        .map(|product| (product.id.clone(), range.sample(rng)))
        .collect()
}

/// Random demand, reproducible when seeded.
#[derive(Debug, Clone)]
pub struct UniformDemand {
    rng: StdRng,
}

impl UniformDemand {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.seed)
    }
}

impl DemandSource for UniformDemand {
    fn next_demand(&mut self, config: &SimulationConfig) -> DailyDemand {
        generate_daily_demand(config, &mut self.rng)
    }
}

/// Replays a fixed list of days, then reports no demand.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ScriptedDemand {
    days: std::collections::VecDeque<DailyDemand>,
}

#[cfg(test)]
impl ScriptedDemand {
    pub fn new(days: Vec<DailyDemand>) -> Self {
        Self { days: days.into() }
    }

    /// The same demand every day, for stability checks.
    pub fn constant(demand: DailyDemand, days: usize) -> Self {
        Self::new(vec![demand; days])
    }
}

#[cfg(test)]
impl DemandSource for ScriptedDemand {
    fn next_demand(&mut self, _config: &SimulationConfig) -> DailyDemand {
        self.days.pop_front().unwrap_or_default()
    }
}
