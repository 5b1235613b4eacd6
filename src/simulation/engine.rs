// src/simulation/engine.rs

use crate::io::demand::DemandSource;
use crate::model::backlog::Backlog;
use crate::model::batch::BatchRecord;
use crate::model::product::ProductId;
use crate::simulation::config::SimulationConfig;
use crate::simulation::scheduler::schedule_day;
use log::{debug, info};

/// Per-day roll-up kept alongside the batch log.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub day: usize,
    pub demand: u32,
    pub minutes_used: f64,
    pub utilization: f64, // Share of the daily budget, 0.0 - 1.0
    pub backlog: u32,     // Pieces left over at the end of the day
}

/// Totals for one product across the whole run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductTotals {
    pub product: ProductId,
    pub produced: u32,
    pub scrap: u32,
    pub good: u32,
    pub setups: usize,
    pub cost: f64,
}

pub struct ProductionSimulation {
    config: SimulationConfig,

    // Inputs
    demand_source: Box<dyn DemandSource>,

    // State threaded from one day to the next
    pub backlog: Backlog,
    pub last_item: Option<ProductId>,
    pub current_day: usize,

    // Outputs
    pub history: Vec<BatchRecord>,
    pub days: Vec<DaySummary>,
}

impl ProductionSimulation {
    pub fn new(config: SimulationConfig, demand_source: Box<dyn DemandSource>) -> Self {
        Self {
            config,
            demand_source,
            backlog: Backlog::new(),
            last_item: None, // Machine starts clean, first product needs no setup
            current_day: 1,
            history: Vec::new(),
            days: Vec::new(),
        }
    }

    pub fn run(&mut self) {
        while self.current_day <= self.config.simulation_days {
            self.step();
        }

        let avg_utilization = if self.days.is_empty() {
            0.0
        } else {
            self.days.iter().map(|d| d.utilization).sum::<f64>() / self.days.len() as f64
        };
        info!(
            "Finished {} days: average utilization {:.1}%, total cost {:.2}",
            self.days.len(),
            avg_utilization * 100.0,
            self.total_cost()
        );
        if self.backlog.is_empty() {
            info!("Final backlog: none");
        }
        for (product, qty) in self.backlog.iter() {
            info!("Final backlog {}: {} pcs", product, qty);
        }
    }

    fn step(&mut self) {
        let day = self.current_day;
        let demand = self.demand_source.next_demand(&self.config);

        let outcome = schedule_day(
            day,
            &demand,
            self.last_item.as_ref(),
            &self.backlog,
            &self.config,
        );

        let summary = DaySummary {
            day,
            demand: demand.values().fold(0u32, |acc, qty| acc.saturating_add(*qty)),
            minutes_used: outcome.minutes_used,
            utilization: outcome.minutes_used / self.config.daily_minutes,
            backlog: outcome.backlog.total(),
        };

        debug!(
            "Day {}: demand {}, {} batches, {:.2} min used, backlog {}",
            summary.day,
            summary.demand,
            outcome.records.len(),
            summary.minutes_used,
            summary.backlog
        );
        if day % 5 == 0 {
            info!(
                "Day {}: utilization {:.1}%, backlog {} pcs, cost so far {:.2}",
                day,
                summary.utilization * 100.0,
                summary.backlog,
                self.total_cost() + outcome.records.iter().map(|r| r.total_cost).sum::<f64>()
            );
        }

        self.history.extend(outcome.records);
        self.backlog = outcome.backlog;
        self.last_item = outcome.last_item;
        self.days.push(summary);
        self.current_day += 1;
    }

    pub fn total_cost(&self) -> f64 {
        self.history.iter().map(|record| record.total_cost).sum()
    }
}

/// Totals per product over a batch log, in production order.
pub fn product_breakdown(order: &[ProductId], history: &[BatchRecord]) -> Vec<ProductTotals> {
    let mut breakdown = Vec::new();
    for id in order {
        let mut totals = ProductTotals {
            product: id.clone(),
            ..ProductTotals::default()
        };
        for record in history.iter().filter(|record| &record.product == id) {
            totals.produced = totals.produced.saturating_add(record.produced_qty);
            totals.scrap = totals.scrap.saturating_add(record.scrap_qty);
            totals.good = totals.good.saturating_add(record.good_qty);
            totals.cost += record.total_cost;
            if record.setup_minutes > 0.0 {
                totals.setups += 1;
            }
        }
        breakdown.push(totals);
    }
    breakdown
}

/// Runs a full horizon and returns the batch log.
pub fn run_simulation(config: SimulationConfig, demand_source: Box<dyn DemandSource>) -> Vec<BatchRecord> {
    let mut sim = ProductionSimulation::new(config, demand_source);
    sim.run();
    sim.history
}
