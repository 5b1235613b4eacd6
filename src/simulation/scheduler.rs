// src/simulation/scheduler.rs

//! Per-day allocation of machine time across products.
//!
//! Products are visited in the configured production order. Switching the
//! machine to a different product costs a fixed setup; the very first
//! product of the whole run starts on a clean machine. The day ends when a
//! setup no longer fits or when the time budget is used up.

use crate::model::backlog::{Backlog, DailyDemand};
use crate::model::batch::{round2, BatchRecord};
use crate::model::product::ProductId;
use crate::simulation::config::SimulationConfig;
use log::debug;

/// Floating point slack when deciding the day is full (minutes).
pub const TIME_EPSILON: f64 = 0.01;

/// Everything a single day hands back to the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct DayOutcome {
    pub records: Vec<BatchRecord>,
    pub last_item: Option<ProductId>,
    pub minutes_used: f64,
    pub backlog: Backlog,
}

/// Schedules one working day.
///
/// `backlog` is the carry-over from the previous day and is left untouched;
/// the returned outcome holds a fresh backlog. Products of the production
/// order that the day never reaches keep their carry-over plus today's
/// demand.
pub fn schedule_day(
    day: usize,
    demand: &DailyDemand,
    last_item: Option<&ProductId>,
    backlog: &Backlog,
    config: &SimulationConfig,
) -> DayOutcome {
    let mut new_backlog = backlog.clone();
    let mut last_item = last_item.cloned();
    let mut minutes_used = 0.0_f64;
    let mut records = Vec::new();

    // Saturates so an oversized carry-over cannot wrap around.
    let requested =
        |id: &ProductId| backlog.get(id).saturating_add(demand.get(id).copied().unwrap_or(0));

    for (position, id) in config.production_order.iter().enumerate() {
        let total_needed = requested(id);
        if total_needed == 0 {
            new_backlog.remove(id);
            continue;
        }

        let Some(product) = config.product(id) else {
            continue;
        };

        let needs_setup = matches!(&last_item, Some(previous) if previous != id);
        let setup_minutes = if needs_setup { config.setup_time } else { 0.0 };

        if minutes_used + setup_minutes > config.daily_minutes {
            debug!(
                "Day {}: no time left to set up {} ({:.2} min used)",
                day, id, minutes_used
            );
            new_backlog.set(id, total_needed);
            roll_over_unvisited(&config.production_order[position + 1..], &requested, &mut new_backlog);
            break;
        }

        minutes_used += setup_minutes;
        let mut batch_cost = if needs_setup { config.setup_cost } else { 0.0 };

        let remaining_minutes = config.daily_minutes - minutes_used;
        let produced = total_needed.min(product.max_producible(remaining_minutes));

        let mut production_minutes = 0.0;
        let mut scrap = 0;
        if produced > 0 {
            production_minutes = product.minutes_for(produced);
            minutes_used += production_minutes;
            batch_cost += produced as f64 * product.cost_per_piece
                + production_minutes * config.cost_per_minute_running;
            scrap = product.scrap_for(produced);
        }

        // A paid setup is recorded even when nothing could be built after it.
        if produced > 0 || needs_setup {
            let record = BatchRecord {
                day,
                product: id.clone(),
                requested_qty: total_needed,
                produced_qty: produced,
                scrap_qty: scrap,
                good_qty: produced - scrap,
                production_minutes: round2(production_minutes),
                setup_minutes: round2(setup_minutes),
                total_cost: round2(batch_cost),
            };
            debug!(
                "Day {}: {} produced {}/{} (scrap {}), {:.2} min + {:.2} setup, cost {:.2}",
                day,
                id,
                record.produced_qty,
                record.requested_qty,
                record.scrap_qty,
                record.production_minutes,
                record.setup_minutes,
                record.total_cost
            );
            records.push(record);
        }

        new_backlog.set(id, total_needed - produced);
        last_item = Some(id.clone());

        if minutes_used >= config.daily_minutes - TIME_EPSILON {
            roll_over_unvisited(&config.production_order[position + 1..], &requested, &mut new_backlog);
            break;
        }
    }

    DayOutcome {
        records,
        last_item,
        minutes_used,
        backlog: new_backlog,
    }
}

fn roll_over_unvisited(
    unvisited: &[ProductId],
    requested: impl Fn(&ProductId) -> u32,
    backlog: &mut Backlog,
) {
    for id in unvisited {
        backlog.set(id, requested(id));
    }
}
