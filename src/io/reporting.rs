// src/io/reporting.rs

use crate::model::batch::BatchRecord;
use crate::simulation::config::SimulationConfig;
use crate::simulation::engine::product_breakdown;
use log::info;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes the batch log as CSV to any writer.
///
/// Minutes and cost columns are formatted with two decimals.
pub fn write_records<W: Write>(writer: W, data: &[BatchRecord]) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in data {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the simulation log to a CSV file.
///
/// # Arguments
/// * `file_path` - Destination, e.g. "results/production_log.csv".
/// * `data` - The batch records collected by the simulation.
pub fn write_simulation_log(file_path: impl AsRef<Path>, data: &[BatchRecord]) -> Result<(), ReportError> {
    let path = file_path.as_ref();
    let file = std::fs::File::create(path)?;
    write_records(file, data)?;

    info!("Exported {} rows to '{}'", data.len(), path.display());
    Ok(())
}

/// Prints per-product totals, machine utilization and total cost.
pub fn print_summary(config: &SimulationConfig, log: &[BatchRecord]) {
    println!("\n=== Production Summary ({} days) ===", config.simulation_days);
    println!(
        "{:<8} {:>10} {:>8} {:>10} {:>8} {:>12}",
        "Product", "Produced", "Scrap", "Good", "Setups", "Cost"
    );
    for totals in product_breakdown(&config.production_order, log) {
        println!(
            "{:<8} {:>10} {:>8} {:>10} {:>8} {:>12.2}",
            totals.product.as_str(),
            totals.produced,
            totals.scrap,
            totals.good,
            totals.setups,
            totals.cost
        );
    }

    println!(
        "\nAverage machine utilization: {:.1}% of {} min/day",
        average_utilization(config, log) * 100.0,
        config.daily_minutes
    );
    let total_cost: f64 = log.iter().map(|record| record.total_cost).sum();
    println!("Total production cost: {:.2}", total_cost);
}

/// Share of the whole horizon's machine time spent on setup or production.
pub fn average_utilization(config: &SimulationConfig, log: &[BatchRecord]) -> f64 {
    let busy: f64 = log
        .iter()
        .map(|record| record.production_minutes + record.setup_minutes)
        .sum();
    busy / (config.daily_minutes * config.simulation_days as f64)
}
