mod io;
mod model;
mod simulation;

use crate::io::demand::UniformDemand;
use crate::io::reporting;
use crate::simulation::config::SimulationConfig;
use crate::simulation::engine::run_simulation;
use log::{error, info};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Single Machine Production Line Simulation ===");

    // 1. SETUP CONFIGURATION
    // Optional first argument: path to a JSON config. Built-in plant otherwise.
    let config = match env::args().nth(1) {
        // Loading from file validates as part of parsing.
        Some(path) => match SimulationConfig::from_json_file(&path) {
            Ok(config) => {
                info!("Loaded configuration from '{}'", path);
                config
            }
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            let config = SimulationConfig::default();
            if let Err(e) = config.validate() {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
            config
        }
    };

    // 2. DEMAND
    let demand = UniformDemand::from_config(&config);

    // 3. RUN SIMULATION
    info!(
        "Running {} days, order {:?}",
        config.simulation_days,
        config
            .production_order
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
    );
    let log = run_simulation(config.clone(), Box::new(demand));

    // 4. EXPORT RESULTS
    let output_file = "production_log.csv";
    match reporting::write_simulation_log(output_file, &log) {
        Ok(_) => println!("Success! Data written to ./{}", output_file),
        Err(e) => eprintln!("Error writing CSV: {}", e),
    }

    // 5. PRINT SUMMARY
    reporting::print_summary(&config, &log);

    println!("\nSimulation Complete.");
    ExitCode::SUCCESS
}
