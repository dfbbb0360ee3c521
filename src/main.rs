use hospital_inventory::io::reporting;
use hospital_inventory::logging;
use hospital_inventory::strategy::implementations::ForecastGapPolicy;
use hospital_inventory::{run_episode, EnvConfig, HospitalInventoryEnv};
use std::env;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    logging::init();
    info!("=== Hospital Inventory Simulation ===");

    // 1. SETUP CONFIGURATION
    // Optional first argument: seed for a reproducible episode.
    let seed = match env::args().nth(1).map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => Some(seed),
        Some(Err(e)) => {
            error!("seed must be an unsigned integer: {}", e);
            return ExitCode::FAILURE;
        }
        None => None,
    };
    let config = EnvConfig {
        seed,
        ..EnvConfig::default()
    };

    // 2. INITIALIZE ENVIRONMENT
    let mut sim_env = match HospitalInventoryEnv::new(config) {
        Ok(sim_env) => sim_env,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // 3. RUN EPISODE
    let mut policy = ForecastGapPolicy::new(sim_env.config().max_action);
    let report = match run_episode(&mut sim_env, &mut policy) {
        Ok(report) => report,
        Err(e) => {
            error!("episode failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("\n{}", sim_env.render());

    // 4. PRINT COST ANALYSIS
    let s = &report.summary;
    info!(
        "steps={} reward={:.2} cost={:.2} avg_cost_per_day={:.2} shortage={} expired={}",
        s.steps, s.total_reward, s.total_cost, s.avg_cost_per_day, s.total_shortage, s.total_expired
    );

    // 5. EXPORT RESULTS
    let output_file = "episode_log.csv";
    if let Err(e) = reporting::write_episode_log(output_file, &report.records) {
        error!("error writing CSV: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
