use anyhow::{Context, Result};
use std::env;
use tracing::{info, warn};
use walkgrid::logging::init_tracing;
use walkgrid::output::{run_id_now, FileSink};
use walkgrid::{Config, Simulation};

fn main() -> Result<()> {
    init_tracing();

    let config = match env::args().nth(1) {
        Some(path) => Config::from_file(&path).with_context(|| format!("loading {}", path))?,
        None => Config::load(),
    };
    config.validate().context("invalid configuration")?;

    let run_id = run_id_now();
    let mut sink = FileSink::create(&config.output.data_dir, &run_id);
    info!(run_id = %run_id, dir = %sink.run_dir().display(), "starting run");

    let mut simulation = Simulation::from_config(config.clone())?;
    let summary = simulation.run(&mut sink);

    if config.logging.enable_run_log {
        let log_path = sink.run_dir().join(&config.logging.run_log_file);
        if let Err(e) = simulation.log().save_to_file(&log_path) {
            warn!(error = %e, "failed to save run log");
        }
    }

    println!("{}", simulation.log().summary());
    if summary.output_failures > 0 {
        warn!(failures = summary.output_failures, "some output files could not be written");
    }
    Ok(())
}
