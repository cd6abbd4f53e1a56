//! engine-report - summarize an engine description
//!
//! Builds the engine described by a YAML file, computes its displacement and
//! prints a short summary.
//!
//! ## Usage
//!
//! ```text
//! engine-report [ENGINE_YAML] [--resolution N]
//! ```
//!
//! Without a path, `{config_dir}/enginesim/engine.yaml` is used. Simulation
//! settings are read from `simulation.yaml` beside the engine file when it
//! exists; `--resolution` overrides its displacement resolution.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use enginesim_core::config::{
    default_config_path, load_config, read_config, SimulationConfig, ENGINE_CONFIG_FILE,
    SIMULATION_CONFIG_FILE,
};
use enginesim_core::engine::{Engine, EngineConfig};
use enginesim_core::units;

fn main() -> Result<()> {
    // Initialize logger - set RUST_LOG=debug for per-cylinder detail
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut engine_path: Option<PathBuf> = None;
    let mut resolution: Option<usize> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--resolution" => {
                let value = args.next().context("--resolution requires a value")?;
                resolution = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid resolution: {}", value))?,
                );
            }
            _ if arg.starts_with("--") => bail!("Unknown flag: {}", arg),
            _ => engine_path = Some(PathBuf::from(arg)),
        }
    }

    let engine_path = engine_path.unwrap_or_else(|| default_config_path(ENGINE_CONFIG_FILE));
    let engine_config: EngineConfig = read_config(&engine_path)?;

    let simulation_path = engine_path
        .parent()
        .map(|dir| dir.join(SIMULATION_CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(SIMULATION_CONFIG_FILE));
    let mut simulation: SimulationConfig = load_config(&simulation_path);
    if let Some(resolution) = resolution {
        simulation.displacement_resolution = resolution;
    }

    let mut engine = Engine::from_config(&engine_config)
        .with_context(|| format!("Invalid engine description: {:?}", engine_path))?;

    let displacement = engine.calculate_displacement_with_resolution(simulation.displacement_resolution);
    log::info!(
        "Displacement computed at {} samples per revolution",
        simulation.displacement_resolution
    );

    println!("Engine:        {}", engine.name());
    println!("Crankshafts:   {}", engine.crankshaft_count());
    println!(
        "Cylinders:     {} in {} bank(s)",
        engine.cylinder_count(),
        engine.cylinder_bank_count()
    );
    println!("Intakes:       {}", engine.intake_count());
    println!("Exhausts:      {}", engine.exhaust_system_count());
    println!(
        "Displacement:  {:.6} m³ ({:.3} L)",
        displacement,
        units::to_litres(displacement)
    );
    println!("Max depth:     {}", engine.max_depth());
    println!("Redline:       {:.0} RPM", units::to_rpm(engine.redline()));

    engine.destroy();
    Ok(())
}
