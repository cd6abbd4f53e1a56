//! Configuration files
//!
//! - Generic YAML loading/saving for any serde configuration type
//! - Standard config locations
//! - Simulation settings that are not part of an engine description
//!
//! # Usage
//!
//! ```ignore
//! use enginesim_core::config::{load_config, read_config, SimulationConfig};
//! use enginesim_core::engine::EngineConfig;
//!
//! // Engine descriptions must parse
//! let engine: EngineConfig = read_config(&engine_path)?;
//!
//! // Optional settings fall back to defaults
//! let sim: SimulationConfig = load_config(&sim_path);
//! ```

mod io;
mod paths;
mod simulation;

pub use io::{load_config, read_config, save_config};
pub use paths::{default_config_dir, default_config_path, ENGINE_CONFIG_FILE, SIMULATION_CONFIG_FILE};
pub use simulation::SimulationConfig;
