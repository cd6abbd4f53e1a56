//! Standard locations for enginesim configuration files

use std::path::PathBuf;

/// Engine description read by default
pub const ENGINE_CONFIG_FILE: &str = "engine.yaml";

/// Simulation settings, looked up beside the engine description
pub const SIMULATION_CONFIG_FILE: &str = "simulation.yaml";

/// Get the default config directory
///
/// Returns: `{config_dir}/enginesim` (e.g. `~/.config/enginesim` on Linux),
/// or `./enginesim` when the platform has no config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("enginesim")
}

/// Get the default path for a config file
///
/// Returns: `{config_dir}/enginesim/{filename}`
pub fn default_config_path(filename: &str) -> PathBuf {
    default_config_dir().join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_ends_with_enginesim() {
        assert!(default_config_dir().ends_with("enginesim"));
    }

    #[test]
    fn test_config_path_includes_filename() {
        let path = default_config_path(ENGINE_CONFIG_FILE);
        assert!(path.ends_with("enginesim/engine.yaml"));
    }
}
