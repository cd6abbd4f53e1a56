//! Generic YAML configuration I/O
//!
//! Works with any serde configuration type: engine descriptions as well as
//! simulation settings.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Load configuration from a YAML file, falling back to defaults
///
/// If the file doesn't exist, returns the default config.
/// If the file exists but is invalid, logs a warning and returns the default.
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: Config file doesn't exist, using defaults");
        return T::default();
    }

    match read_config(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("load_config: {:#}, using defaults", e);
            T::default()
        }
    }
}

/// Load configuration from a YAML file, reporting any failure
///
/// Use for documents that have no meaningful default, such as an engine
/// description.
///
/// ```ignore
/// let config: EngineConfig = read_config(Path::new("engine.yaml"))?;
/// ```
pub fn read_config<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = serde_yaml::from_str::<T>(&contents)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    log::info!("read_config: Loaded config from {:?}", path);
    Ok(config)
}

/// Save configuration to a YAML file
///
/// Creates parent directories if they don't exist.
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    log::info!("save_config: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("save_config: Config saved successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::engine::EngineConfig;

    #[test]
    fn test_load_nonexistent_returns_default() {
        let config: SimulationConfig = load_config(Path::new("/nonexistent/path/simulation.yaml"));
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_load_invalid_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simulation.yaml");
        std::fs::write(&path, "displacement_resolution: [not, a, number]").unwrap();

        let config: SimulationConfig = load_config(&path);
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_read_missing_is_error() {
        let result: Result<EngineConfig> = read_config(Path::new("/nonexistent/path/engine.yaml"));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to read config file"));
    }

    #[test]
    fn test_read_invalid_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.yaml");
        std::fs::write(&path, "pistons: 12").unwrap();

        let result: Result<EngineConfig> = read_config(&path);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to parse config file"));
    }

    #[test]
    fn test_roundtrip_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("engine.yaml");

        let config = EngineConfig {
            name: "Roundtrip".to_string(),
            redline: 8000.0,
            ..Default::default()
        };

        save_config(&config, &path).unwrap();
        let loaded: EngineConfig = read_config(&path).unwrap();

        assert_eq!(loaded, config);
    }
}
