//! Simulation settings
//!
//! Values here tune how an engine is evaluated rather than describing the
//! engine itself.

use serde::{Deserialize, Serialize};

use crate::engine::DEFAULT_DISPLACEMENT_RESOLUTION;
use crate::types::SAMPLE_RATE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Crank angle samples per revolution for displacement
    pub displacement_resolution: usize,
    /// Audio sample rate, Hz
    pub sample_rate: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            displacement_resolution: DEFAULT_DISPLACEMENT_RESOLUTION,
            sample_rate: SAMPLE_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.displacement_resolution, 1000);
        assert_eq!(config.sample_rate, 48000);
    }

    #[test]
    fn test_partial_yaml() {
        let config: SimulationConfig = serde_yaml::from_str("displacement_resolution: 360").unwrap();
        assert_eq!(config.displacement_resolution, 360);
        assert_eq!(config.sample_rate, 48000);
    }
}
