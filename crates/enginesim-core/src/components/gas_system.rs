//! Gas volume state consumed by intake and exhaust queries
//!
//! The thermodynamic model that evolves this state lives elsewhere; the
//! engine only reads molar amounts and pressure. Pressure follows the ideal
//! gas law from the stored amounts, volume and temperature.

use serde::{Deserialize, Serialize};

/// Universal gas constant, J/(mol·K)
pub const GAS_CONSTANT: f64 = 8.314_462_618;

/// Mole fraction of oxygen in atmospheric air
pub const AIR_OXYGEN_FRACTION: f64 = 0.21;

/// Standard atmospheric pressure, Pa
pub const ATMOSPHERIC_PRESSURE: f64 = 101_325.0;

/// Standard ambient temperature, K
pub const AMBIENT_TEMPERATURE: f64 = 298.15;

/// Mole fractions of a gas mixture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mix {
    pub p_o2: f64,
    pub p_fuel: f64,
    pub p_inert: f64,
}

impl Mix {
    /// Atmospheric air: 21% oxygen, the rest treated as inert
    pub fn air() -> Self {
        Self {
            p_o2: AIR_OXYGEN_FRACTION,
            p_fuel: 0.0,
            p_inert: 1.0 - AIR_OXYGEN_FRACTION,
        }
    }
}

impl Default for Mix {
    fn default() -> Self {
        Self::air()
    }
}

/// Molar contents of one gas volume
#[derive(Debug, Clone, Default)]
pub struct GasSystem {
    n_o2: f64,
    n_fuel: f64,
    n_inert: f64,
    /// m³
    volume: f64,
    /// K
    temperature: f64,
}

impl GasSystem {
    /// Empty system of the given volume at ambient temperature
    pub fn new(volume: f64) -> Self {
        Self {
            volume,
            temperature: AMBIENT_TEMPERATURE,
            ..Default::default()
        }
    }

    /// Fill the volume to `pressure` and `temperature` with the given mix
    pub fn fill(&mut self, pressure: f64, temperature: f64, mix: Mix) {
        self.temperature = temperature;
        let n = if temperature > 0.0 {
            pressure * self.volume / (GAS_CONSTANT * temperature)
        } else {
            0.0
        };
        self.n_o2 = n * mix.p_o2;
        self.n_fuel = n * mix.p_fuel;
        self.n_inert = n * mix.p_inert;
    }

    /// Overwrite the molar amounts directly
    pub fn set_moles(&mut self, n_o2: f64, n_fuel: f64, n_inert: f64) {
        self.n_o2 = n_o2;
        self.n_fuel = n_fuel;
        self.n_inert = n_inert;
    }

    /// Add fuel vapour to the system
    pub fn add_fuel(&mut self, moles: f64) {
        self.n_fuel += moles;
    }

    /// Pressure in Pa (0 for a zero-volume system)
    pub fn pressure(&self) -> f64 {
        if self.volume <= 0.0 {
            return 0.0;
        }
        self.total_moles() * GAS_CONSTANT * self.temperature / self.volume
    }

    pub fn n_o2(&self) -> f64 {
        self.n_o2
    }

    pub fn n_fuel(&self) -> f64 {
        self.n_fuel
    }

    pub fn n_inert(&self) -> f64 {
        self.n_inert
    }

    pub fn total_moles(&self) -> f64 {
        self.n_o2 + self.n_fuel + self.n_inert
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_roundtrips_pressure() {
        let mut system = GasSystem::new(0.001);
        system.fill(ATMOSPHERIC_PRESSURE, AMBIENT_TEMPERATURE, Mix::air());
        assert!((system.pressure() - ATMOSPHERIC_PRESSURE).abs() < 1e-6);

        let ratio = system.n_o2() / system.total_moles();
        assert!((ratio - AIR_OXYGEN_FRACTION).abs() < 1e-12);
        assert_eq!(system.n_fuel(), 0.0);
    }

    #[test]
    fn test_zero_volume_has_zero_pressure() {
        let mut system = GasSystem::new(0.0);
        system.set_moles(1.0, 0.0, 1.0);
        assert_eq!(system.pressure(), 0.0);
    }

    #[test]
    fn test_add_fuel() {
        let mut system = GasSystem::new(0.001);
        system.add_fuel(0.25);
        system.add_fuel(0.25);
        assert!((system.n_fuel() - 0.5).abs() < 1e-12);
    }
}
