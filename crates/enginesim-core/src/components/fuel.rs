//! Fuel properties

use serde::{Deserialize, Serialize};

use crate::units;

/// Physical properties of the configured fuel
///
/// Defaults describe octane, the surrogate used for gasoline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fuel {
    /// Display name
    pub name: String,
    /// kg/mol
    pub molecular_mass: f64,
    /// kg/m³
    pub density: f64,
}

impl Default for Fuel {
    fn default() -> Self {
        Self {
            name: "Octane".to_string(),
            molecular_mass: units::grams(114.23),
            density: 703.0,
        }
    }
}

impl Fuel {
    pub fn molecular_mass(&self) -> f64 {
        self.molecular_mass
    }

    pub fn density(&self) -> f64 {
        self.density
    }
}
