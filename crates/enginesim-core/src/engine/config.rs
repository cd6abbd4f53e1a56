//! Engine descriptions
//!
//! [`EngineParameters`] carries what `Engine::initialize` needs to size its
//! collections. [`EngineConfig`] is the full declarative description (YAML
//! via serde) from which `Engine::from_config` builds a wired engine.
//!
//! ```yaml
//! name: Single 500
//! redline: 7000
//! crankshafts:
//!   - crank_throw: 0.05
//!     rod_journal_angles: [0.0]
//! cylinder_banks:
//!   - bore: 0.08
//! connecting_rods:
//!   - length: 0.15
//! pistons:
//!   - bank: 0
//!     rod: 0
//! intakes:
//!   - {}
//! exhaust_systems:
//!   - {}
//! ```

use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};
use crate::components::{
    ConnectingRodParameters, CrankshaftParameters, CylinderBankParameters, CylinderHeadParameters,
    ExhaustSystemParameters, Fuel, IntakeParameters, PistonParameters,
};

/// Collection sizes and engine-wide constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParameters {
    pub name: String,
    pub crankshaft_count: usize,
    pub cylinder_count: usize,
    pub cylinder_bank_count: usize,
    pub exhaust_system_count: usize,
    pub intake_count: usize,
    /// N·m
    pub starter_torque: f64,
    /// rad/s
    pub starter_speed: f64,
    /// rad/s
    pub redline: f64,
    pub fuel: Fuel,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            name: String::new(),
            crankshaft_count: 0,
            cylinder_count: 0,
            cylinder_bank_count: 0,
            exhaust_system_count: 0,
            intake_count: 0,
            starter_torque: 90.0,
            starter_speed: crate::units::rpm(200.0),
            redline: crate::units::rpm(6500.0),
            fuel: Fuel::default(),
        }
    }
}

/// Full engine description
///
/// Speeds are given in RPM here and converted to rad/s when the engine is
/// built. Cylinder count is the number of pistons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub name: String,
    /// N·m
    pub starter_torque: f64,
    /// RPM
    pub starter_speed: f64,
    /// RPM
    pub redline: f64,
    pub fuel: Fuel,
    pub crankshafts: Vec<CrankshaftParameters>,
    pub cylinder_banks: Vec<CylinderBankParameters>,
    /// One per bank; empty means default heads
    pub cylinder_heads: Vec<CylinderHeadParameters>,
    pub connecting_rods: Vec<ConnectingRodParameters>,
    pub pistons: Vec<PistonParameters>,
    pub intakes: Vec<IntakeParameters>,
    pub exhaust_systems: Vec<ExhaustSystemParameters>,
    /// Firing angle per cylinder, rad; empty leaves all at zero
    pub firing_angles: Vec<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: "Unnamed engine".to_string(),
            starter_torque: 90.0,
            starter_speed: 200.0,
            redline: 6500.0,
            fuel: Fuel::default(),
            crankshafts: Vec::new(),
            cylinder_banks: Vec::new(),
            cylinder_heads: Vec::new(),
            connecting_rods: Vec::new(),
            pistons: Vec::new(),
            intakes: Vec::new(),
            exhaust_systems: Vec::new(),
            firing_angles: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Collection sizes and constants derived from this description
    pub fn parameters(&self) -> EngineParameters {
        EngineParameters {
            name: self.name.clone(),
            crankshaft_count: self.crankshafts.len(),
            cylinder_count: self.pistons.len(),
            cylinder_bank_count: self.cylinder_banks.len(),
            exhaust_system_count: self.exhaust_systems.len(),
            intake_count: self.intakes.len(),
            starter_torque: self.starter_torque,
            starter_speed: crate::units::rpm(self.starter_speed),
            redline: crate::units::rpm(self.redline),
            fuel: self.fuel.clone(),
        }
    }

    /// Check counts, cross-references and dimensions
    pub fn validate(&self) -> EngineResult<()> {
        if self.connecting_rods.len() != self.pistons.len() {
            return Err(EngineError::RodCountMismatch {
                pistons: self.pistons.len(),
                rods: self.connecting_rods.len(),
            });
        }

        if !self.cylinder_heads.is_empty() && self.cylinder_heads.len() != self.cylinder_banks.len() {
            return Err(EngineError::HeadCountMismatch {
                banks: self.cylinder_banks.len(),
                heads: self.cylinder_heads.len(),
            });
        }

        if !self.firing_angles.is_empty() && self.firing_angles.len() != self.pistons.len() {
            return Err(EngineError::FiringOrderMismatch {
                cylinders: self.pistons.len(),
                angles: self.firing_angles.len(),
            });
        }

        for (index, shaft) in self.crankshafts.iter().enumerate() {
            if shaft.crank_throw <= 0.0 {
                return Err(EngineError::InvalidDimension {
                    component: "Crankshaft",
                    index,
                    field: "crank_throw",
                    value: shaft.crank_throw,
                });
            }
        }

        for (index, bank) in self.cylinder_banks.iter().enumerate() {
            if bank.bore <= 0.0 {
                return Err(EngineError::InvalidDimension {
                    component: "Cylinder bank",
                    index,
                    field: "bore",
                    value: bank.bore,
                });
            }
        }

        for (index, rod) in self.connecting_rods.iter().enumerate() {
            if rod.length <= 0.0 {
                return Err(EngineError::InvalidDimension {
                    component: "Connecting rod",
                    index,
                    field: "length",
                    value: rod.length,
                });
            }

            let Some(shaft) = self.crankshafts.get(rod.crankshaft) else {
                return Err(EngineError::MissingCrankshaft {
                    rod: index,
                    crankshaft: rod.crankshaft,
                    count: self.crankshafts.len(),
                });
            };

            if rod.journal >= shaft.rod_journal_angles.len() {
                return Err(EngineError::MissingRodJournal {
                    rod: index,
                    journal: rod.journal,
                    count: shaft.rod_journal_angles.len(),
                });
            }
        }

        for (index, piston) in self.pistons.iter().enumerate() {
            if piston.bank >= self.cylinder_banks.len() {
                return Err(EngineError::MissingCylinderBank {
                    piston: index,
                    bank: piston.bank,
                    count: self.cylinder_banks.len(),
                });
            }
            if piston.rod >= self.connecting_rods.len() {
                return Err(EngineError::MissingConnectingRod {
                    piston: index,
                    rod: piston.rod,
                    count: self.connecting_rods.len(),
                });
            }
        }

        Ok(())
    }
}
