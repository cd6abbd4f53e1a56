//! Intake manifold state
//!
//! Holds the throttle position broadcast by the engine, the flow rate and
//! fuel counters written by the gas-exchange model, and the plenum gas.

use serde::{Deserialize, Serialize};

use super::gas_system::{GasSystem, Mix, AMBIENT_TEMPERATURE, ATMOSPHERIC_PRESSURE};
use crate::lifecycle::Lifecycle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeParameters {
    /// Plenum volume, m³
    pub plenum_volume: f64,
    /// Throttle plate opening at zero throttle (idle air bypass), 0-1
    pub idle_throttle_plate_position: f64,
}

impl Default for IntakeParameters {
    fn default() -> Self {
        Self {
            plenum_volume: 0.001,
            idle_throttle_plate_position: 0.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct Intake {
    lifecycle: Lifecycle,
    throttle: f64,
    idle_throttle_plate_position: f64,
    /// mol/s
    flow_rate: f64,
    /// Cumulative fuel injected, mol
    total_fuel_injected: f64,
    system: GasSystem,
}

impl Intake {
    /// Allocate the plenum and fill it with ambient air
    #[track_caller]
    pub fn initialize(&mut self, params: &IntakeParameters) {
        self.lifecycle.begin("Intake");
        self.idle_throttle_plate_position = params.idle_throttle_plate_position.clamp(0.0, 1.0);
        self.system = GasSystem::new(params.plenum_volume);
        self.system
            .fill(ATMOSPHERIC_PRESSURE, AMBIENT_TEMPERATURE, Mix::air());
        self.flow_rate = 0.0;
        self.total_fuel_injected = 0.0;
    }

    #[track_caller]
    pub fn destroy(&mut self) {
        self.lifecycle.release("Intake");
        self.system = GasSystem::default();
    }

    pub fn set_throttle(&mut self, throttle: f64) {
        self.throttle = throttle;
    }

    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    /// Normalized throttle plate opening: 0 = closed, 1 = wide open
    pub fn throttle_plate_position(&self) -> f64 {
        let idle = self.idle_throttle_plate_position;
        (idle + (1.0 - idle) * self.throttle).clamp(0.0, 1.0)
    }

    pub fn set_flow_rate(&mut self, flow_rate: f64) {
        self.flow_rate = flow_rate;
    }

    pub fn flow_rate(&self) -> f64 {
        self.flow_rate
    }

    /// Inject fuel into the plenum and count it as consumed
    pub fn inject_fuel(&mut self, moles: f64) {
        self.total_fuel_injected += moles;
        self.system.add_fuel(moles);
    }

    pub fn total_fuel_injected(&self) -> f64 {
        self.total_fuel_injected
    }

    pub fn reset_fuel_consumption(&mut self) {
        self.total_fuel_injected = 0.0;
    }

    pub fn system(&self) -> &GasSystem {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut GasSystem {
        &mut self.system
    }
}
