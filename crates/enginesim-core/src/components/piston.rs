//! Piston

use serde::{Deserialize, Serialize};

use crate::lifecycle::Lifecycle;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PistonParameters {
    /// Index of the cylinder bank the piston travels in
    pub bank: usize,
    /// Index of the connecting rod driving it
    pub rod: usize,
    /// Position of the cylinder within its bank
    pub cylinder_index: usize,
    /// Wrist pin to crown, m
    pub compression_height: f64,
    /// Wrist pin offset from the bore center, m
    pub wrist_pin_position: f64,
    /// kg
    pub mass: f64,
    /// Leakage past the rings, dimensionless flow coefficient
    pub blowby: f64,
}

#[derive(Debug, Default)]
pub struct Piston {
    lifecycle: Lifecycle,
    bank: usize,
    rod: usize,
    cylinder_index: usize,
    compression_height: f64,
    wrist_pin_position: f64,
    mass: f64,
    blowby: f64,
}

impl Piston {
    #[track_caller]
    pub fn initialize(&mut self, params: &PistonParameters) {
        self.lifecycle.begin("Piston");
        self.bank = params.bank;
        self.rod = params.rod;
        self.cylinder_index = params.cylinder_index;
        self.compression_height = params.compression_height;
        self.wrist_pin_position = params.wrist_pin_position;
        self.mass = params.mass;
        self.blowby = params.blowby;
    }

    #[track_caller]
    pub fn destroy(&mut self) {
        self.lifecycle.release("Piston");
    }

    /// Index of the cylinder bank within the engine
    pub fn cylinder_bank(&self) -> usize {
        self.bank
    }

    /// Index of the connecting rod within the engine
    pub fn rod(&self) -> usize {
        self.rod
    }

    pub fn cylinder_index(&self) -> usize {
        self.cylinder_index
    }

    pub fn compression_height(&self) -> f64 {
        self.compression_height
    }

    pub fn wrist_pin_position(&self) -> f64 {
        self.wrist_pin_position
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn blowby(&self) -> f64 {
        self.blowby
    }
}
