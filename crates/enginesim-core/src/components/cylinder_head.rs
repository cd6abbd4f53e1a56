//! Cylinder head (one per bank)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderHeadParameters {
    /// Clearance volume above each piston at TDC, m³
    pub combustion_chamber_volume: f64,
    /// Mirror the head when drawing the bank
    pub flip_display: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CylinderHead {
    bank: usize,
    combustion_chamber_volume: f64,
    flip_display: bool,
}

impl CylinderHead {
    pub fn initialize(&mut self, bank: usize, params: &CylinderHeadParameters) {
        self.bank = bank;
        self.combustion_chamber_volume = params.combustion_chamber_volume;
        self.flip_display = params.flip_display;
    }

    /// Index of the bank this head sits on
    pub fn bank(&self) -> usize {
        self.bank
    }

    pub fn combustion_chamber_volume(&self) -> f64 {
        self.combustion_chamber_volume
    }

    pub fn flip_display(&self) -> bool {
        self.flip_display
    }
}
