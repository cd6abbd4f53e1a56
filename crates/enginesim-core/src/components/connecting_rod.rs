//! Connecting rod

use serde::{Deserialize, Serialize};

use crate::lifecycle::Lifecycle;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectingRodParameters {
    /// Center-to-center length, m
    pub length: f64,
    /// kg
    pub mass: f64,
    /// kg·m²
    pub moment_of_inertia: f64,
    /// Distance of the center of mass from the big end, m
    pub center_of_mass: f64,
    /// Index of the crankshaft this rod rides on
    pub crankshaft: usize,
    /// Rod journal on that crankshaft
    pub journal: usize,
}

#[derive(Debug, Default)]
pub struct ConnectingRod {
    lifecycle: Lifecycle,
    length: f64,
    mass: f64,
    moment_of_inertia: f64,
    center_of_mass: f64,
    crankshaft: usize,
    journal: usize,
}

impl ConnectingRod {
    #[track_caller]
    pub fn initialize(&mut self, params: &ConnectingRodParameters) {
        self.lifecycle.begin("ConnectingRod");
        self.length = params.length;
        self.mass = params.mass;
        self.moment_of_inertia = params.moment_of_inertia;
        self.center_of_mass = params.center_of_mass;
        self.crankshaft = params.crankshaft;
        self.journal = params.journal;
    }

    #[track_caller]
    pub fn destroy(&mut self) {
        self.lifecycle.release("ConnectingRod");
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn moment_of_inertia(&self) -> f64 {
        self.moment_of_inertia
    }

    pub fn center_of_mass(&self) -> f64 {
        self.center_of_mass
    }

    /// Index of the owning crankshaft within the engine
    pub fn crankshaft(&self) -> usize {
        self.crankshaft
    }

    pub fn journal(&self) -> usize {
        self.journal
    }
}
