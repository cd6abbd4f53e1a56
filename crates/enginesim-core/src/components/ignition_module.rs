//! Ignition module: per-cylinder firing angles

use crate::lifecycle::Lifecycle;

#[derive(Debug, Default)]
pub struct IgnitionModule {
    lifecycle: Lifecycle,
    /// Crank angle at which each cylinder fires, rad
    firing_angles: Box<[f64]>,
    /// Spark advance applied to every cylinder, rad
    timing_advance: f64,
}

impl IgnitionModule {
    /// Allocate firing slots for `cylinder_count` cylinders
    #[track_caller]
    pub fn initialize(&mut self, cylinder_count: usize) {
        self.lifecycle.begin("IgnitionModule");
        self.firing_angles = vec![0.0; cylinder_count].into_boxed_slice();
        self.timing_advance = 0.0;
    }

    #[track_caller]
    pub fn destroy(&mut self) {
        self.lifecycle.release("IgnitionModule");
        self.firing_angles = Box::default();
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle.is_initialized()
    }

    pub fn cylinder_count(&self) -> usize {
        self.firing_angles.len()
    }

    pub fn set_firing_angle(&mut self, cylinder: usize, angle: f64) {
        self.firing_angles[cylinder] = angle;
    }

    /// Firing angle of `cylinder` including the timing advance
    pub fn firing_angle(&self, cylinder: usize) -> f64 {
        self.firing_angles[cylinder] - self.timing_advance
    }

    pub fn set_timing_advance(&mut self, advance: f64) {
        self.timing_advance = advance;
    }

    pub fn timing_advance(&self) -> f64 {
        self.timing_advance
    }
}
