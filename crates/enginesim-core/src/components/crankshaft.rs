//! Crankshaft geometry and rotational state

use serde::{Deserialize, Serialize};

use crate::lifecycle::Lifecycle;

/// Rotational state of a rigid body, advanced by the external integrator
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RigidBody {
    /// Angle, rad
    pub theta: f64,
    /// Angular velocity, rad/s (negative for forward engine rotation)
    pub v_theta: f64,
}

/// Crankshaft description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrankshaftParameters {
    /// Crank throw (pin offset from the rotation axis), m
    pub crank_throw: f64,
    /// Rotation axis position, m
    pub pos_x: f64,
    pub pos_y: f64,
    /// kg
    pub mass: f64,
    /// kg
    pub flywheel_mass: f64,
    /// kg·m²
    pub moment_of_inertia: f64,
    /// Crank angle at top dead center, rad
    pub tdc: f64,
    /// N·m
    pub friction_torque: f64,
    /// Angular offset of each rod journal, rad
    pub rod_journal_angles: Vec<f64>,
}

impl Default for CrankshaftParameters {
    fn default() -> Self {
        Self {
            crank_throw: 0.0,
            pos_x: 0.0,
            pos_y: 0.0,
            mass: 0.0,
            flywheel_mass: 0.0,
            moment_of_inertia: 0.0,
            tdc: std::f64::consts::FRAC_PI_2,
            friction_torque: 0.0,
            rod_journal_angles: vec![0.0],
        }
    }
}

/// A crankshaft with its rod journals
#[derive(Debug, Default)]
pub struct Crankshaft {
    lifecycle: Lifecycle,
    throw: f64,
    pos_x: f64,
    pos_y: f64,
    mass: f64,
    flywheel_mass: f64,
    moment_of_inertia: f64,
    tdc: f64,
    friction_torque: f64,
    rod_journal_angles: Box<[f64]>,
    /// Rotational state
    pub body: RigidBody,
}

impl Crankshaft {
    #[track_caller]
    pub fn initialize(&mut self, params: &CrankshaftParameters) {
        self.lifecycle.begin("Crankshaft");

        self.throw = params.crank_throw;
        self.pos_x = params.pos_x;
        self.pos_y = params.pos_y;
        self.mass = params.mass;
        self.flywheel_mass = params.flywheel_mass;
        self.moment_of_inertia = params.moment_of_inertia;
        self.tdc = params.tdc;
        self.friction_torque = params.friction_torque;
        self.rod_journal_angles = params.rod_journal_angles.clone().into_boxed_slice();
        self.body = RigidBody {
            theta: params.tdc,
            v_theta: 0.0,
        };
    }

    /// Release the rod journals
    #[track_caller]
    pub fn destroy(&mut self) {
        self.lifecycle.release("Crankshaft");
        self.rod_journal_angles = Box::default();
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle.is_initialized()
    }

    pub fn throw(&self) -> f64 {
        self.throw
    }

    pub fn pos_x(&self) -> f64 {
        self.pos_x
    }

    pub fn pos_y(&self) -> f64 {
        self.pos_y
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn flywheel_mass(&self) -> f64 {
        self.flywheel_mass
    }

    pub fn moment_of_inertia(&self) -> f64 {
        self.moment_of_inertia
    }

    pub fn tdc(&self) -> f64 {
        self.tdc
    }

    pub fn friction_torque(&self) -> f64 {
        self.friction_torque
    }

    pub fn rod_journal_count(&self) -> usize {
        self.rod_journal_angles.len()
    }

    /// Angular offset of rod journal `index`, rad
    pub fn rod_journal_angle(&self, index: usize) -> f64 {
        self.rod_journal_angles[index]
    }

    /// Crank pin position at crank angle `theta`
    #[inline]
    pub fn crank_pin_position(&self, theta: f64) -> (f64, f64) {
        (
            self.throw * theta.cos() + self.pos_x,
            self.throw * theta.sin() + self.pos_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> CrankshaftParameters {
        CrankshaftParameters {
            crank_throw: 0.05,
            pos_x: 1.0,
            pos_y: 2.0,
            rod_journal_angles: vec![0.0, std::f64::consts::PI],
            ..Default::default()
        }
    }

    #[test]
    fn test_initialize_allocates_journals() {
        let mut shaft = Crankshaft::default();
        assert_eq!(shaft.rod_journal_count(), 0);

        shaft.initialize(&params());
        assert!(shaft.is_initialized());
        assert_eq!(shaft.rod_journal_count(), 2);
        assert_eq!(shaft.rod_journal_angle(1), std::f64::consts::PI);
        assert_eq!(shaft.body.theta, std::f64::consts::FRAC_PI_2);

        shaft.destroy();
        assert_eq!(shaft.rod_journal_count(), 0);
    }

    #[test]
    fn test_crank_pin_position() {
        let mut shaft = Crankshaft::default();
        shaft.initialize(&params());

        let (x, y) = shaft.crank_pin_position(0.0);
        assert!((x - 1.05).abs() < 1e-12);
        assert!((y - 2.0).abs() < 1e-12);

        let (x, y) = shaft.crank_pin_position(std::f64::consts::FRAC_PI_2);
        assert!((x - 1.0).abs() < 1e-12);
        assert!((y - 2.05).abs() < 1e-12);

        shaft.destroy();
    }

    #[test]
    #[should_panic(expected = "destroy called twice")]
    fn test_double_destroy_panics() {
        let mut shaft = Crankshaft::default();
        shaft.destroy();
        shaft.destroy();
    }
}
