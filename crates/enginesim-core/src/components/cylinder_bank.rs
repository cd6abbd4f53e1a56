//! Cylinder bank geometry
//!
//! A bank is a line through its origin `(x, y)` along which every piston in
//! the bank travels. An angle of 0 points the axis straight up.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Cylinder bank description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderBankParameters {
    /// Bank angle from vertical, rad
    pub angle: f64,
    /// Cylinder bore, m
    pub bore: f64,
    /// Distance from the origin to the deck, m
    pub deck_height: f64,
    /// Axis origin, m
    pub position_x: f64,
    pub position_y: f64,
}

#[derive(Debug, Clone, Default)]
pub struct CylinderBank {
    index: usize,
    angle: f64,
    bore: f64,
    deck_height: f64,
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
}

impl CylinderBank {
    pub fn initialize(&mut self, index: usize, params: &CylinderBankParameters) {
        self.index = index;
        self.angle = params.angle;
        self.bore = params.bore;
        self.deck_height = params.deck_height;
        self.x = params.position_x;
        self.y = params.position_y;
        self.dx = (params.angle + FRAC_PI_2).cos();
        self.dy = (params.angle + FRAC_PI_2).sin();
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn bore(&self) -> f64 {
        self.bore
    }

    pub fn deck_height(&self) -> f64 {
        self.deck_height
    }

    /// Axis origin
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Unit axis direction
    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Cross-sectional area of one cylinder, m²
    pub fn bore_area(&self) -> f64 {
        let r = self.bore / 2.0;
        std::f64::consts::PI * r * r
    }
}
