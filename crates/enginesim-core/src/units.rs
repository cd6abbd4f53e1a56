//! SI unit helpers
//!
//! All state is stored in SI units (metres, kilograms, seconds, radians,
//! moles). These helpers convert the handful of non-SI quantities the engine
//! model deals with.

use std::f64::consts::PI;

/// One gram, in kilograms
pub const GRAM: f64 = 1e-3;

/// One litre, in cubic metres
pub const LITRE: f64 = 1e-3;

/// Mass given in grams, as kilograms
#[inline]
pub const fn grams(value: f64) -> f64 {
    value * GRAM
}

/// Angular velocity (rad/s) to revolutions per minute
#[inline]
pub fn to_rpm(rad_per_sec: f64) -> f64 {
    rad_per_sec * 60.0 / (2.0 * PI)
}

/// Revolutions per minute to angular velocity (rad/s)
#[inline]
pub fn rpm(value: f64) -> f64 {
    value * 2.0 * PI / 60.0
}

/// Volume in cubic metres to litres
#[inline]
pub fn to_litres(cubic_metres: f64) -> f64 {
    cubic_metres / LITRE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpm_roundtrip() {
        let omega = rpm(3000.0);
        assert!((omega - 314.159_265).abs() < 1e-5);
        assert!((to_rpm(omega) - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_grams() {
        assert!((grams(114.23) - 0.11423).abs() < 1e-12);
    }

    #[test]
    fn test_litres() {
        assert!((to_litres(0.002) - 2.0).abs() < 1e-12);
    }
}
