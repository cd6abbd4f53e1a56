//! Numerical swept-volume estimate
//!
//! For each cylinder the crank is swept through one revolution and, at each
//! sampled angle, the piston's position along its bank axis is recovered from
//! the rigid-rod constraint
//!
//! ```text
//! (x + dx·s − p_x)² + (y + dy·s − p_y)² = L²
//! ```
//!
//! where `(x, y)` is the bank origin, `(dx, dy)` its axis, `p` the crank pin
//! and `L` the rod length. The travel range `max(s) − min(s)` times the bore
//! area is the cylinder's displacement.
//!
//! A closed form exists; sampling is used instead so arbitrary bank offsets
//! and angles need no special cases. The sample at θ = 0 is always taken, and
//! for banks whose axis passes through the crank center the extremes fall on
//! θ = π/2 and 3π/2, which are sampled exactly whenever the resolution is a
//! multiple of 4.

use std::f64::consts::PI;

/// Crank angle samples per revolution used by `Engine::calculate_displacement`
pub const DEFAULT_DISPLACEMENT_RESOLUTION: usize = 1000;

/// Bank and rod geometry of one cylinder, resolved from the engine arrays
///
/// The crank side is supplied per call as a pin-position function, normally
/// `Crankshaft::crank_pin_position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linkage {
    /// Bank axis origin
    pub bank_x: f64,
    pub bank_y: f64,
    /// Bank axis direction
    pub bank_dx: f64,
    pub bank_dy: f64,
    /// Cylinder cross-section, m²
    pub bore_area: f64,
    pub rod_length: f64,
}

impl Linkage {
    /// Piston position `s` along the bank axis for crank pin `(p_x, p_y)`
    ///
    /// Takes the larger root of the constraint quadratic. Returns `None` when
    /// the bank has no axis, when the rod cannot reach the axis (negative
    /// discriminant) or when the piston would sit behind the bank origin.
    #[inline]
    pub fn piston_travel(&self, p_x: f64, p_y: f64) -> Option<f64> {
        let a = self.bank_dx * self.bank_dx + self.bank_dy * self.bank_dy;
        if a == 0.0 {
            return None;
        }

        let rel_x = p_x - self.bank_x;
        let rel_y = p_y - self.bank_y;

        let b = -2.0 * self.bank_dx * rel_x - 2.0 * self.bank_dy * rel_y;
        let c = rel_x * rel_x + rel_y * rel_y - self.rod_length * self.rod_length;

        let det = b * b - 4.0 * a * c;
        if det < 0.0 {
            return None;
        }

        let sqrt_det = det.sqrt();
        let s0 = (-b + sqrt_det) / (2.0 * a);
        let s1 = (-b - sqrt_det) / (2.0 * a);

        let s = s0.max(s1);
        if s < 0.0 {
            return None;
        }

        Some(s)
    }

    /// Minimum and maximum feasible travel over one revolution
    ///
    /// `crank_pin` maps a crank angle to the pin position. `None` if no
    /// sampled angle was feasible.
    pub fn travel_range<F>(&self, resolution: usize, crank_pin: F) -> Option<(f64, f64)>
    where
        F: Fn(f64) -> (f64, f64),
    {
        let mut range: Option<(f64, f64)> = None;

        for j in 0..resolution {
            let theta = 2.0 * (j as f64 / resolution as f64) * PI;
            let (p_x, p_y) = crank_pin(theta);

            if let Some(s) = self.piston_travel(p_x, p_y) {
                range = Some(match range {
                    Some((min_s, max_s)) => (min_s.min(s), max_s.max(s)),
                    None => (s, s),
                });
            }
        }

        range
    }

    /// Swept volume in m³; zero when the travel range is empty or degenerate
    pub fn swept_volume<F>(&self, resolution: usize, crank_pin: F) -> f64
    where
        F: Fn(f64) -> (f64, f64),
    {
        match self.travel_range(resolution, crank_pin) {
            Some((min_s, max_s)) if min_s < max_s => self.bore_area * (max_s - min_s),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THROW: f64 = 0.05;

    /// Vertical bank through the crank center
    fn inline_linkage() -> Linkage {
        Linkage {
            bank_x: 0.0,
            bank_y: 0.0,
            bank_dx: 0.0,
            bank_dy: 1.0,
            bore_area: PI * 0.04 * 0.04,
            rod_length: 0.15,
        }
    }

    /// Crank centered at the origin
    fn centered_pin(theta: f64) -> (f64, f64) {
        (THROW * theta.cos(), THROW * theta.sin())
    }

    #[test]
    fn test_piston_travel_at_dead_centers() {
        let linkage = inline_linkage();

        // Pin straight up: rod + throw
        let s = linkage.piston_travel(0.0, 0.05).unwrap();
        assert!((s - 0.20).abs() < 1e-12);

        // Pin straight down: rod - throw
        let s = linkage.piston_travel(0.0, -0.05).unwrap();
        assert!((s - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_unreachable_axis() {
        let linkage = Linkage {
            bank_x: 1.0,
            ..inline_linkage()
        };
        assert_eq!(linkage.piston_travel(0.05, 0.0), None);
        assert_eq!(linkage.travel_range(100, centered_pin), None);
        assert_eq!(linkage.swept_volume(100, centered_pin), 0.0);
    }

    #[test]
    fn test_piston_behind_origin_is_skipped() {
        // Bank origin far above the crank: both roots are negative
        let linkage = Linkage {
            bank_y: 1.0,
            ..inline_linkage()
        };
        assert_eq!(linkage.piston_travel(0.0, 0.05), None);
        assert_eq!(linkage.swept_volume(64, centered_pin), 0.0);
    }

    #[test]
    fn test_zero_axis_is_skipped() {
        let linkage = Linkage {
            bank_dx: 0.0,
            bank_dy: 0.0,
            ..inline_linkage()
        };
        assert_eq!(linkage.piston_travel(0.0, 0.05), None);
        assert_eq!(linkage.piston_travel(0.0, 0.0), None);
        assert_eq!(linkage.travel_range(16, centered_pin), None);
        assert_eq!(linkage.swept_volume(16, centered_pin), 0.0);
    }

    #[test]
    fn test_stroke_is_twice_throw() {
        let (min_s, max_s) = inline_linkage().travel_range(1000, centered_pin).unwrap();
        assert!((max_s - min_s - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_offset_crank_center() {
        // Crank and bank moved together: same stroke
        let linkage = Linkage {
            bank_x: 0.3,
            bank_y: -0.2,
            ..inline_linkage()
        };
        let (min_s, max_s) = linkage
            .travel_range(1000, |theta| {
                let (x, y) = centered_pin(theta);
                (x + 0.3, y - 0.2)
            })
            .unwrap();
        assert!((max_s - min_s - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_convergence_with_resolution() {
        let linkage = inline_linkage();
        let analytic = PI * 0.04 * 0.04 * 2.0 * THROW;

        // Resolutions that miss the dead centers underestimate
        let coarse = linkage.swept_volume(10, centered_pin);
        let fine = linkage.swept_volume(1001, centered_pin);
        let exact = linkage.swept_volume(1000, centered_pin);

        assert!(coarse < analytic);
        assert!(fine <= analytic + 1e-15);
        assert!((analytic - fine) < (analytic - coarse));
        assert!((analytic - fine) / analytic < 1e-4);
        assert!((exact - analytic).abs() / analytic < 1e-9);
    }

    #[test]
    fn test_zero_resolution_is_empty() {
        assert_eq!(inline_linkage().travel_range(0, centered_pin), None);
    }
}
