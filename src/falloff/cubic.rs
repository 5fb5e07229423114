//! Cubic-regression falloff
//!
//! One cubic was fitted to in-game damage measurements of a reference rifle
//! whose falloff runs from 50 m to 300 m down to a 0.35 coefficient. Other
//! weapons reuse it by stretching the domain to their own interval length
//! and the range to their own minimum coefficient:
//!
//! ```text
//! u    = x_scale * (d - d_near)        x_scale = (300 - 50) / (d_far - d_near)
//! coef = y_scale * f(u) + 1 - y_scale  y_scale = (min - 1) / (0.35 - 1)
//! ```
//!
//! `y_scale` is the slope `m` solving `f(0)*m + c = 1`, `f(250)*m + c = min`.

use crate::core::error::Result;
use crate::core::types::Meters;
use crate::falloff::FalloffCurve;
use crate::weapon::FalloffInterval;

/// A fitted cubic together with the geometry it was fitted over
///
/// The polynomial and the reference interval/minimum come from the same
/// measurement run and must be replaced together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicCalibration {
    pub reference_near: Meters,
    pub reference_far: Meters,
    pub reference_min_coefficient: f64,
    /// `[c3, c2, c1, c0]` for `c3*u^3 + c2*u^2 + c1*u + c0`
    pub coefficients: [f64; 4],
}

impl CubicCalibration {
    pub const REFERENCE: CubicCalibration = CubicCalibration {
        reference_near: 50.0,
        reference_far: 300.0,
        reference_min_coefficient: 0.35,
        coefficients: [8.353e-8, -3.119e-5, -2.281e-5, 1.0],
    };

    /// The fitted curve in reference coordinates, `u` in `[0, 250]`
    pub fn reference_curve(&self, u: f64) -> f64 {
        let [c3, c2, c1, c0] = self.coefficients;
        c3 * u.powi(3) + c2 * u.powi(2) + c1 * u + c0
    }

    pub fn x_scale(&self, interval: &FalloffInterval) -> f64 {
        (self.reference_far - self.reference_near) / interval.length()
    }

    pub fn y_scale(&self, interval: &FalloffInterval) -> f64 {
        (interval.min_coefficient() - 1.0) / (self.reference_min_coefficient - 1.0)
    }
}

impl Default for CubicCalibration {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CubicFalloff {
    pub calibration: CubicCalibration,
}

impl CubicFalloff {
    pub fn new(calibration: CubicCalibration) -> Self {
        Self { calibration }
    }
}

impl FalloffCurve for CubicFalloff {
    fn coefficient(&self, distance: Meters, interval: &FalloffInterval) -> Result<f64> {
        let cal = &self.calibration;
        let u = cal.x_scale(interval) * (distance - interval.near.distance);
        let y_scale = cal.y_scale(interval);
        Ok(y_scale * cal.reference_curve(u) + 1.0 - y_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_interval_is_identity_scaling() {
        let interval = FalloffInterval::new(50.0, 300.0, 0.35).unwrap();
        let cal = CubicCalibration::REFERENCE;
        assert_eq!(cal.x_scale(&interval), 1.0);
        assert_eq!(cal.y_scale(&interval), 1.0);
        let coef = CubicFalloff::default().coefficient(175.0, &interval).unwrap();
        assert!((coef - cal.reference_curve(125.0)).abs() < 1e-12);
    }

    #[test]
    fn test_starts_at_full_damage() {
        let interval = FalloffInterval::new(50.0, 200.0, 0.25).unwrap();
        let coef = CubicFalloff::default().coefficient(50.0, &interval).unwrap();
        assert!((coef - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ends_near_min_coefficient() {
        // The fit lands within 1e-4 of the reference minimum, not exactly on it
        for (near, far, min) in [(50.0, 300.0, 0.35), (50.0, 200.0, 0.25), (100.0, 300.0, 0.3)] {
            let interval = FalloffInterval::new(near, far, min).unwrap();
            let coef = CubicFalloff::default().coefficient(far, &interval).unwrap();
            assert!((coef - min).abs() < 2e-4, "{} vs {}", coef, min);
        }
    }

    #[test]
    fn test_shorter_interval_compresses_domain() {
        let long = FalloffInterval::new(50.0, 300.0, 0.25).unwrap();
        let short = FalloffInterval::new(50.0, 175.0, 0.25).unwrap();
        let model = CubicFalloff::default();
        // Halfway through each interval gives the same coefficient
        let a = model.coefficient(175.0, &long).unwrap();
        let b = model.coefficient(112.5, &short).unwrap();
        assert!((a - b).abs() < 1e-12);
    }
}
