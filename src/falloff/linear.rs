//! Straight-line falloff between the two anchors of the interval

use crate::core::error::Result;
use crate::core::types::Meters;
use crate::falloff::FalloffCurve;
use crate::weapon::FalloffInterval;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinearFalloff;

impl FalloffCurve for LinearFalloff {
    fn coefficient(&self, distance: Meters, interval: &FalloffInterval) -> Result<f64> {
        let slope = (interval.far.coefficient - interval.near.coefficient) / interval.length();
        Ok(slope * (distance - interval.near.distance) + 1.0)
    }
}
