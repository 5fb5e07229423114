//! Damage falloff models
//!
//! A model maps a distance strictly inside a weapon's falloff interval to a
//! damage coefficient. Plateaus outside the interval are handled by the
//! damage engine, not here.

pub mod bezier;
pub mod cubic;
pub mod linear;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::core::error::{Result, TtkError};
use crate::core::types::Meters;
use crate::weapon::FalloffInterval;

pub use bezier::{BezierCache, BezierCurve, BezierFalloff, BezierKey, DEFAULT_OFFSET};
pub use cubic::{CubicCalibration, CubicFalloff};
pub use linear::LinearFalloff;

/// A damage-falloff strategy
pub trait FalloffCurve {
    /// Damage coefficient at `distance`, for `near < distance < far`
    fn coefficient(&self, distance: Meters, interval: &FalloffInterval) -> Result<f64>;
}

/// Which strategy to use, as named in configs and on the command line
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    #[display(fmt = "linear")]
    Linear,
    #[display(fmt = "cubic")]
    Cubic,
    #[display(fmt = "bezier")]
    Bezier,
}

impl FromStr for ModelKind {
    type Err = TtkError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lin" | "linear" => Ok(ModelKind::Linear),
            "cub" | "cubic" => Ok(ModelKind::Cubic),
            "bez" | "bezier" => Ok(ModelKind::Bezier),
            other => Err(TtkError::InvalidConfig(format!("unknown falloff model '{}'", other))),
        }
    }
}

/// The selectable falloff model; cubic regression unless told otherwise
#[derive(Debug, Clone)]
pub enum FalloffModel {
    Linear(LinearFalloff),
    CubicRegression(CubicFalloff),
    BezierImplicit(BezierFalloff),
}

impl Default for FalloffModel {
    fn default() -> Self {
        FalloffModel::CubicRegression(CubicFalloff::default())
    }
}

impl FalloffModel {
    pub fn linear() -> Self {
        FalloffModel::Linear(LinearFalloff)
    }

    pub fn cubic() -> Self {
        FalloffModel::CubicRegression(CubicFalloff::default())
    }

    pub fn bezier(offset: f64, cache: Arc<BezierCache>) -> Result<Self> {
        Ok(FalloffModel::BezierImplicit(BezierFalloff::new(offset, cache)?))
    }

    /// Build a model by name; `offset` and `cache` only matter for Bezier
    pub fn from_kind(kind: ModelKind, offset: f64, cache: Arc<BezierCache>) -> Result<Self> {
        match kind {
            ModelKind::Linear => Ok(Self::linear()),
            ModelKind::Cubic => Ok(Self::cubic()),
            ModelKind::Bezier => Self::bezier(offset, cache),
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            FalloffModel::Linear(_) => ModelKind::Linear,
            FalloffModel::CubicRegression(_) => ModelKind::Cubic,
            FalloffModel::BezierImplicit(_) => ModelKind::Bezier,
        }
    }
}

impl FalloffCurve for FalloffModel {
    fn coefficient(&self, distance: Meters, interval: &FalloffInterval) -> Result<f64> {
        match self {
            FalloffModel::Linear(model) => model.coefficient(distance, interval),
            FalloffModel::CubicRegression(model) => model.coefficient(distance, interval),
            FalloffModel::BezierImplicit(model) => model.coefficient(distance, interval),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_cubic() {
        assert_eq!(FalloffModel::default().kind(), ModelKind::Cubic);
    }

    #[test]
    fn test_model_kind_names() {
        assert_eq!("bez".parse::<ModelKind>().unwrap(), ModelKind::Bezier);
        assert_eq!("Linear".parse::<ModelKind>().unwrap(), ModelKind::Linear);
        assert_eq!(ModelKind::Cubic.to_string(), "cubic");
        assert!("spline".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_all_models_stay_between_plateaus() {
        let interval = FalloffInterval::new(50.0, 300.0, 0.35).unwrap();
        let cache = Arc::new(BezierCache::new());
        for kind in [ModelKind::Linear, ModelKind::Cubic, ModelKind::Bezier] {
            let model = FalloffModel::from_kind(kind, DEFAULT_OFFSET, cache.clone()).unwrap();
            for d in (51..300).step_by(7) {
                let coef = model.coefficient(d as f64, &interval).unwrap();
                assert!(coef > 0.3 && coef <= 1.0, "{}: {} at {}", kind, coef, d);
            }
        }
    }
}
