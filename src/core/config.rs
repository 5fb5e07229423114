//! Analysis configuration
//!
//! Everything a sweep needs besides the weapons themselves. Values can come
//! from a TOML file; command-line flags override them afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::core::error::{Result, TtkError};
use crate::core::types::{DamageType, Meters};
use crate::damage::{DamageEngine, TtkOptions, DEFAULT_HEALTH};
use crate::falloff::{BezierCache, FalloffModel, ModelKind, DEFAULT_OFFSET};

/// Configuration for damage and TTK sweeps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Falloff model used inside every weapon's falloff interval
    pub model: ModelKind,

    /// Horizontal offset of the inner Bezier control points, as a fraction
    /// of the falloff interval length
    ///
    /// Only read by the Bezier model. Must lie in [0, 0.5); at 0.5 the
    /// control points cross and the curve folds back on itself.
    pub bezier_offset: f64,

    /// Target health
    pub health: f64,

    /// Distance range to sweep, in metres
    pub range: (Meters, Meters),

    /// Samples across `range`, end points included
    pub num_points: usize,

    /// Add aim-down-sight time to every TTK
    pub include_aim_time: bool,

    /// Which damage figures to report
    pub damage_types: Vec<DamageType>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::Cubic,
            bezier_offset: DEFAULT_OFFSET,
            health: DEFAULT_HEALTH,
            range: (0.0, 150.0),
            num_points: 150,
            include_aim_time: false,
            damage_types: vec![DamageType::Armor, DamageType::Body],
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded analysis config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.bezier_offset >= 0.0 && self.bezier_offset < 0.5) {
            return Err(TtkError::InvalidConfig(format!(
                "bezier_offset ({}) must be in [0, 0.5)",
                self.bezier_offset
            )));
        }

        if !(self.health.is_finite() && self.health > 0.0) {
            return Err(TtkError::InvalidConfig(format!(
                "health ({}) must be positive",
                self.health
            )));
        }

        let (min, max) = self.range;
        if !(min >= 0.0 && max.is_finite() && min < max) {
            return Err(TtkError::InvalidConfig(format!(
                "range ({}, {}) must satisfy 0 <= min < max",
                min, max
            )));
        }

        if self.num_points < 2 {
            return Err(TtkError::InvalidConfig(format!(
                "num_points ({}) must be at least 2",
                self.num_points
            )));
        }

        if self.damage_types.is_empty() {
            return Err(TtkError::InvalidConfig("damage_types must not be empty".into()));
        }

        Ok(())
    }

    /// Build the configured falloff model, sharing `cache` if it is Bezier
    pub fn falloff_model(&self, cache: &Arc<BezierCache>) -> Result<FalloffModel> {
        FalloffModel::from_kind(self.model, self.bezier_offset, Arc::clone(cache))
    }

    pub fn ttk_options(&self) -> TtkOptions {
        TtkOptions {
            health: self.health,
            include_aim_time: self.include_aim_time,
        }
    }

    pub fn engine(&self, cache: &Arc<BezierCache>) -> Result<DamageEngine> {
        let mut engine = DamageEngine::new(self.falloff_model(cache)?);
        engine.options = self.ttk_options();
        Ok(engine)
    }
}
