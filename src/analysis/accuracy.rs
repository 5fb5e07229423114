//! Falloff models against damage measured in game
//!
//! Each sample set was recorded by shooting a target every 10 m from 50 m to
//! 300 m with the named loadout.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TtkError};
use crate::core::types::{DamageType, Meters};
use crate::damage::DamageEngine;
use crate::weapon::WeaponProfile;

/// Damage readings for one weapon loadout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredDamage {
    pub weapon: String,
    pub distances: Vec<Meters>,
    pub damage: Vec<f64>,
}

impl MeasuredDamage {
    fn every_ten_metres(weapon: &str, damage: &[f64]) -> Self {
        Self {
            weapon: weapon.to_string(),
            distances: (50..=300).step_by(10).map(f64::from).collect(),
            damage: damage.to_vec(),
        }
    }

    /// Why this set cannot be used, if it can't
    pub fn defect(&self) -> Option<&'static str> {
        if self.damage.len() != self.distances.len() {
            return Some("damage and distance counts differ");
        }
        if self.damage.windows(2).any(|w| w[0] < w[1]) {
            return Some("damage increases with distance");
        }
        None
    }
}

/// Readings shipped with the crate
pub fn measured_samples() -> Vec<MeasuredDamage> {
    vec![
        MeasuredDamage::every_ten_metres(
            "AK74_HB",
            &[
                36.30, 36.18, 35.84, 35.32, 34.68, 33.81, 32.78, 31.74, 30.54, 29.25, 27.99, 26.49,
                25.13, 23.69, 22.35, 20.91, 19.63, 18.34, 17.15, 16.06, 15.11, 14.25, 13.59, 13.12,
                12.81, 12.71,
            ],
        ),
        MeasuredDamage::every_ten_metres(
            "HK419_HB",
            &[
                34.10, 33.98, 33.67, 33.17, 32.51, 31.76, 30.88, 29.80, 28.70, 27.49, 26.27, 24.96,
                23.60, 22.26, 21.02, 19.62, 18.47, 17.39, 16.11, 15.13, 14.23, 13.45, 12.82, 12.33,
                12.04, 11.94,
            ],
        ),
        MeasuredDamage::every_ten_metres(
            "MP5",
            &[
                26.00, 25.73, 24.97, 23.96, 22.57, 20.87, 19.02, 17.09, 15.27, 13.27, 11.54, 9.88,
                8.67, 7.41, 6.73, 6.5, 6.5, 6.5, 6.5, 6.5, 6.5, 6.5, 6.5, 6.5, 6.5, 6.5,
            ],
        ),
    ]
}

/// Drop unusable sets, failing if none survive
pub fn validated(samples: Vec<MeasuredDamage>) -> Result<Vec<MeasuredDamage>> {
    let valid: Vec<_> = samples
        .into_iter()
        .filter(|s| match s.defect() {
            Some(reason) => {
                tracing::warn!("Dropping measurements for {}: {}", s.weapon, reason);
                false
            }
            None => true,
        })
        .collect();
    if valid.is_empty() {
        return Err(TtkError::InvalidConfig("no valid damage measurements".into()));
    }
    Ok(valid)
}

/// Modelled against measured damage for one weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAccuracy {
    pub weapon: String,
    pub distances: Vec<Meters>,
    pub measured: Vec<f64>,
    pub modelled: Vec<f64>,
}

impl ModelAccuracy {
    /// `|modelled - measured| / measured * 100` at each distance
    pub fn percent_errors(&self) -> Vec<f64> {
        self.measured
            .iter()
            .zip(&self.modelled)
            .map(|(real, model)| (model - real).abs() / real * 100.0)
            .collect()
    }

    pub fn max_percent_error(&self) -> f64 {
        self.percent_errors().into_iter().fold(0.0, f64::max)
    }
}

/// Compare the engine's body damage against every sample set with a
/// matching weapon
///
/// Sets without a weapon of the same name are skipped with a warning.
pub fn compare<'a>(
    engine: &DamageEngine,
    samples: &[MeasuredDamage],
    weapons: impl IntoIterator<Item = &'a WeaponProfile>,
) -> Result<Vec<ModelAccuracy>> {
    let weapons: Vec<_> = weapons.into_iter().collect();
    if weapons.is_empty() {
        return Err(TtkError::InvalidConfig("no weapons to compare against".into()));
    }

    let mut report = Vec::new();
    for sample in samples {
        let Some(weapon) = weapons.iter().find(|w| w.name() == sample.weapon) else {
            tracing::warn!("No weapon named '{}', skipping its measurements", sample.weapon);
            continue;
        };
        let modelled = sample
            .distances
            .iter()
            .map(|&d| engine.shot_damage(weapon, d, DamageType::Body))
            .collect::<Result<Vec<_>>>()?;
        report.push(ModelAccuracy {
            weapon: sample.weapon.clone(),
            distances: sample.distances.clone(),
            measured: sample.damage.clone(),
            modelled,
        });
    }
    Ok(report)
}
