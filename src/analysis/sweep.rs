//! Damage, BTK and TTK sampled across a distance range

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{DamageType, Meters};
use crate::damage::{DamageEngine, KillSample};
use crate::weapon::WeaponProfile;

/// `n` evenly spaced values from `min` to `max`, both included
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { max } else { min + step * i as f64 })
                .collect()
        }
    }
}

/// One weapon's samples for one damage type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponCurve {
    pub weapon: String,
    pub damage_type: DamageType,
    pub samples: Vec<KillSample>,
}

impl WeaponCurve {
    pub fn ttk(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.ttk_ms)
    }
}

/// Sample every weapon at every distance
///
/// Weapons are processed in parallel; the result keeps the input order.
pub fn sweep(
    engine: &DamageEngine,
    weapons: &[&WeaponProfile],
    damage_type: DamageType,
    distances: &[Meters],
) -> Result<Vec<WeaponCurve>> {
    tracing::trace!(
        "Sweeping {} weapons over {} distances ({})",
        weapons.len(),
        distances.len(),
        damage_type
    );

    // PARALLEL: each weapon's curve is independent
    weapons
        .par_iter()
        .map(|weapon| {
            let samples = distances
                .iter()
                .map(|&d| engine.sample(weapon, d, damage_type))
                .collect::<Result<Vec<_>>>()?;
            Ok(WeaponCurve {
                weapon: weapon.name().to_string(),
                damage_type,
                samples,
            })
        })
        .collect()
}
