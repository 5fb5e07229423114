//! Damage at range, bullets to kill and time to kill
//!
//! Inside a weapon's falloff interval the damage coefficient comes from a
//! [`FalloffModel`]; on either side of it damage sits on a plateau. Everything
//! else is derived from shot damage.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TtkError};
use crate::core::types::{DamageType, Meters, Millis};
use crate::falloff::{FalloffCurve, FalloffModel};
use crate::weapon::WeaponProfile;

/// Health of a fresh soldier
pub const DEFAULT_HEALTH: f64 = 100.0;

/// Options for [`time_to_kill`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TtkOptions {
    pub health: f64,
    /// Add the weapon's aim-down-sight time to every kill
    pub include_aim_time: bool,
}

impl Default for TtkOptions {
    fn default() -> Self {
        Self {
            health: DEFAULT_HEALTH,
            include_aim_time: false,
        }
    }
}

fn check_distance(distance: Meters) -> Result<()> {
    // NaN fails this comparison too
    if distance >= 0.0 {
        Ok(())
    } else {
        Err(TtkError::InvalidDistance(distance))
    }
}

/// Damage of one hit at `distance`
pub fn shot_damage_at_range(
    profile: &WeaponProfile,
    distance: Meters,
    damage_type: DamageType,
    model: &FalloffModel,
) -> Result<f64> {
    check_distance(distance)?;
    let falloff = profile.falloff();
    let damage = profile.damage(damage_type);
    if distance <= falloff.near.distance {
        Ok(damage * falloff.near.coefficient)
    } else if distance >= falloff.far.distance {
        Ok(damage * falloff.far.coefficient)
    } else {
        Ok(damage * model.coefficient(distance, falloff)?)
    }
}

/// Hits needed to take `health` away at `distance`
pub fn bullets_to_kill(
    profile: &WeaponProfile,
    distance: Meters,
    damage_type: DamageType,
    model: &FalloffModel,
    health: f64,
) -> Result<u32> {
    let damage = shot_damage_at_range(profile, distance, damage_type, model)?;
    btk_from_damage(damage, health)
}

fn btk_from_damage(damage: f64, health: f64) -> Result<u32> {
    if !(health.is_finite() && health > 0.0) {
        return Err(TtkError::InvalidConfig(format!(
            "target health must be positive, got {}",
            health
        )));
    }
    if !(damage.is_finite() && damage > 0.0) {
        return Err(TtkError::InsufficientDamage(damage));
    }
    let btk = (health / damage).ceil();
    if !(1.0..=u32::MAX as f64).contains(&btk) {
        return Err(TtkError::InsufficientDamage(damage));
    }
    Ok(btk as u32)
}

/// Milliseconds from the first round leaving the barrel to the kill
///
/// The first round fires at t = 0, so only the gaps between the remaining
/// rounds count, plus the last round's flight time.
pub fn time_to_kill(
    profile: &WeaponProfile,
    distance: Meters,
    damage_type: DamageType,
    model: &FalloffModel,
    options: TtkOptions,
) -> Result<Millis> {
    let btk = bullets_to_kill(profile, distance, damage_type, model, options.health)?;
    Ok(ttk_from_btk(profile, distance, btk, options.include_aim_time))
}

fn ttk_from_btk(profile: &WeaponProfile, distance: Meters, btk: u32, include_aim_time: bool) -> Millis {
    let stats = profile.stats();
    let shoot_time = 60_000.0 / stats.rate_of_fire * btk.saturating_sub(1) as f64;
    let flight_time = distance / stats.muzzle_velocity * 1000.0;
    let aim_time = if include_aim_time {
        stats.aim_down_time * 1000.0
    } else {
        0.0
    };
    shoot_time + flight_time + aim_time
}

/// Damage, BTK and TTK at one distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KillSample {
    pub distance: Meters,
    pub damage: f64,
    pub btk: u32,
    pub ttk_ms: Millis,
}

/// A falloff model and a target, bundled so sweeps don't thread them around
#[derive(Debug, Clone)]
pub struct DamageEngine {
    pub model: FalloffModel,
    pub options: TtkOptions,
}

impl Default for DamageEngine {
    fn default() -> Self {
        Self::new(FalloffModel::default())
    }
}

impl DamageEngine {
    pub fn new(model: FalloffModel) -> Self {
        Self {
            model,
            options: TtkOptions::default(),
        }
    }

    pub fn with_health(mut self, health: f64) -> Self {
        self.options.health = health;
        self
    }

    pub fn with_aim_time(mut self, include_aim_time: bool) -> Self {
        self.options.include_aim_time = include_aim_time;
        self
    }

    pub fn shot_damage(&self, profile: &WeaponProfile, distance: Meters, damage_type: DamageType) -> Result<f64> {
        shot_damage_at_range(profile, distance, damage_type, &self.model)
    }

    pub fn bullets_to_kill(&self, profile: &WeaponProfile, distance: Meters, damage_type: DamageType) -> Result<u32> {
        bullets_to_kill(profile, distance, damage_type, &self.model, self.options.health)
    }

    pub fn time_to_kill(&self, profile: &WeaponProfile, distance: Meters, damage_type: DamageType) -> Result<Millis> {
        time_to_kill(profile, distance, damage_type, &self.model, self.options)
    }

    /// All three figures at once, evaluating the falloff model a single time
    pub fn sample(&self, profile: &WeaponProfile, distance: Meters, damage_type: DamageType) -> Result<KillSample> {
        let damage = self.shot_damage(profile, distance, damage_type)?;
        let btk = btk_from_damage(damage, self.options.health)?;
        let ttk_ms = ttk_from_btk(profile, distance, btk, self.options.include_aim_time);
        Ok(KillSample {
            distance,
            damage,
            btk,
            ttk_ms,
        })
    }
}
