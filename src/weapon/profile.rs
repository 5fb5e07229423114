//! Weapon profiles
//!
//! A profile holds a weapon's current stats, its falloff interval and the
//! attachment in each of its six slots. Stats are only ever changed by
//! swapping attachments (see `weapon::loadout`).

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::error::{Result, TtkError};
use crate::core::types::{DamageType, Meters};
use crate::weapon::attachment::{AttachmentModifier, SlotKind};
use crate::weapon::category::WeaponCategory;

/// The stats attachments scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage: f64,
    pub armor_damage: f64,
    /// Rounds per minute
    pub rate_of_fire: f64,
    /// Metres per second
    pub muzzle_velocity: f64,
    /// Seconds
    pub aim_down_time: f64,
}

impl WeaponStats {
    /// Stats with armour damage equal to body damage
    pub fn new(damage: f64, rate_of_fire: f64, muzzle_velocity: f64, aim_down_time: f64) -> Self {
        Self {
            damage,
            armor_damage: damage,
            rate_of_fire,
            muzzle_velocity,
            aim_down_time,
        }
    }

    pub fn with_armor_damage(mut self, armor_damage: f64) -> Self {
        self.armor_damage = armor_damage;
        self
    }

    pub fn damage(&self, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::Body => self.damage,
            DamageType::Armor => self.armor_damage,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("damage", self.damage),
            ("armor_damage", self.armor_damage),
            ("rate_of_fire", self.rate_of_fire),
            ("muzzle_velocity", self.muzzle_velocity),
        ];
        for (stat, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TtkError::InvalidProfile(format!(
                    "{} must be positive, got {}",
                    stat, value
                )));
            }
        }
        if !(self.aim_down_time.is_finite() && self.aim_down_time >= 0.0) {
            return Err(TtkError::InvalidProfile(format!(
                "aim_down_time must be non-negative, got {}",
                self.aim_down_time
            )));
        }
        Ok(())
    }
}

/// A (distance, damage coefficient) anchor of the falloff curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FalloffPoint {
    pub distance: Meters,
    pub coefficient: f64,
}

/// The distance range over which damage decays from full to minimum
///
/// `near` always has coefficient 1.0; `far` carries the minimum coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FalloffInterval {
    pub near: FalloffPoint,
    pub far: FalloffPoint,
}

impl FalloffInterval {
    pub fn new(near_distance: Meters, far_distance: Meters, min_coefficient: f64) -> Result<Self> {
        if !(near_distance.is_finite() && far_distance.is_finite()) || near_distance < 0.0 {
            return Err(TtkError::InvalidProfile(format!(
                "falloff distances must be finite and non-negative, got [{}, {}]",
                near_distance, far_distance
            )));
        }
        if near_distance >= far_distance {
            return Err(TtkError::InvalidProfile(format!(
                "falloff start {} must be before falloff end {}",
                near_distance, far_distance
            )));
        }
        if !(min_coefficient > 0.0 && min_coefficient <= 1.0) {
            return Err(TtkError::InvalidProfile(format!(
                "minimum damage coefficient must be in (0, 1], got {}",
                min_coefficient
            )));
        }
        Ok(Self {
            near: FalloffPoint {
                distance: near_distance,
                coefficient: 1.0,
            },
            far: FalloffPoint {
                distance: far_distance,
                coefficient: min_coefficient,
            },
        })
    }

    pub fn min_coefficient(&self) -> f64 {
        self.far.coefficient
    }

    pub fn length(&self) -> Meters {
        self.far.distance - self.near.distance
    }

    /// True strictly inside (near, far), where a falloff model applies
    pub fn is_falling_off(&self, distance: Meters) -> bool {
        distance > self.near.distance && distance < self.far.distance
    }
}

/// The attachment currently fitted in each slot
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentSlots {
    barrel: AttachmentModifier,
    sight: AttachmentModifier,
    canted_sight: AttachmentModifier,
    magazine: AttachmentModifier,
    under_rail: AttachmentModifier,
    side_rail: AttachmentModifier,
}

impl Default for AttachmentSlots {
    fn default() -> Self {
        Self {
            barrel: AttachmentModifier::empty(SlotKind::Barrel),
            sight: AttachmentModifier::empty(SlotKind::Sight),
            canted_sight: AttachmentModifier::empty(SlotKind::CantedSight),
            magazine: AttachmentModifier::empty(SlotKind::Magazine),
            under_rail: AttachmentModifier::empty(SlotKind::UnderRail),
            side_rail: AttachmentModifier::empty(SlotKind::SideRail),
        }
    }
}

impl AttachmentSlots {
    pub fn get(&self, slot: SlotKind) -> &AttachmentModifier {
        match slot {
            SlotKind::Barrel => &self.barrel,
            SlotKind::Sight => &self.sight,
            SlotKind::CantedSight => &self.canted_sight,
            SlotKind::Magazine => &self.magazine,
            SlotKind::UnderRail => &self.under_rail,
            SlotKind::SideRail => &self.side_rail,
        }
    }

    pub(super) fn set(&mut self, modifier: AttachmentModifier) {
        let slot = match modifier.slot {
            SlotKind::Barrel => &mut self.barrel,
            SlotKind::Sight => &mut self.sight,
            SlotKind::CantedSight => &mut self.canted_sight,
            SlotKind::Magazine => &mut self.magazine,
            SlotKind::UnderRail => &mut self.under_rail,
            SlotKind::SideRail => &mut self.side_rail,
        };
        *slot = modifier;
    }
}

/// A weapon's base stats, falloff interval and fitted attachments
#[derive(Debug, Clone)]
pub struct WeaponProfile {
    pub(super) name: String,
    pub(super) category: WeaponCategory,
    pub(super) base: WeaponStats,
    pub(super) stats: WeaponStats,
    pub(super) falloff: FalloffInterval,
    pub(super) slots: AttachmentSlots,
    pub(super) legal: AHashMap<SlotKind, Vec<AttachmentModifier>>,
}

impl WeaponProfile {
    /// Create a profile whose minimum damage coefficient comes from its category
    pub fn new(
        name: impl Into<String>,
        category: WeaponCategory,
        stats: WeaponStats,
        falloff_near: Meters,
        falloff_far: Meters,
    ) -> Result<Self> {
        let falloff = FalloffInterval::new(falloff_near, falloff_far, category.min_coefficient())?;
        Self::from_parts(name.into(), category, stats, falloff)
    }

    fn from_parts(
        name: String,
        category: WeaponCategory,
        stats: WeaponStats,
        falloff: FalloffInterval,
    ) -> Result<Self> {
        stats.validate()?;
        let mut legal = AHashMap::new();
        legal.insert(SlotKind::Barrel, category.default_barrels());
        Ok(Self {
            name,
            category,
            base: stats,
            stats,
            falloff,
            slots: AttachmentSlots::default(),
            legal,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the barrels this particular weapon accepts
    pub fn with_legal_barrels(mut self, barrels: Vec<AttachmentModifier>) -> Self {
        self.legal.insert(SlotKind::Barrel, barrels);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> WeaponCategory {
        self.category
    }

    /// Current stats, with every fitted attachment applied
    pub fn stats(&self) -> &WeaponStats {
        &self.stats
    }

    /// Stats as constructed, before any attachment
    pub fn base_stats(&self) -> &WeaponStats {
        &self.base
    }

    pub fn falloff(&self) -> &FalloffInterval {
        &self.falloff
    }

    pub fn min_coefficient(&self) -> f64 {
        self.falloff.min_coefficient()
    }

    pub fn damage(&self, damage_type: DamageType) -> f64 {
        self.stats.damage(damage_type)
    }

    /// Damage on the near plateau, the most a single shot can do
    pub fn max_damage(&self, damage_type: DamageType) -> f64 {
        self.damage(damage_type) * self.falloff.near.coefficient
    }

    pub fn attachment(&self, slot: SlotKind) -> &AttachmentModifier {
        self.slots.get(slot)
    }

    /// Slot name to fitted attachment name, for display
    pub fn attachments(&self) -> BTreeMap<SlotKind, String> {
        SlotKind::ALL
            .into_iter()
            .map(|slot| (slot, self.slots.get(slot).name.clone()))
            .collect()
    }

    /// Non-empty attachments this weapon accepts in a slot
    pub fn legal_attachments(&self, slot: SlotKind) -> &[AttachmentModifier] {
        self.legal.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn accepts(&self, modifier: &AttachmentModifier) -> bool {
        self.legal_version(modifier).is_some()
    }

    /// The weapon's own copy of `modifier`, with the multipliers it really has
    ///
    /// Matching is by slot and name, so a caller-built modifier never
    /// contributes its own multipliers.
    pub fn legal_version(&self, modifier: &AttachmentModifier) -> Option<AttachmentModifier> {
        if modifier.is_empty() {
            return Some(AttachmentModifier::empty(modifier.slot));
        }
        self.legal_attachments(modifier.slot)
            .iter()
            .find(|legal| *legal == modifier)
            .cloned()
    }
}

/// Two profiles are equal when they would fight identically; the label is ignored
impl PartialEq for WeaponProfile {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category
            && self.stats == other.stats
            && self.falloff == other.falloff
            && self.slots == other.slots
    }
}

impl std::fmt::Display for WeaponProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Build an unnamed profile with an explicit minimum damage coefficient
#[allow(clippy::too_many_arguments)]
pub fn new_weapon_profile(
    category: WeaponCategory,
    base_damage: f64,
    rate_of_fire: f64,
    muzzle_velocity: f64,
    aim_down_time: f64,
    falloff_near: Meters,
    falloff_far: Meters,
    min_coefficient: f64,
) -> Result<WeaponProfile> {
    let stats = WeaponStats::new(base_damage, rate_of_fire, muzzle_velocity, aim_down_time);
    let falloff = FalloffInterval::new(falloff_near, falloff_far, min_coefficient)?;
    WeaponProfile::from_parts(category.to_string(), category, stats, falloff)
}
