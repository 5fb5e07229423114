//! Weapon roster loaded from TOML
//!
//! The roster is data, not code: `data/roster.toml` ships with the crate and
//! is embedded as the default, but any file with the same layout can replace
//! it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{Result, TtkError};
use crate::core::types::Meters;
use crate::weapon::{attachment_by_name, WeaponCategory, WeaponProfile, WeaponStats};

const DEFAULT_ROSTER: &str = include_str!("../../data/roster.toml");

/// One weapon as written in the roster file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub category: WeaponCategory,
    pub damage: f64,
    /// Defaults to `damage`
    #[serde(default)]
    pub armor_damage: Option<f64>,
    /// Falloff start and end distance
    pub falloff: (Meters, Meters),
    pub rate_of_fire: f64,
    pub muzzle_velocity: f64,
    pub aim_down_time: f64,
    /// Barrel names replacing the category's legal set
    #[serde(default)]
    pub barrels: Option<Vec<String>>,
}

impl RosterEntry {
    pub fn build(&self) -> Result<WeaponProfile> {
        let stats = WeaponStats::new(
            self.damage,
            self.rate_of_fire,
            self.muzzle_velocity,
            self.aim_down_time,
        )
        .with_armor_damage(self.armor_damage.unwrap_or(self.damage));
        let (near, far) = self.falloff;
        let mut profile = WeaponProfile::new(self.name.clone(), self.category, stats, near, far)?;

        if let Some(names) = &self.barrels {
            let barrels = names
                .iter()
                .map(|name| attachment_by_name(name))
                .collect::<Result<Vec<_>>>()?;
            profile = profile.with_legal_barrels(barrels);
        }
        Ok(profile)
    }
}

/// The full list of weapons, in file order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(rename = "weapon", default)]
    pub weapons: Vec<RosterEntry>,
}

impl Roster {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let roster: Roster = toml::from_str(content)?;
        Ok(roster)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let roster = Self::from_toml_str(&content)?;
        tracing::info!("Loaded {} weapons from {}", roster.weapons.len(), path.display());
        Ok(roster)
    }

    pub fn entry(&self, name: &str) -> Option<&RosterEntry> {
        self.weapons.iter().find(|e| e.name == name)
    }

    /// Build a fresh, unmodified profile for `name`
    pub fn build(&self, name: &str) -> Result<WeaponProfile> {
        self.entry(name)
            .ok_or_else(|| TtkError::UnknownWeapon(name.to_string()))?
            .build()
    }

    pub fn build_all(&self) -> Result<Vec<WeaponProfile>> {
        self.weapons.iter().map(RosterEntry::build).collect()
    }
}

/// The roster shipped with the crate
pub fn default_roster() -> Result<Roster> {
    Roster::from_toml_str(DEFAULT_ROSTER)
}
