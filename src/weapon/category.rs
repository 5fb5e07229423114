//! Weapon categories
//!
//! A category fixes the minimum damage coefficient (min damage / base damage),
//! the headshot multiplier, and which barrels a weapon of that category
//! accepts by default. Categories are a lookup table, not a type hierarchy.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::TtkError;
use crate::weapon::attachment::AttachmentModifier;

#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeaponCategory {
    #[display(fmt = "AR")]
    Ar,
    #[display(fmt = "LMG")]
    Lmg,
    #[display(fmt = "SMG")]
    Smg,
    #[display(fmt = "PDW")]
    Pdw,
    #[display(fmt = "CARBINE")]
    Carbine,
}

impl WeaponCategory {
    pub const ALL: [WeaponCategory; 5] = [
        WeaponCategory::Ar,
        WeaponCategory::Lmg,
        WeaponCategory::Smg,
        WeaponCategory::Pdw,
        WeaponCategory::Carbine,
    ];

    /// Damage coefficient at the end of the falloff interval
    pub fn min_coefficient(self) -> f64 {
        match self {
            WeaponCategory::Ar => 0.35,
            WeaponCategory::Lmg => 0.3,
            WeaponCategory::Smg | WeaponCategory::Pdw | WeaponCategory::Carbine => 0.25,
        }
    }

    pub fn headshot_multiplier(self) -> f64 {
        match self {
            WeaponCategory::Smg => 1.2,
            _ => 1.5,
        }
    }

    /// Barrels a weapon of this category accepts unless its roster entry overrides them
    pub fn default_barrels(self) -> Vec<AttachmentModifier> {
        match self {
            WeaponCategory::Ar | WeaponCategory::Lmg => vec![
                AttachmentModifier::heavy_barrel(),
                AttachmentModifier::long_barrel(),
            ],
            WeaponCategory::Smg | WeaponCategory::Pdw | WeaponCategory::Carbine => Vec::new(),
        }
    }
}

impl FromStr for WeaponCategory {
    type Err = TtkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeaponCategory::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| TtkError::InvalidProfile(format!("unknown weapon category '{}'", s)))
    }
}
