//! Does fitting a barrel change how many hits a weapon needs?

use derive_more::Display;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::core::error::{Result, TtkError};
use crate::core::types::DamageType;
use crate::damage::DamageEngine;
use crate::weapon::{AttachmentModifier, WeaponProfile};

/// The barrel upgrades the report knows about
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarrelUpgrade {
    #[display(fmt = "HeavyBarrel")]
    HeavyBarrel,
    #[display(fmt = "LongBarrel")]
    LongBarrel,
}

impl BarrelUpgrade {
    /// Attachments that count as this upgrade; some rifles take a Ranger
    /// where others take the heavy barrel
    pub fn synonyms(self) -> Vec<AttachmentModifier> {
        match self {
            BarrelUpgrade::HeavyBarrel => {
                vec![AttachmentModifier::heavy_barrel(), AttachmentModifier::ranger()]
            }
            BarrelUpgrade::LongBarrel => vec![AttachmentModifier::long_barrel()],
        }
    }
}

impl FromStr for BarrelUpgrade {
    type Err = TtkError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "HeavyBarrel" => Ok(BarrelUpgrade::HeavyBarrel),
            "LongBarrel" => Ok(BarrelUpgrade::LongBarrel),
            other => Err(TtkError::UnknownAttachment(other.to_string())),
        }
    }
}

/// Weapon name to whether its point-blank body-shot BTK changes
///
/// Weapons that accept none of the synonyms are reported as unchanged.
pub fn btk_changes<'a>(
    engine: &DamageEngine,
    upgrade: BarrelUpgrade,
    weapons: impl IntoIterator<Item = &'a WeaponProfile>,
) -> Result<BTreeMap<String, bool>> {
    let synonyms = upgrade.synonyms();
    let mut report = BTreeMap::new();
    for weapon in weapons {
        let before = engine.bullets_to_kill(weapon, 0.0, DamageType::Body)?;
        let mut fitted = weapon.clone();
        for barrel in synonyms.iter().filter(|b| weapon.accepts(b)) {
            fitted.equip(barrel)?;
        }
        let after = engine.bullets_to_kill(&fitted, 0.0, DamageType::Body)?;
        report.insert(weapon.name().to_string(), before != after);
    }
    Ok(report)
}
