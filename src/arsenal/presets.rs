//! Ready-made arsenals

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::arsenal::rack::Arsenal;
use crate::arsenal::roster::Roster;
use crate::core::error::{Result, TtkError};
use crate::weapon::{AttachmentModifier, WeaponProfile};

/// Weapons that gain from a barrel swap, with the barrel they take in the
/// TTK charts
const BARREL_VARIANTS: [(&str, &str, fn() -> AttachmentModifier); 4] = [
    ("AK74", "AK74_HB", AttachmentModifier::heavy_barrel),
    ("AUG_A3", "AUG_A3_HB", AttachmentModifier::heavy_barrel),
    ("HK419", "HK419_HB", AttachmentModifier::heavy_barrel),
    ("L86A1", "L86A1_LB", AttachmentModifier::long_barrel),
];

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArsenalPreset {
    /// Every weapon, nothing fitted
    #[display(fmt = "naked")]
    Naked,
    /// Naked plus the barrel variants used in the TTK charts
    #[display(fmt = "ttk_dat")]
    TtkDat,
    /// Naked, but with the barrel variants in place of their bare weapons
    #[display(fmt = "hb_lb_dat")]
    HbLbDat,
    /// Only weapons whose TTK changes with a barrel, in every useful fit
    #[display(fmt = "barrel_compare")]
    BarrelCompare,
}

impl ArsenalPreset {
    pub const ALL: [ArsenalPreset; 4] = [
        ArsenalPreset::Naked,
        ArsenalPreset::TtkDat,
        ArsenalPreset::HbLbDat,
        ArsenalPreset::BarrelCompare,
    ];

    pub fn build(self, roster: &Roster) -> Result<Arsenal> {
        let arsenal = match self {
            ArsenalPreset::Naked => naked(roster)?,
            ArsenalPreset::TtkDat => {
                let mut arsenal = naked(roster)?;
                for weapon in barrel_variants(roster)? {
                    arsenal.add(weapon);
                }
                arsenal
            }
            ArsenalPreset::HbLbDat => {
                let mut arsenal = naked(roster)?;
                for (base, _, _) in BARREL_VARIANTS {
                    arsenal.remove(&roster.build(base)?);
                }
                for weapon in barrel_variants(roster)? {
                    arsenal.add(weapon);
                }
                arsenal
            }
            ArsenalPreset::BarrelCompare => barrel_compare(roster)?,
        };
        tracing::debug!("Built '{}' arsenal with {} weapons", self, arsenal.len());
        Ok(arsenal)
    }
}

impl FromStr for ArsenalPreset {
    type Err = TtkError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ArsenalPreset::ALL
            .into_iter()
            .find(|p| p.to_string() == s)
            .ok_or_else(|| TtkError::UnknownPreset(s.to_string()))
    }
}

fn variant(roster: &Roster, base: &str, name: &str, barrel: &AttachmentModifier) -> Result<WeaponProfile> {
    roster.build(base)?.with_name(name).with_attachment(barrel)
}

fn barrel_variants(roster: &Roster) -> Result<Vec<WeaponProfile>> {
    BARREL_VARIANTS
        .iter()
        .map(|(base, name, barrel)| variant(roster, base, name, &barrel()))
        .collect()
}

fn naked(roster: &Roster) -> Result<Arsenal> {
    Ok(Arsenal::from_weapons(roster.build_all()?))
}

fn barrel_compare(roster: &Roster) -> Result<Arsenal> {
    let heavy = AttachmentModifier::heavy_barrel();
    let long = AttachmentModifier::long_barrel();
    Ok(Arsenal::from_weapons([
        roster.build("AK74")?,
        variant(roster, "AK74", "AK74_HB", &heavy)?,
        variant(roster, "AK74", "AK74_LB", &long)?,
        roster.build("AUG_A3")?,
        variant(roster, "AUG_A3", "AUG_A3_HB", &heavy)?,
        roster.build("L86A1")?,
        variant(roster, "L86A1", "L86A1_LB", &long)?,
        variant(roster, "L86A1", "L86A1_HB", &heavy)?,
        roster.build("HK419")?,
        variant(roster, "HK419", "HK419_HB", &heavy)?,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arsenal::roster::default_roster;

    #[test]
    fn test_preset_names() {
        for preset in ArsenalPreset::ALL {
            assert_eq!(preset.to_string().parse::<ArsenalPreset>().unwrap(), preset);
        }
        assert!(matches!("armory".parse::<ArsenalPreset>(), Err(TtkError::UnknownPreset(_))));
    }

    #[test]
    fn test_preset_sizes() {
        let roster = default_roster().unwrap();
        assert_eq!(ArsenalPreset::Naked.build(&roster).unwrap().len(), 23);
        assert_eq!(ArsenalPreset::TtkDat.build(&roster).unwrap().len(), 27);
        assert_eq!(ArsenalPreset::HbLbDat.build(&roster).unwrap().len(), 23);
        assert_eq!(ArsenalPreset::BarrelCompare.build(&roster).unwrap().len(), 10);
    }

    #[test]
    fn test_hb_lb_replaces_bare_weapons() {
        let roster = default_roster().unwrap();
        let arsenal = ArsenalPreset::HbLbDat.build(&roster).unwrap();
        assert!(arsenal.weapon_by_name("AK74", &[]).is_none());
        let heavy = arsenal.weapon_by_name("AK74_HB", &[]).unwrap();
        assert_eq!(heavy.stats().damage, 36.3);
        assert!(arsenal.weapon_by_name("L86A1_LB", &[]).is_some());
    }
}
