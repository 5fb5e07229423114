//! Attachment swapping
//!
//! The game displays stats to three decimal places and rounds after every
//! multiply or divide, so fitting and removing attachments must do the same
//! to reproduce displayed values. Removing an attachment divides its
//! multipliers back out; a fit-then-remove round trip is therefore only
//! exact to within 0.001 per stat.

use crate::core::error::{Result, TtkError};
use crate::weapon::attachment::{AttachmentModifier, Multipliers, SlotKind};
use crate::weapon::profile::{WeaponProfile, WeaponStats};

/// Round half-up at the third decimal, truncating anything past the fourth
///
/// Only meaningful for the non-negative stats it is applied to.
pub fn round3(x: f64) -> f64 {
    let scaled = (x * 10_000.0).trunc() as i64;
    let thousandths = scaled / 10;
    if scaled % 10 >= 5 {
        (thousandths + 1) as f64 / 1000.0
    } else {
        thousandths as f64 / 1000.0
    }
}

fn scale(stats: &mut WeaponStats, m: &Multipliers, op: fn(f64, f64) -> f64) {
    stats.damage = round3(op(stats.damage, m.damage));
    stats.armor_damage = round3(op(stats.armor_damage, m.armor_damage));
    stats.muzzle_velocity = round3(op(stats.muzzle_velocity, m.velocity));
    stats.rate_of_fire = round3(op(stats.rate_of_fire, m.rate_of_fire));
    stats.aim_down_time = round3(op(stats.aim_down_time, m.aim_down_time));
}

impl WeaponProfile {
    /// Fit an attachment into its own slot, replacing whatever is there
    pub fn equip(&mut self, modifier: &AttachmentModifier) -> Result<()> {
        self.swap_attachment(modifier.slot, modifier)
    }

    /// Put the empty sentinel back into a slot
    pub fn unequip(&mut self, slot: SlotKind) -> Result<()> {
        self.swap_attachment(slot, &AttachmentModifier::empty(slot))
    }

    /// Fit `modifier` into `slot`
    ///
    /// Fitting the attachment that is already there is a no-op. Otherwise the
    /// current attachment's multipliers are divided out and the new ones
    /// multiplied in, rounding after each step. Multipliers always come from
    /// the weapon's legal list, never from `modifier` itself.
    pub fn swap_attachment(&mut self, slot: SlotKind, modifier: &AttachmentModifier) -> Result<()> {
        let legal = match self.legal_version(modifier) {
            Some(legal) if legal.slot == slot => legal,
            _ => {
                return Err(TtkError::InvalidAttachment {
                    slot,
                    attachment: modifier.name.clone(),
                    weapon: self.name.clone(),
                })
            }
        };
        if *self.slots.get(slot) == legal {
            return Ok(());
        }

        let current = self.slots.get(slot).multipliers;
        scale(&mut self.stats, &current, |stat, m| stat / m);
        scale(&mut self.stats, &legal.multipliers, |stat, m| stat * m);
        self.slots.set(legal);

        tracing::debug!("{}: {} slot now holds {}", self.name, slot, modifier.name);
        Ok(())
    }

    /// Copy-on-write form of [`WeaponProfile::equip`]
    pub fn with_attachment(mut self, modifier: &AttachmentModifier) -> Result<Self> {
        self.equip(modifier)?;
        Ok(self)
    }
}

/// Return a copy of `profile` with `modifier` fitted
pub fn equip(profile: &WeaponProfile, modifier: &AttachmentModifier) -> Result<WeaponProfile> {
    profile.clone().with_attachment(modifier)
}

/// Return a copy of `profile` with `slot` emptied
pub fn unequip(profile: &WeaponProfile, slot: SlotKind) -> Result<WeaponProfile> {
    let mut profile = profile.clone();
    profile.unequip(slot)?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapon::category::WeaponCategory;

    fn ak74() -> WeaponProfile {
        WeaponProfile::new(
            "AK74",
            WeaponCategory::Ar,
            WeaponStats::new(33.0, 670.0, 700.0, 0.25),
            50.0,
            300.0,
        )
        .unwrap()
    }

    fn mp7() -> WeaponProfile {
        WeaponProfile::new(
            "MP7",
            WeaponCategory::Smg,
            WeaponStats::new(25.0, 950.0, 350.0, 0.15),
            50.0,
            200.0,
        )
        .unwrap()
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(36.300000000000004), 36.3);
        assert_eq!(round3(1.2345), 1.235);
        assert_eq!(round3(1.2344999), 1.234);
        assert_eq!(round3(700.0), 700.0);
        assert_eq!(round3(0.0), 0.0);
    }

    #[test]
    fn test_heavy_barrel_scales_damage_and_velocity() {
        let mut gun = ak74();
        gun.equip(&AttachmentModifier::heavy_barrel()).unwrap();
        assert_eq!(gun.stats().damage, 36.3);
        assert_eq!(gun.stats().muzzle_velocity, 770.0);
        assert_eq!(gun.stats().rate_of_fire, 670.0);
        assert_eq!(gun.attachment(SlotKind::Barrel).name, "HeavyBarrel");
    }

    #[test]
    fn test_swapping_barrels_replaces_multipliers() {
        let mut gun = ak74();
        gun.equip(&AttachmentModifier::heavy_barrel()).unwrap();
        gun.equip(&AttachmentModifier::long_barrel()).unwrap();
        // 33 * 1.1 = 36.3, / 1.1 = 33.0, * 1.05 = 34.65
        assert_eq!(gun.stats().damage, 34.65);
        assert_eq!(gun.attachment(SlotKind::Barrel).name, "LongBarrel");
    }

    #[test]
    fn test_equip_same_attachment_is_noop() {
        let mut gun = ak74();
        gun.equip(&AttachmentModifier::heavy_barrel()).unwrap();
        let before = *gun.stats();
        gun.equip(&AttachmentModifier::heavy_barrel()).unwrap();
        assert_eq!(*gun.stats(), before);
    }

    #[test]
    fn test_unequip_restores_stats() {
        let mut gun = ak74();
        let base = *gun.stats();
        gun.equip(&AttachmentModifier::long_barrel()).unwrap();
        gun.unequip(SlotKind::Barrel).unwrap();
        assert!((gun.stats().damage - base.damage).abs() <= 0.001);
        assert!((gun.stats().muzzle_velocity - base.muzzle_velocity).abs() <= 0.001);
        assert_eq!(gun, ak74());
    }

    #[test]
    fn test_illegal_barrel_names_slot() {
        let mut gun = mp7();
        let err = gun.equip(&AttachmentModifier::heavy_barrel()).unwrap_err();
        match err {
            TtkError::InvalidAttachment { slot, attachment, .. } => {
                assert_eq!(slot, SlotKind::Barrel);
                assert_eq!(attachment, "HeavyBarrel");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(*gun.stats(), *mp7().stats());
    }

    #[test]
    fn test_slot_mismatch_rejected() {
        let mut gun = ak74();
        let result = gun.swap_attachment(SlotKind::Sight, &AttachmentModifier::heavy_barrel());
        assert!(matches!(result, Err(TtkError::InvalidAttachment { slot: SlotKind::Sight, .. })));
    }

    #[test]
    fn test_forged_empty_uses_real_sentinel() {
        let mut gun = ak74();
        gun.equip(&AttachmentModifier::heavy_barrel()).unwrap();
        let forged = AttachmentModifier::new(
            "Empty",
            SlotKind::Barrel,
            Multipliers {
                damage: 3.0,
                ..Multipliers::default()
            },
        );
        gun.equip(&forged).unwrap();
        assert_eq!(gun.stats().damage, 33.0);
        assert_eq!(gun.attachment(SlotKind::Barrel).multipliers, Multipliers::default());
        assert_eq!(gun, ak74());
    }

    #[test]
    fn test_tweaked_multipliers_ignored() {
        let mut gun = ak74();
        let mut tweaked = AttachmentModifier::heavy_barrel();
        tweaked.multipliers.damage = 5.0;
        gun.equip(&tweaked).unwrap();
        assert_eq!(gun.stats().damage, 36.3);
        assert_eq!(gun.attachment(SlotKind::Barrel).multipliers.damage, 1.1);
        gun.unequip(SlotKind::Barrel).unwrap();
        assert_eq!(gun, ak74());
    }

    #[test]
    fn test_copy_on_write_leaves_original() {
        let gun = ak74();
        let heavy = equip(&gun, &AttachmentModifier::heavy_barrel()).unwrap();
        assert_eq!(gun.stats().damage, 33.0);
        assert_eq!(heavy.stats().damage, 36.3);
        let bare = unequip(&heavy, SlotKind::Barrel).unwrap();
        assert_eq!(bare, gun);
    }
}
