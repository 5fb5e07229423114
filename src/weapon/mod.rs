//! Weapons, their categories and attachments

pub mod attachment;
pub mod category;
pub mod loadout;
pub mod profile;

pub use attachment::{attachment_by_name, AttachmentModifier, Multipliers, SlotKind};
pub use category::WeaponCategory;
pub use loadout::{equip, round3, unequip};
pub use profile::{
    new_weapon_profile, AttachmentSlots, FalloffInterval, FalloffPoint, WeaponProfile, WeaponStats,
};
