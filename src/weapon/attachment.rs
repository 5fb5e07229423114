//! Attachment modifiers
//!
//! An attachment is a named bundle of multipliers for one equipment slot.
//! Every multiplier defaults to 1.0 (no effect). Each slot has an "Empty"
//! sentinel which is legal on every weapon.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::core::error::{Result, TtkError};

/// Name shared by every slot's empty sentinel
pub const EMPTY: &str = "Empty";

/// The six attachment slots on a weapon
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    #[display(fmt = "barrel")]
    Barrel,
    #[display(fmt = "sight")]
    Sight,
    #[display(fmt = "c_sight")]
    CantedSight,
    #[display(fmt = "mag")]
    Magazine,
    #[display(fmt = "u_rail")]
    UnderRail,
    #[display(fmt = "s_rail")]
    SideRail,
}

impl SlotKind {
    pub const ALL: [SlotKind; 6] = [
        SlotKind::Barrel,
        SlotKind::Sight,
        SlotKind::CantedSight,
        SlotKind::Magazine,
        SlotKind::UnderRail,
        SlotKind::SideRail,
    ];
}

/// Scale factors applied to a weapon's stats while the attachment is fitted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Multipliers {
    pub damage: f64,
    pub armor_damage: f64,
    pub velocity: f64,
    pub rate_of_fire: f64,
    pub aim_down_time: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            damage: 1.0,
            armor_damage: 1.0,
            velocity: 1.0,
            rate_of_fire: 1.0,
            aim_down_time: 1.0,
        }
    }
}

/// An immutable, named multiplier bundle for one slot
///
/// Identity is the `(slot, name)` pair: two modifiers with the same name in
/// the same slot are the same attachment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentModifier {
    pub name: String,
    pub slot: SlotKind,
    #[serde(default)]
    pub multipliers: Multipliers,
}

impl PartialEq for AttachmentModifier {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot && self.name == other.name
    }
}

impl Eq for AttachmentModifier {}

impl Hash for AttachmentModifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slot.hash(state);
        self.name.hash(state);
    }
}

impl std::fmt::Display for AttachmentModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl AttachmentModifier {
    pub fn new(name: impl Into<String>, slot: SlotKind, multipliers: Multipliers) -> Self {
        Self {
            name: name.into(),
            slot,
            multipliers,
        }
    }

    /// The no-effect sentinel for a slot
    pub fn empty(slot: SlotKind) -> Self {
        Self::new(EMPTY, slot, Multipliers::default())
    }

    pub fn is_empty(&self) -> bool {
        self.name == EMPTY
    }

    /// Heavy barrel: +10% damage, +10% velocity
    pub fn heavy_barrel() -> Self {
        Self::new(
            "HeavyBarrel",
            SlotKind::Barrel,
            Multipliers {
                damage: 1.1,
                armor_damage: 1.1,
                velocity: 1.1,
                ..Multipliers::default()
            },
        )
    }

    /// Long barrel: +5% body damage, +10% armour damage, +10% velocity
    pub fn long_barrel() -> Self {
        Self::new(
            "LongBarrel",
            SlotKind::Barrel,
            Multipliers {
                damage: 1.05,
                armor_damage: 1.1,
                velocity: 1.1,
                ..Multipliers::default()
            },
        )
    }

    /// Ranger barrel, the heavy barrel equivalent on some rifles
    pub fn ranger() -> Self {
        Self::new(
            "Ranger",
            SlotKind::Barrel,
            Multipliers {
                damage: 1.1,
                armor_damage: 1.1,
                velocity: 1.1,
                ..Multipliers::default()
            },
        )
    }
}

/// Every non-empty attachment the crate knows about
pub fn catalog() -> Vec<AttachmentModifier> {
    vec![
        AttachmentModifier::heavy_barrel(),
        AttachmentModifier::long_barrel(),
        AttachmentModifier::ranger(),
    ]
}

/// Look up a catalog attachment by name
///
/// `"Empty"` is ambiguous across slots, so it resolves to the barrel sentinel;
/// use [`AttachmentModifier::empty`] for any other slot.
pub fn attachment_by_name(name: &str) -> Result<AttachmentModifier> {
    if name == EMPTY {
        return Ok(AttachmentModifier::empty(SlotKind::Barrel));
    }
    catalog()
        .into_iter()
        .find(|m| m.name == name)
        .ok_or_else(|| TtkError::UnknownAttachment(name.to_string()))
}
