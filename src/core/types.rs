//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::TtkError;

/// Distance to target in metres
pub type Meters = f64;

/// Duration in milliseconds
pub type Millis = f64;

/// Which base damage a shot is computed from
///
/// `Body` is the canonical damage value. `Armor` reads the separately tracked
/// armour damage, which equals body damage unless a roster entry overrides it.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    #[display(fmt = "bod_dam")]
    Body,
    #[display(fmt = "ar_dam")]
    Armor,
}

impl FromStr for DamageType {
    type Err = TtkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "body" | "bod_dam" => Ok(DamageType::Body),
            "armor" | "armour" | "ar_dam" => Ok(DamageType::Armor),
            other => Err(TtkError::InvalidConfig(format!("unknown damage type '{}'", other))),
        }
    }
}
