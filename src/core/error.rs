use thiserror::Error;

use crate::weapon::SlotKind;

#[derive(Error, Debug)]
pub enum TtkError {
    #[error("{attachment} cannot be put in the {slot} slot of {weapon}")]
    InvalidAttachment {
        slot: SlotKind,
        attachment: String,
        weapon: String,
    },

    #[error("Invalid distance: {0} (must be a non-negative number)")]
    InvalidDistance(f64),

    #[error("Bezier falloff has no coefficient in [0, 1] at {distance} m (offset {offset})")]
    NoRealSolution { distance: f64, offset: f64 },

    #[error("Bezier falloff has several coefficients in [0, 1] at {distance} m (offset {offset})")]
    AmbiguousSolution { distance: f64, offset: f64 },

    #[error("Shot damage {0} cannot kill a target")]
    InsufficientDamage(f64),

    #[error("Invalid weapon profile: {0}")]
    InvalidProfile(String),

    #[error("Unknown attachment: {0}")]
    UnknownAttachment(String),

    #[error("Unknown weapon: {0}")]
    UnknownWeapon(String),

    #[error("Unknown arsenal preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TtkError>;
