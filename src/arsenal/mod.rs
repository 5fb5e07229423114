//! Weapon collections: the roster file, arsenals built from it, and presets

pub mod presets;
pub mod rack;
pub mod roster;

pub use presets::ArsenalPreset;
pub use rack::Arsenal;
pub use roster::{default_roster, Roster, RosterEntry};
