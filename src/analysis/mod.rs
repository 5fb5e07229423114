//! Batch analyses built on the damage engine

pub mod accuracy;
pub mod kill_change;
pub mod sweep;
pub mod title;

pub use accuracy::{compare, measured_samples, validated, MeasuredDamage, ModelAccuracy};
pub use kill_change::{btk_changes, BarrelUpgrade};
pub use sweep::{linspace, sweep, WeaponCurve};
pub use title::ttk_title;
