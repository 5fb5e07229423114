//! BattleBit TTK - weapon damage falloff and time-to-kill analysis

pub mod analysis;
pub mod arsenal;
pub mod core;
pub mod damage;
pub mod falloff;
pub mod weapon;
