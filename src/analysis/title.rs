//! TTK chart titles

use crate::core::types::DamageType;

/// `"Time to Kill <names> [+ ads ]<damage type>"`
///
/// `fig_name` replaces the weapon names when given.
pub fn ttk_title<S: AsRef<str>>(
    names: &[S],
    damage_type: DamageType,
    fig_name: Option<&str>,
    include_aim_time: bool,
) -> String {
    let subject = match fig_name {
        Some(name) => name.to_string(),
        None => names.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" "),
    };
    let ads = if include_aim_time { "+ ads " } else { "" };
    format!("Time to Kill {} {}{}", subject, ads, damage_type)
}
