//! A collection of weapons grouped by category

use std::collections::BTreeMap;

use crate::weapon::{WeaponCategory, WeaponProfile};

/// Weapons grouped by category, each group in insertion order
#[derive(Debug, Clone, Default)]
pub struct Arsenal {
    rack: BTreeMap<WeaponCategory, Vec<WeaponProfile>>,
}

impl Arsenal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_weapons(weapons: impl IntoIterator<Item = WeaponProfile>) -> Self {
        let mut arsenal = Self::new();
        for weapon in weapons {
            arsenal.add(weapon);
        }
        arsenal
    }

    pub fn add(&mut self, weapon: WeaponProfile) {
        self.rack.entry(weapon.category()).or_default().push(weapon);
    }

    /// Remove the first weapon equal to `weapon`, ignoring its name
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, weapon: &WeaponProfile) -> bool {
        let category = weapon.category();
        let Some(group) = self.rack.get_mut(&category) else {
            return false;
        };
        let Some(index) = group.iter().position(|w| w == weapon) else {
            return false;
        };
        group.remove(index);
        if group.is_empty() {
            self.rack.remove(&category);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.rack.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rack.is_empty()
    }

    pub fn categories(&self) -> Vec<WeaponCategory> {
        self.rack.keys().copied().collect()
    }

    pub fn weapons(&self) -> impl Iterator<Item = &WeaponProfile> {
        self.rack.values().flatten()
    }

    pub fn category(&self, category: WeaponCategory) -> &[WeaponProfile] {
        self.rack.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First weapon called `name`, not looking inside `skip` categories
    pub fn weapon_by_name(&self, name: &str, skip: &[WeaponCategory]) -> Option<&WeaponProfile> {
        self.rack
            .iter()
            .filter(|(category, _)| !skip.contains(category))
            .flat_map(|(_, group)| group)
            .find(|w| w.name() == name)
    }

    /// Resolve a mix of weapon and category names
    ///
    /// A category name pulls in every weapon of that category, after which
    /// weapons from it are no longer matched by name. Repeated and unknown
    /// names are skipped. Returns the weapons and the names that matched.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> (Vec<&WeaponProfile>, Vec<String>) {
        let mut weapons = Vec::new();
        let mut matched: Vec<String> = Vec::new();
        let mut covered = Vec::new();

        for name in names {
            let name = name.as_ref();
            if matched.iter().any(|m| m == name) {
                continue;
            }

            if let Some(category) = self.category_named(name) {
                weapons.extend(self.category(category));
                matched.push(name.to_string());
                covered.push(category);
                continue;
            }

            match self.weapon_by_name(name, &covered) {
                Some(weapon) => {
                    weapons.push(weapon);
                    matched.push(name.to_string());
                }
                None if self.weapon_by_name(name, &[]).is_some() => {
                    tracing::debug!("'{}' already selected through its category", name)
                }
                None => tracing::warn!("No weapon or category named '{}' in arsenal", name),
            }
        }

        (weapons, matched)
    }

    fn category_named(&self, name: &str) -> Option<WeaponCategory> {
        self.rack.keys().copied().find(|c| c.to_string() == name)
    }
}
