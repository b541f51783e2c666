//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use uuid::Uuid;

/// Unique identifier for actors (colonists, guests, animals)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Alert level identifier
///
/// Only two levels are meaningful right now: `NORMAL` and `EMERGENCY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertLevelId(pub u32);

impl AlertLevelId {
    pub const NORMAL: AlertLevelId = AlertLevelId(0);
    pub const EMERGENCY: AlertLevelId = AlertLevelId(1);

    pub fn is_alert(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for AlertLevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resource categories governed by an independently stored policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ResourceCategory {
    Work = 0,
    /// Schedules and area restrictions
    Restrict = 1,
    Assign = 2,
    Animal = 3,
    Mech = 4,
    Weapons = 5,
    Robots = 6,
}

impl ResourceCategory {
    pub const COUNT: usize = 7;

    pub const ALL: [ResourceCategory; Self::COUNT] = [
        ResourceCategory::Work,
        ResourceCategory::Restrict,
        ResourceCategory::Assign,
        ResourceCategory::Animal,
        ResourceCategory::Mech,
        ResourceCategory::Weapons,
        ResourceCategory::Robots,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Categories that only exist when a content pack is active
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            ResourceCategory::Mech | ResourceCategory::Weapons | ResourceCategory::Robots
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ResourceCategory::Work => "work",
            ResourceCategory::Restrict => "restrict",
            ResourceCategory::Assign => "assign",
            ResourceCategory::Animal => "animal",
            ResourceCategory::Mech => "mech",
            ResourceCategory::Weapons => "weapons",
            ResourceCategory::Robots => "robots",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per resource category, indexed by the category itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTable<T> {
    slots: [T; ResourceCategory::COUNT],
}

impl<T> CategoryTable<T> {
    pub fn from_fn(mut f: impl FnMut(ResourceCategory) -> T) -> Self {
        Self {
            slots: ResourceCategory::ALL.map(&mut f),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceCategory, &T)> {
        ResourceCategory::ALL.into_iter().zip(self.slots.iter())
    }
}

impl<T> Index<ResourceCategory> for CategoryTable<T> {
    type Output = T;

    fn index(&self, category: ResourceCategory) -> &T {
        &self.slots[category.index()]
    }
}

impl<T> IndexMut<ResourceCategory> for CategoryTable<T> {
    fn index_mut(&mut self, category: ResourceCategory) -> &mut T {
        &mut self.slots[category.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_indices_match_all_order() {
        for (i, category) in ResourceCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_only_content_categories_are_optional() {
        let optional: Vec<_> = ResourceCategory::ALL
            .into_iter()
            .filter(|c| c.is_optional())
            .collect();
        assert_eq!(
            optional,
            vec![
                ResourceCategory::Mech,
                ResourceCategory::Weapons,
                ResourceCategory::Robots
            ]
        );
    }

    #[test]
    fn test_category_display_is_lowercase() {
        assert_eq!(ResourceCategory::Restrict.to_string(), "restrict");
        assert_eq!(
            serde_json::to_string(&ResourceCategory::Weapons).unwrap(),
            "\"weapons\""
        );
    }

    #[test]
    fn test_category_table_indexing() {
        let mut table = CategoryTable::from_fn(|c| c.index() * 10);
        assert_eq!(table[ResourceCategory::Animal], 30);
        table[ResourceCategory::Animal] = 1;
        assert_eq!(table[ResourceCategory::Animal], 1);
        assert_eq!(table.iter().count(), ResourceCategory::COUNT);
    }

    #[test]
    fn test_alert_level_ordering() {
        assert!(!AlertLevelId::NORMAL.is_alert());
        assert!(AlertLevelId::EMERGENCY.is_alert());
        assert!(AlertLevelId::EMERGENCY > AlertLevelId::NORMAL);
    }
}
