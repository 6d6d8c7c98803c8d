//! Per-run upgrade levels and the multipliers they produce.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::UpgradeCategory;

/// Max level for every category except the structure tier.
pub const UPGRADE_MAX_LEVEL: u32 = 5;

/// Max structure tier.
pub const STRUCTURE_TIER_MAX: u32 = 3;

/// Max level for a category.
pub fn max_level(category: UpgradeCategory) -> u32 {
    match category {
        UpgradeCategory::StructureTier => STRUCTURE_TIER_MAX,
        _ => UPGRADE_MAX_LEVEL,
    }
}

/// Suggested price of the next level of a category, for UIs quoting a cost.
/// Returns `None` if the category is already at max level.
pub fn upgrade_cost(category: UpgradeCategory, current_level: u32) -> Option<u32> {
    if current_level >= max_level(category) {
        return None;
    }
    let base = match category {
        UpgradeCategory::WeaponDamage => 80,
        UpgradeCategory::FireRate => 90,
        UpgradeCategory::StructureArmor => 70,
        UpgradeCategory::MaxHealth => 60,
        UpgradeCategory::StructureTier => return Some(STRUCTURE_TIER_COST * (current_level + 1)),
    };
    Some(base * (current_level + 1))
}

/// Upgrade levels for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Upgrades {
    pub weapon_damage: u32,
    pub fire_rate: u32,
    pub structure_armor: u32,
    pub max_health: u32,
    pub structure_tier: u32,
}

impl Upgrades {
    pub fn level_for(&self, category: UpgradeCategory) -> u32 {
        match category {
            UpgradeCategory::WeaponDamage => self.weapon_damage,
            UpgradeCategory::FireRate => self.fire_rate,
            UpgradeCategory::StructureArmor => self.structure_armor,
            UpgradeCategory::MaxHealth => self.max_health,
            UpgradeCategory::StructureTier => self.structure_tier,
        }
    }

    /// Set a level, clamped to the category's max.
    pub fn set_level(&mut self, category: UpgradeCategory, level: u32) {
        let level = level.min(max_level(category));
        match category {
            UpgradeCategory::WeaponDamage => self.weapon_damage = level,
            UpgradeCategory::FireRate => self.fire_rate = level,
            UpgradeCategory::StructureArmor => self.structure_armor = level,
            UpgradeCategory::MaxHealth => self.max_health = level,
            UpgradeCategory::StructureTier => self.structure_tier = level,
        }
    }

    pub fn is_maxed(&self, category: UpgradeCategory) -> bool {
        self.level_for(category) >= max_level(category)
    }

    /// Clamp every level into range (used on profile-supplied defaults).
    pub fn clamped(mut self) -> Self {
        for category in UpgradeCategory::ALL {
            self.set_level(category, self.level_for(category));
        }
        self
    }

    /// Player weapon damage multiplier.
    pub fn damage_multiplier(&self) -> f32 {
        1.0 + self.weapon_damage as f32 * DAMAGE_PER_LEVEL
    }

    /// Player fire-rate multiplier (shots per second scale).
    pub fn fire_rate_multiplier(&self) -> f32 {
        1.0 + self.fire_rate as f32 * FIRE_RATE_PER_LEVEL
    }

    /// Fraction of incoming structure damage that gets through.
    pub fn armor_factor(&self) -> f32 {
        let reduction = self.structure_armor as f32 * ARMOR_PER_LEVEL
            + self.structure_tier as f32 * STRUCTURE_TIER_ARMOR_BONUS;
        1.0 - reduction.min(ARMOR_REDUCTION_CAP)
    }

    /// Structure max health with health and tier upgrades applied.
    pub fn structure_max_health(&self) -> f32 {
        STRUCTURE_BASE_HEALTH
            * (1.0 + self.max_health as f32 * MAX_HEALTH_PER_LEVEL)
            * (1.0 + self.structure_tier as f32 * STRUCTURE_TIER_HEALTH_BONUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_multipliers_are_neutral() {
        let u = Upgrades::default();
        assert_eq!(u.damage_multiplier(), 1.0);
        assert_eq!(u.fire_rate_multiplier(), 1.0);
        assert_eq!(u.armor_factor(), 1.0);
        assert_eq!(u.structure_max_health(), STRUCTURE_BASE_HEALTH);
    }

    #[test]
    fn damage_gives_15_pct_per_level() {
        let mut u = Upgrades::default();
        u.set_level(UpgradeCategory::WeaponDamage, 2);
        assert!((u.damage_multiplier() - 1.30).abs() < 1e-5);
    }

    #[test]
    fn set_level_clamps_to_max() {
        let mut u = Upgrades::default();
        u.set_level(UpgradeCategory::FireRate, 99);
        assert_eq!(u.fire_rate, UPGRADE_MAX_LEVEL);
        u.set_level(UpgradeCategory::StructureTier, 99);
        assert_eq!(u.structure_tier, STRUCTURE_TIER_MAX);
        assert!(u.is_maxed(UpgradeCategory::StructureTier));
    }

    #[test]
    fn armor_reduction_is_capped() {
        let u = Upgrades {
            structure_armor: UPGRADE_MAX_LEVEL,
            structure_tier: STRUCTURE_TIER_MAX,
            ..Default::default()
        };
        assert!(u.armor_factor() >= 1.0 - ARMOR_REDUCTION_CAP - 1e-6);
        assert!(u.armor_factor() < 1.0);
    }

    #[test]
    fn no_cost_quoted_at_max_level() {
        assert!(upgrade_cost(UpgradeCategory::MaxHealth, UPGRADE_MAX_LEVEL).is_none());
        assert_eq!(upgrade_cost(UpgradeCategory::StructureTier, 0), Some(STRUCTURE_TIER_COST));
        assert_eq!(upgrade_cost(UpgradeCategory::WeaponDamage, 1), Some(160));
    }
}
