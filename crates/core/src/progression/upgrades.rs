use serde::{Deserialize, Serialize};

use crate::types::UpgradeKind;

pub const MAX_UPGRADE_LEVEL: u32 = 10;

pub const HEALTH_PER_LEVEL: f32 = 15.0;
pub const MANA_PER_LEVEL: f32 = 10.0;
pub const SPEED_PER_LEVEL: f32 = 0.05;
pub const MANA_REGEN_PER_LEVEL: f32 = 0.15;
pub const DAMAGE_PER_LEVEL: f32 = 0.1;
pub const GOLD_PER_LEVEL: f32 = 0.1;
pub const CRIT_PER_LEVEL: f32 = 0.03;
pub const LIFE_STEAL_PER_LEVEL: f32 = 0.02;
pub const ESSENCE_PER_LEVEL: f32 = 0.2;

/// Integer levels for each permanent upgrade, carried across runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermanentUpgrades {
    levels: [u32; UpgradeKind::COUNT],
}

impl PermanentUpgrades {
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        self.levels[kind.index()]
    }

    pub fn set_level(&mut self, kind: UpgradeKind, level: u32) {
        self.levels[kind.index()] = level.min(MAX_UPGRADE_LEVEL);
    }

    /// Raises one level. Returns false when already at the cap.
    pub fn increment(&mut self, kind: UpgradeKind) -> bool {
        let level = self.level(kind);
        if level >= MAX_UPGRADE_LEVEL {
            return false;
        }
        self.set_level(kind, level + 1);
        true
    }

    fn scaled(&self, kind: UpgradeKind, per_level: f32) -> f32 {
        self.level(kind) as f32 * per_level
    }

    pub fn max_health_bonus(&self) -> f32 {
        self.scaled(UpgradeKind::Health, HEALTH_PER_LEVEL)
    }

    pub fn max_mana_bonus(&self) -> f32 {
        self.scaled(UpgradeKind::Mana, MANA_PER_LEVEL)
    }

    pub fn speed_multiplier(&self) -> f32 {
        1.0 + self.scaled(UpgradeKind::Speed, SPEED_PER_LEVEL)
    }

    pub fn mana_regen_multiplier(&self) -> f32 {
        1.0 + self.scaled(UpgradeKind::ManaRegen, MANA_REGEN_PER_LEVEL)
    }

    pub fn damage_multiplier(&self) -> f32 {
        1.0 + self.scaled(UpgradeKind::Damage, DAMAGE_PER_LEVEL)
    }

    pub fn gold_multiplier(&self) -> f32 {
        1.0 + self.scaled(UpgradeKind::GoldGain, GOLD_PER_LEVEL)
    }

    pub fn crit_chance(&self) -> f32 {
        self.scaled(UpgradeKind::CritChance, CRIT_PER_LEVEL)
    }

    pub fn life_steal_fraction(&self) -> f32 {
        self.scaled(UpgradeKind::LifeSteal, LIFE_STEAL_PER_LEVEL)
    }

    pub fn essence_multiplier(&self) -> f32 {
        1.0 + self.scaled(UpgradeKind::EssenceGain, ESSENCE_PER_LEVEL)
    }
}

fn base_cost(kind: UpgradeKind) -> u64 {
    match kind {
        UpgradeKind::Health | UpgradeKind::Mana | UpgradeKind::ManaRegen => 50,
        UpgradeKind::Speed => 60,
        UpgradeKind::Damage => 75,
        UpgradeKind::GoldGain => 80,
        UpgradeKind::CritChance => 100,
        UpgradeKind::LifeSteal => 120,
        UpgradeKind::EssenceGain => 150,
    }
}

/// Essence price of the next level, or `None` at the cap.
pub fn upgrade_cost(kind: UpgradeKind, current_level: u32) -> Option<u64> {
    if current_level >= MAX_UPGRADE_LEVEL {
        return None;
    }
    // Each level costs 1.4x the previous, floored.
    Some(base_cost(kind) * 7_u64.pow(current_level) / 5_u64.pow(current_level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_saturate_at_the_cap() {
        let mut upgrades = PermanentUpgrades::default();
        for _ in 0..MAX_UPGRADE_LEVEL {
            assert!(upgrades.increment(UpgradeKind::CritChance));
        }
        assert!(!upgrades.increment(UpgradeKind::CritChance));
        assert_eq!(upgrades.level(UpgradeKind::CritChance), MAX_UPGRADE_LEVEL);
    }

    #[test]
    fn derived_stats_follow_increments() {
        let mut upgrades = PermanentUpgrades::default();
        upgrades.set_level(UpgradeKind::EssenceGain, 2);
        upgrades.set_level(UpgradeKind::Health, 3);
        upgrades.set_level(UpgradeKind::Damage, 5);
        assert!((upgrades.essence_multiplier() - 1.4).abs() < 1e-6);
        assert!((upgrades.max_health_bonus() - 45.0).abs() < 1e-6);
        assert!((upgrades.damage_multiplier() - 1.5).abs() < 1e-6);
        assert_eq!(upgrades.crit_chance(), 0.0);
    }

    #[test]
    fn costs_grow_and_stop_at_the_cap() {
        assert_eq!(upgrade_cost(UpgradeKind::Health, 0), Some(50));
        assert_eq!(upgrade_cost(UpgradeKind::Health, 1), Some(70));
        assert_eq!(upgrade_cost(UpgradeKind::Health, MAX_UPGRADE_LEVEL), None);
    }
}
