//! Meta progression that outlives a run: permanent upgrades, essence,
//! prestige and lifetime counters, persisted through a flat key-value store.

mod store;
mod upgrades;

pub use store::{MemoryStore, ProgressionStore};
pub use upgrades::{
    CRIT_PER_LEVEL, DAMAGE_PER_LEVEL, ESSENCE_PER_LEVEL, GOLD_PER_LEVEL, HEALTH_PER_LEVEL,
    LIFE_STEAL_PER_LEVEL, MANA_PER_LEVEL, MAX_UPGRADE_LEVEL, PermanentUpgrades, upgrade_cost,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::content::ability_def;
use crate::types::{AbilityId, PrestigeClassId, UpgradeKind};

pub const PRESTIGE_MIN_DEPTH: u32 = 10;
pub const BOSS_DIFFICULTY_PER_PRESTIGE: f32 = 0.15;

pub const KEY_ESSENCE: &str = "essence";
pub const KEY_PRESTIGE_LEVEL: &str = "prestige_level";
pub const KEY_ACTIVE_CLASS: &str = "active_class";
pub const KEY_UNLOCKED_ABILITIES: &str = "unlocked_abilities";
pub const KEY_TOTAL_RUNS: &str = "total_runs";
pub const KEY_TOTAL_KILLS: &str = "total_kills";
pub const KEY_TOTAL_GOLD: &str = "total_gold";
pub const KEY_DEEPEST_LEVEL: &str = "deepest_level";

pub fn upgrade_key(kind: UpgradeKind) -> String {
    format!("upgrade.{}", kind.name())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("unknown upgrade `{0}`")]
    UnknownUpgrade(String),
    #[error("{0:?} is already at the maximum level")]
    MaxLevel(UpgradeKind),
    #[error("need {need} essence, have {have}")]
    InsufficientEssence { need: u64, have: u64 },
    #[error("prestige requires reaching depth {required}, deepest so far is {deepest}")]
    PrestigeLocked { deepest: u32, required: u32 },
    #[error("{0:?} is already unlocked")]
    AbilityOwned(AbilityId),
}

pub fn parse_upgrade(name: &str) -> Result<UpgradeKind, ProgressionError> {
    UpgradeKind::from_name(name).ok_or_else(|| ProgressionError::UnknownUpgrade(name.to_string()))
}

/// Typed view of everything the store holds. Read once at run start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionSnapshot {
    pub upgrades: PermanentUpgrades,
    pub essence: u64,
    pub prestige_level: u32,
    pub active_class: Option<PrestigeClassId>,
    pub unlocked_abilities: i64,
    pub total_runs: u64,
    pub total_kills: u64,
    pub total_gold: u64,
    pub deepest_level: u32,
}

impl Default for ProgressionSnapshot {
    fn default() -> Self {
        Self {
            upgrades: PermanentUpgrades::default(),
            essence: 0,
            prestige_level: 0,
            active_class: None,
            unlocked_abilities: starter_mask(),
            total_runs: 0,
            total_kills: 0,
            total_gold: 0,
            deepest_level: 0,
        }
    }
}

fn starter_mask() -> i64 {
    AbilityId::ALL
        .into_iter()
        .filter(|&id| ability_def(id).unlock_price == 0)
        .fold(0, |mask, id| mask | id.bit())
}

fn non_negative(value: i64) -> u64 {
    value.max(0) as u64
}

impl ProgressionSnapshot {
    pub fn load(store: &dyn ProgressionStore) -> Self {
        let mut upgrades = PermanentUpgrades::default();
        for kind in UpgradeKind::ALL {
            let level = non_negative(store.get(&upgrade_key(kind))).min(u32::MAX as u64) as u32;
            upgrades.set_level(kind, level);
        }
        Self {
            upgrades,
            essence: non_negative(store.get(KEY_ESSENCE)),
            prestige_level: non_negative(store.get(KEY_PRESTIGE_LEVEL)).min(u32::MAX as u64)
                as u32,
            active_class: PrestigeClassId::from_code(store.get(KEY_ACTIVE_CLASS)),
            unlocked_abilities: store.get(KEY_UNLOCKED_ABILITIES) | starter_mask(),
            total_runs: non_negative(store.get(KEY_TOTAL_RUNS)),
            total_kills: non_negative(store.get(KEY_TOTAL_KILLS)),
            total_gold: non_negative(store.get(KEY_TOTAL_GOLD)),
            deepest_level: non_negative(store.get(KEY_DEEPEST_LEVEL)).min(u32::MAX as u64)
                as u32,
        }
    }

    pub fn write(&self, store: &mut dyn ProgressionStore) {
        for kind in UpgradeKind::ALL {
            store.set(&upgrade_key(kind), self.upgrades.level(kind) as i64);
        }
        let clamp = |value: u64| value.min(i64::MAX as u64) as i64;
        store.set(KEY_ESSENCE, clamp(self.essence));
        store.set(KEY_PRESTIGE_LEVEL, self.prestige_level as i64);
        store.set(KEY_ACTIVE_CLASS, self.active_class.map_or(0, PrestigeClassId::code));
        store.set(KEY_UNLOCKED_ABILITIES, self.unlocked_abilities);
        store.set(KEY_TOTAL_RUNS, clamp(self.total_runs));
        store.set(KEY_TOTAL_KILLS, clamp(self.total_kills));
        store.set(KEY_TOTAL_GOLD, clamp(self.total_gold));
        store.set(KEY_DEEPEST_LEVEL, self.deepest_level as i64);
    }

    pub fn owns(&self, ability: AbilityId) -> bool {
        self.unlocked_abilities & ability.bit() != 0
    }

    /// Owned abilities in catalog order.
    pub fn owned_abilities(&self) -> Vec<AbilityId> {
        AbilityId::ALL.into_iter().filter(|&id| self.owns(id)).collect()
    }

    pub fn unlock(&mut self, ability: AbilityId) {
        self.unlocked_abilities |= ability.bit();
    }

    pub fn boss_difficulty(&self) -> f32 {
        1.0 + BOSS_DIFFICULTY_PER_PRESTIGE * self.prestige_level as f32
    }

    fn spend(&mut self, cost: u64) -> Result<(), ProgressionError> {
        if self.essence < cost {
            return Err(ProgressionError::InsufficientEssence { need: cost, have: self.essence });
        }
        self.essence -= cost;
        Ok(())
    }

    /// Buys the next level of `kind`. Returns the essence spent.
    pub fn purchase_upgrade(&mut self, kind: UpgradeKind) -> Result<u64, ProgressionError> {
        let level = self.upgrades.level(kind);
        let cost = upgrade_cost(kind, level).ok_or(ProgressionError::MaxLevel(kind))?;
        self.spend(cost)?;
        self.upgrades.increment(kind);
        debug!(?kind, level = level + 1, cost, "upgrade purchased");
        Ok(cost)
    }

    pub fn purchase_ability(&mut self, ability: AbilityId) -> Result<u64, ProgressionError> {
        if self.owns(ability) {
            return Err(ProgressionError::AbilityOwned(ability));
        }
        let cost = ability_def(ability).unlock_price as u64;
        self.spend(cost)?;
        self.unlock(ability);
        debug!(?ability, cost, "ability purchased");
        Ok(cost)
    }

    pub fn can_prestige(&self) -> bool {
        self.deepest_level >= PRESTIGE_MIN_DEPTH
    }

    /// Resets upgrade levels and the depth record in exchange for a class.
    pub fn prestige(&mut self, class: PrestigeClassId) -> Result<(), ProgressionError> {
        if !self.can_prestige() {
            return Err(ProgressionError::PrestigeLocked {
                deepest: self.deepest_level,
                required: PRESTIGE_MIN_DEPTH,
            });
        }
        self.upgrades = PermanentUpgrades::default();
        self.prestige_level += 1;
        self.active_class = Some(class);
        self.deepest_level = 0;
        debug!(?class, prestige_level = self.prestige_level, "prestige");
        Ok(())
    }

    /// Folds one finished run into the lifetime counters.
    pub fn record_run(&mut self, kills: u64, gold: u64, depth: u32) {
        self.total_runs += 1;
        self.total_kills += kills;
        self.total_gold += gold;
        self.deepest_level = self.deepest_level.max(depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_defaults_with_starter_ability() {
        let snapshot = ProgressionSnapshot::load(&MemoryStore::new());
        assert_eq!(snapshot, ProgressionSnapshot::default());
        assert_eq!(snapshot.owned_abilities(), vec![AbilityId::MagicMissile]);
    }

    #[test]
    fn snapshot_survives_a_store_round_trip() {
        let mut snapshot = ProgressionSnapshot {
            essence: 420,
            prestige_level: 2,
            active_class: Some(PrestigeClassId::Stormcaller),
            total_runs: 7,
            total_kills: 300,
            total_gold: 1_234,
            deepest_level: 12,
            ..ProgressionSnapshot::default()
        };
        snapshot.upgrades.set_level(UpgradeKind::LifeSteal, 4);
        snapshot.unlock(AbilityId::Ward);

        let mut store = MemoryStore::new();
        snapshot.write(&mut store);
        assert_eq!(store.get("upgrade.life_steal"), 4);
        assert_eq!(store.get(KEY_ACTIVE_CLASS), PrestigeClassId::Stormcaller.code());
        assert_eq!(ProgressionSnapshot::load(&store), snapshot);
    }

    #[test]
    fn negative_store_values_read_as_zero() {
        let mut store = MemoryStore::new();
        store.set(KEY_ESSENCE, -50);
        store.set("upgrade.damage", -3);
        let snapshot = ProgressionSnapshot::load(&store);
        assert_eq!(snapshot.essence, 0);
        assert_eq!(snapshot.upgrades.level(UpgradeKind::Damage), 0);
    }

    #[test]
    fn purchase_spends_essence_and_raises_level() {
        let mut snapshot = ProgressionSnapshot { essence: 100, ..ProgressionSnapshot::default() };
        assert_eq!(snapshot.purchase_upgrade(UpgradeKind::Health), Ok(50));
        assert_eq!(snapshot.essence, 50);
        assert_eq!(snapshot.upgrades.level(UpgradeKind::Health), 1);
        assert_eq!(
            snapshot.purchase_upgrade(UpgradeKind::Health),
            Err(ProgressionError::InsufficientEssence { need: 70, have: 50 })
        );
    }

    #[test]
    fn unknown_upgrade_names_are_rejected() {
        assert_eq!(parse_upgrade("gold_gain"), Ok(UpgradeKind::GoldGain));
        assert_eq!(
            parse_upgrade("luck"),
            Err(ProgressionError::UnknownUpgrade("luck".to_string()))
        );
    }

    #[test]
    fn ability_purchase_rejects_owned_abilities() {
        let mut snapshot = ProgressionSnapshot { essence: 1_000, ..ProgressionSnapshot::default() };
        assert_eq!(
            snapshot.purchase_ability(AbilityId::MagicMissile),
            Err(ProgressionError::AbilityOwned(AbilityId::MagicMissile))
        );
        assert_eq!(snapshot.purchase_ability(AbilityId::Fireball), Ok(150));
        assert!(snapshot.owns(AbilityId::Fireball));
    }

    #[test]
    fn prestige_requires_depth_and_resets_upgrades() {
        let mut snapshot = ProgressionSnapshot::default();
        snapshot.upgrades.set_level(UpgradeKind::Damage, 5);
        assert!(matches!(
            snapshot.prestige(PrestigeClassId::Paladin),
            Err(ProgressionError::PrestigeLocked { .. })
        ));

        snapshot.record_run(10, 50, 10);
        assert!(snapshot.can_prestige());
        snapshot.prestige(PrestigeClassId::Paladin).unwrap();
        assert_eq!(snapshot.upgrades, PermanentUpgrades::default());
        assert_eq!(snapshot.prestige_level, 1);
        assert_eq!(snapshot.active_class, Some(PrestigeClassId::Paladin));
        assert!(!snapshot.can_prestige());
        assert!((snapshot.boss_difficulty() - 1.15).abs() < 1e-6);
    }
}
