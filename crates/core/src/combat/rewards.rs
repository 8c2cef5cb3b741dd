use crate::content::EnemyDef;

use super::damage::CombatStats;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KillReward {
    pub xp: u32,
    pub gold: u32,
    pub essence: u32,
}

/// Rewards for one kill at the combo multiplier in effect before the kill
/// is counted.
pub fn kill_reward(def: &EnemyDef, combo_multiplier: f32, stats: &CombatStats) -> KillReward {
    let combo = combo_multiplier.max(1.0);
    KillReward {
        xp: (def.xp as f32 * combo).floor() as u32,
        gold: (def.gold as f32 * combo * stats.gold_multiplier).floor() as u32,
        essence: (def.essence as f32 * stats.essence_multiplier).floor() as u32,
    }
}
