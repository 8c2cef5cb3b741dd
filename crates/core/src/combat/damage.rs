use crate::content::{ClassBonuses, DAMAGE_BUFF_MULTIPLIER};
use crate::progression::PermanentUpgrades;
use crate::rng::GameRng;

pub const CRIT_MULTIPLIER: f32 = 2.0;

/// Run-wide combat scalars derived from permanent upgrades and the active
/// class. Rebuilt whenever either changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombatStats {
    pub damage_multiplier: f32,
    pub elemental_multiplier: f32,
    pub crit_chance: f32,
    pub life_steal: f32,
    pub gold_multiplier: f32,
    pub essence_multiplier: f32,
    pub heal_on_kill: f32,
}

/// One resolved hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub amount: f32,
    pub crit: bool,
}

impl CombatStats {
    pub fn derive(upgrades: &PermanentUpgrades, bonuses: &ClassBonuses) -> Self {
        Self {
            damage_multiplier: upgrades.damage_multiplier()
                * bonuses.damage_multiplier
                * bonuses.all_stats_multiplier,
            elemental_multiplier: bonuses.elemental_multiplier,
            crit_chance: bonuses.crit_chance.unwrap_or_else(|| upgrades.crit_chance()),
            life_steal: bonuses.life_steal.unwrap_or_else(|| upgrades.life_steal_fraction()),
            gold_multiplier: upgrades.gold_multiplier(),
            essence_multiplier: upgrades.essence_multiplier(),
            heal_on_kill: bonuses.heal_on_kill,
        }
    }

    /// Damage before the crit roll.
    pub fn scaled_damage(&self, base: f32, elemental: bool, damage_buff: bool) -> f32 {
        let mut damage = base.max(0.0) * self.damage_multiplier;
        if elemental {
            damage *= self.elemental_multiplier;
        }
        if damage_buff {
            damage *= DAMAGE_BUFF_MULTIPLIER;
        }
        damage
    }

    pub fn roll_hit(
        &self,
        base: f32,
        elemental: bool,
        damage_buff: bool,
        rng: &mut GameRng,
    ) -> Hit {
        let amount = self.scaled_damage(base, elemental, damage_buff);
        if rng.chance(self.crit_chance) {
            Hit { amount: amount * CRIT_MULTIPLIER, crit: true }
        } else {
            Hit { amount, crit: false }
        }
    }

    /// Health restored for damage actually dealt.
    pub fn life_steal_heal(&self, dealt: f32) -> f32 {
        (dealt.max(0.0) * self.life_steal).max(0.0)
    }
}
