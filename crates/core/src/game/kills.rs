//! Damage application and the shared kill path.
//!
//! Every way an enemy can die (projectile, area ability, status effect,
//! ally strike, class effect) ends in `kill_enemy`, so rewards, combo and
//! class effects apply uniformly.

use super::*;
use crate::combat::{DyingEnemy, Nearby, kill_reward, resolve_on_kill};

const ALLY_LIFETIME: f32 = 10.0;
const ALLY_DAMAGE: f32 = 12.0;
const EXPLOSION_RINGS: usize = 3;

/// Whether a kill may trigger class on-kill effects. Kills caused by those
/// effects do not chain further.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum KillSource {
    Direct,
    ClassEffect,
}

impl Game {
    /// A player-attributed hit: upgrade and class scaling, crit roll,
    /// life-steal, then the kill path if it was lethal.
    pub(super) fn strike_enemy(&mut self, id: EnemyId, base: f32, elemental: bool) {
        let damage_buff = self.state.player.buffs.is_active(BuffKind::DamageBoost);
        let hit = self.stats.roll_hit(base, elemental, damage_buff, &mut self.rng);
        let Some(dealt) = self.damage_enemy(id, hit.amount) else {
            return;
        };
        let heal = self.stats.life_steal_heal(dealt);
        self.state.player.heal(heal);
        if let Some(enemy) = self.state.enemies.get(id) {
            let pos = enemy.pos;
            self.schedule_now(FeedbackEvent::HitSpark { pos, crit: hit.crit });
        }
        self.play(if hit.crit { SoundCue::Crit } else { SoundCue::Hit });
        self.kill_if_dead(id, KillSource::Direct);
    }

    /// Subtracts health without scaling. Returns the damage actually taken.
    pub(super) fn damage_enemy(&mut self, id: EnemyId, amount: f32) -> Option<f32> {
        let enemy = self.state.enemies.get_mut(id)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Some(0.0);
        }
        let dealt = amount.min(enemy.health.max(0.0));
        enemy.health -= amount;
        if enemy.state == EnemyState::Idle {
            enemy.state = EnemyState::Chasing;
        }
        Some(dealt)
    }

    pub(super) fn kill_if_dead(&mut self, id: EnemyId, source: KillSource) {
        if self.state.enemies.get(id).is_some_and(Enemy::is_dead) {
            self.kill_enemy(id, source);
        }
    }

    /// Removes the enemy and pays out rewards at the combo multiplier in
    /// effect before this kill.
    pub(super) fn kill_enemy(&mut self, id: EnemyId, source: KillSource) {
        let Some(enemy) = self.state.enemies.remove(id) else {
            return;
        };
        let def = enemy_def(enemy.kind);
        let reward = kill_reward(def, self.state.combo.multiplier(), &self.stats);
        self.state.combo.register_kill();

        let player = &mut self.state.player;
        player.xp = player.xp.saturating_add(reward.xp);
        player.gold = player.gold.saturating_add(reward.gold);
        player.kills = player.kills.saturating_add(1);
        player.essence_earned = player.essence_earned.saturating_add(reward.essence);
        if reward.essence > 0 {
            self.progression.essence = self.progression.essence.saturating_add(reward.essence as u64);
            self.mark_progression_dirty();
        }

        self.push_log(LogEvent::EnemyKilled {
            kind: enemy.kind,
            xp: reward.xp,
            gold: reward.gold,
            essence: reward.essence,
        });
        self.play(SoundCue::Kill);

        if source == KillSource::Direct {
            self.apply_on_kill_effects(&enemy);
        }
    }

    fn apply_on_kill_effects(&mut self, dying: &Enemy) {
        let nearby: Vec<Nearby> =
            self.state.enemies.iter().map(|(id, enemy)| Nearby { id, pos: enemy.pos }).collect();
        let summon_roll = if self.bonuses.summon_chance > 0.0 { self.rng.unit() } else { 1.0 };
        let outcome = resolve_on_kill(
            DyingEnemy { pos: dying.pos, max_health: dying.max_health },
            &nearby,
            &self.bonuses,
            summon_roll,
        );

        self.state.player.heal(outcome.heal);
        if let Some((pos, radius)) = outcome.explosion {
            self.feedback.schedule_cascade(
                self.time,
                EXPLOSION_RINGS,
                FeedbackEvent::Explosion { pos, radius },
            );
        }
        if outcome.summon_ally {
            self.state.allies.push(Ally {
                pos: dying.pos,
                lifetime: ALLY_LIFETIME,
                damage: ALLY_DAMAGE,
                attack_cooldown: 0.0,
            });
            self.push_log(LogEvent::AllySummoned);
        }
        for (id, amount) in outcome.damage {
            self.damage_enemy(id, amount);
        }
        for Nearby { id, .. } in nearby {
            self.kill_if_dead(id, KillSource::ClassEffect);
        }
    }
}
