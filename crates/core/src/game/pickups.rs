//! Proximity pickups and chest rewards.

use super::*;
use crate::content::{PickupEffect, pickup_def};
use crate::progression::{HEALTH_PER_LEVEL, MANA_PER_LEVEL, MAX_UPGRADE_LEVEL};
use crate::state::AbilitySlot;

const PICKUP_REACH: f32 = 0.7;
const CHEST_GOLD_MIN: u32 = 10;
const CHEST_GOLD_MAX: u32 = 20;

impl Game {
    /// Step 9a: restores and buffs, each item collected at most once.
    pub(super) fn collect_items(&mut self) {
        let player_pos = self.state.player.pos;
        for index in 0..self.state.items.len() {
            let item = self.state.items[index];
            if item.collected || item.pos.distance(player_pos) > PICKUP_REACH {
                continue;
            }
            self.state.items[index].collected = true;
            let player = &mut self.state.player;
            match pickup_def(item.kind).effect {
                PickupEffect::RestoreHealth(amount) => player.heal(amount),
                PickupEffect::RestoreMana(amount) => player.restore_mana(amount),
                PickupEffect::Buff { kind, duration } => player.buffs.grant(kind, duration),
            }
            self.push_log(LogEvent::PickupCollected { kind: item.kind });
            self.play(SoundCue::Pickup);
        }
    }

    /// Step 9b: each chest opens once. Secret-room chests grant a permanent
    /// upgrade level or an unowned ability; regular chests grant gold.
    pub(super) fn open_chests(&mut self) {
        let player_pos = self.state.player.pos;
        for index in 0..self.state.chests.len() {
            let chest = self.state.chests[index];
            if chest.opened || chest.pos.distance(player_pos) > PICKUP_REACH {
                continue;
            }
            self.state.chests[index].opened = true;
            let reward = if chest.in_secret_room { self.secret_reward() } else { None };
            let reward = reward.unwrap_or_else(|| self.gold_reward());
            self.grant_chest_reward(reward);
            self.push_log(LogEvent::ChestOpened { reward });
            self.play(SoundCue::Chest);
            debug!(?reward, secret = chest.in_secret_room, "chest opened");
        }
    }

    fn gold_reward(&mut self) -> ChestReward {
        let roll = self.rng.range_usize(CHEST_GOLD_MIN as usize, CHEST_GOLD_MAX as usize) as u32;
        ChestReward::Gold(roll.saturating_mul(self.state.depth.max(1)))
    }

    /// Coin flip between an upgrade and an ability. `None` when the chosen
    /// family has nothing left to give.
    fn secret_reward(&mut self) -> Option<ChestReward> {
        if self.rng.chance(0.5) {
            let open: Vec<UpgradeKind> = UpgradeKind::ALL
                .into_iter()
                .filter(|&kind| self.progression.upgrades.level(kind) < MAX_UPGRADE_LEVEL)
                .collect();
            self.rng.pick(&open).copied().map(ChestReward::Upgrade)
        } else {
            let missing: Vec<AbilityId> =
                AbilityId::ALL.into_iter().filter(|&id| !self.progression.owns(id)).collect();
            self.rng.pick(&missing).copied().map(ChestReward::Ability)
        }
    }

    fn grant_chest_reward(&mut self, reward: ChestReward) {
        match reward {
            ChestReward::Gold(amount) => {
                self.state.player.gold = self.state.player.gold.saturating_add(amount);
            }
            ChestReward::Upgrade(kind) => {
                if self.progression.upgrades.increment(kind) {
                    let all_stats = self.bonuses.all_stats_multiplier;
                    let player = &mut self.state.player;
                    match kind {
                        UpgradeKind::Health => {
                            let gain = HEALTH_PER_LEVEL * all_stats;
                            player.max_health += gain;
                            player.heal(gain);
                        }
                        UpgradeKind::Mana => {
                            let gain = MANA_PER_LEVEL * all_stats;
                            player.max_mana += gain;
                            player.restore_mana(gain);
                        }
                        _ => {}
                    }
                    self.refresh_stats();
                    self.mark_progression_dirty();
                }
            }
            ChestReward::Ability(ability) => {
                self.progression.unlock(ability);
                if !self.state.player.has_ability(ability) {
                    self.state.player.abilities.push(AbilitySlot { id: ability, cooldown: 0.0 });
                }
                self.mark_progression_dirty();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn items_apply_once_when_the_player_is_close() {
        let mut game = open_room_game();
        let pos = game.state.player.pos;
        game.state.player.health = 40.0;
        game.state.items.push(Item { kind: PickupKind::HealthPotion, pos, collected: false });
        game.state.items.push(Item {
            kind: PickupKind::SwiftnessTonic,
            pos: Vec2::new(12.5, 12.5),
            collected: false,
        });

        game.collect_items();
        game.collect_items();
        assert_eq!(game.state.player.health, 70.0);
        assert!(game.state.items[0].collected);
        assert!(!game.state.items[1].collected);
        assert!(!game.state.player.buffs.is_active(BuffKind::SpeedBoost));
    }

    #[test]
    fn buff_pickups_start_timers() {
        let mut game = open_room_game();
        let pos = game.state.player.pos;
        game.state.items.push(Item { kind: PickupKind::DamageTonic, pos, collected: false });
        game.collect_items();
        assert_eq!(game.state.player.buffs.remaining(BuffKind::DamageBoost), 10.0);
    }

    #[test]
    fn regular_chests_pay_depth_scaled_gold_once() {
        let mut game = open_room_game();
        let pos = game.state.player.pos;
        game.state.chests.push(Chest { pos, opened: false, in_secret_room: false });
        game.open_chests();
        game.open_chests();

        let gold = game.state.player.gold;
        assert!((CHEST_GOLD_MIN..=CHEST_GOLD_MAX).contains(&gold));
        let opened = game.log().iter().filter(|e| matches!(e, LogEvent::ChestOpened { .. })).count();
        assert_eq!(opened, 1);
    }

    #[test]
    fn secret_chests_grant_permanent_rewards() {
        for seed in 0..8 {
            let mut game = open_room_game();
            game.rng = GameRng::seed_from_u64(seed);
            let pos = game.state.player.pos;
            game.state.chests.push(Chest { pos, opened: false, in_secret_room: true });
            game.open_chests();

            let Some(LogEvent::ChestOpened { reward }) = game.log().last().cloned() else {
                panic!("chest did not open");
            };
            match reward {
                ChestReward::Upgrade(kind) => assert_eq!(game.progression().upgrades.level(kind), 1),
                ChestReward::Ability(id) => {
                    assert!(game.progression().owns(id));
                    assert!(game.state.player.has_ability(id));
                }
                ChestReward::Gold(_) => panic!("secret chest paid gold with rewards available"),
            }
            assert!(game.take_progression_if_dirty().is_some());
        }
    }
}
