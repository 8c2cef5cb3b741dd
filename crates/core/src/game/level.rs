//! Level installation, descending, and character level-ups.

use super::*;
use crate::mapgen::{GeneratedLevel, LevelGenerator};

const BOSS_INTRO_SECONDS: f32 = 3.0;
const XP_GROWTH: f32 = 1.5;
const LEVEL_UP_POOL_GROWTH: f32 = 1.1;

impl Game {
    pub(super) fn install_level(&mut self, depth: u32) {
        let generator = LevelGenerator::new(
            self.seed,
            self.config.grid_size,
            self.progression.boss_difficulty(),
        );
        let level = generator.generate(depth);
        self.install_generated(level);
    }

    pub(super) fn install_generated(&mut self, level: GeneratedLevel) {
        let state = &mut self.state;
        state.depth = level.depth;
        state.boss_level = level.is_boss_level;
        state.spawn_cell = level.spawn_cell;
        state.player.pos = level.spawn_cell.center();
        state.player.angle = 0.0;
        state.player.pitch = 0.0;
        state.player.ward = None;
        state.player.buffs = Buffs::default();
        for slot in &mut state.player.abilities {
            slot.cooldown = 0.0;
        }

        state.enemies.clear();
        for spawn in &level.enemy_spawns {
            state.enemies.insert(Enemy::spawn(spawn.kind, spawn.cell.center(), spawn.scale));
        }
        state.items = level
            .item_spawns
            .iter()
            .map(|spawn| Item { kind: spawn.kind, pos: spawn.cell.center(), collected: false })
            .collect();
        state.chests = level
            .chest_spawns
            .iter()
            .map(|spawn| Chest {
                pos: spawn.cell.center(),
                opened: false,
                in_secret_room: spawn.in_secret_room,
            })
            .collect();
        state.projectiles.clear();
        state.allies.clear();
        state.combo.reset();
        state.level_time = 0.0;
        state.shake = 0.0;
        state.flash = 0.0;
        state.grid = level.grid;
        state.boss_intro = if level.is_boss_level { BOSS_INTRO_SECONDS } else { 0.0 };

        self.path_field.recompute(&self.state.grid, self.state.player.cell());
        self.feedback.clear();
        self.outcome = None;

        if level.is_boss_level
            && let Some(boss) = self.state.enemies.values().find(|enemy| enemy.boss)
        {
            let kind = boss.kind;
            self.schedule_now(FeedbackEvent::BossIntro { kind });
            self.play(SoundCue::BossRoar);
        }
        self.push_log(LogEvent::LevelStarted {
            depth: level.depth,
            boss_level: level.is_boss_level,
        });
        info!(
            depth = level.depth,
            boss_level = level.is_boss_level,
            enemies = self.state.enemies.len(),
            "level installed"
        );
    }

    /// Generates the next level after a clear, keeping pools, level, gold
    /// and abilities. Returns the new depth, or `None` if the current level
    /// is not cleared.
    pub fn descend(&mut self) -> Option<u32> {
        if self.outcome != Some(RunOutcome::LevelCleared) {
            return None;
        }
        let next = self.state.depth.saturating_add(1);
        self.install_level(next);
        Some(next)
    }

    /// Step 10: converts banked XP into levels.
    pub(super) fn apply_level_ups(&mut self) {
        while self.state.player.xp >= self.state.player.xp_to_next {
            let player = &mut self.state.player;
            player.xp -= player.xp_to_next;
            player.xp_to_next = ((player.xp_to_next as f32 * XP_GROWTH).floor() as u32).max(1);
            player.level += 1;

            let health_gain = player.max_health * (LEVEL_UP_POOL_GROWTH - 1.0);
            let mana_gain = player.max_mana * (LEVEL_UP_POOL_GROWTH - 1.0);
            player.max_health += health_gain;
            player.max_mana += mana_gain;
            player.heal(health_gain);
            player.restore_mana(mana_gain);

            let level = player.level;
            self.push_log(LogEvent::LevelUp { level });
            self.schedule_now(FeedbackEvent::LevelUp { level });
            self.play(SoundCue::LevelUp);
            debug!(level, "player leveled up");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn level_up_grows_pools_and_threshold() {
        let mut game = open_room_game();
        game.state.player.health = 50.0;
        game.state.player.xp = 250;
        game.apply_level_ups();

        let player = &game.state.player;
        assert_eq!(player.level, 3);
        assert_eq!(player.xp, 0);
        assert_eq!(player.xp_to_next, 225);
        assert!((player.max_health - 121.0).abs() < 1e-3);
        assert!((player.health - 71.0).abs() < 1e-3);
        assert_eq!(
            game.log().iter().filter(|e| matches!(e, LogEvent::LevelUp { .. })).count(),
            2
        );
    }

    #[test]
    fn descend_requires_a_cleared_level() {
        let mut game = new_game(5);
        assert_eq!(game.descend(), None);

        game.state.player.gold = 40;
        game.state.player.level = 3;
        game.outcome = Some(RunOutcome::LevelCleared);
        assert_eq!(game.descend(), Some(2));
        assert_eq!(game.state.depth, 2);
        assert_eq!(game.state.player.gold, 40);
        assert_eq!(game.state.player.level, 3);
        assert_eq!(game.outcome(), None);
        assert_eq!(game.state.player.pos, game.state.spawn_cell.center());
    }

    #[test]
    fn boss_levels_start_the_intro_timer() {
        let game = game_at_depth(9, 5);
        assert!(game.state.boss_level);
        assert_eq!(game.state.boss_intro, BOSS_INTRO_SECONDS);
        assert_eq!(game.state.enemies.values().filter(|enemy| enemy.boss).count(), 1);
    }
}
