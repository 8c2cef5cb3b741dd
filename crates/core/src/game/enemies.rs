//! Enemy state machine, movement and attacks, plus the boss summon.

use std::f32::consts::TAU;

use super::player::slide;
use super::status::FREEZE_SLOW;
use super::*;
use crate::content::{Behavior, StatusPayload, regular_pool};
use crate::mapgen::depth_scale;

/// Chasing enemies give up beyond this multiple of their detection radius.
const LEASH: f32 = 1.5;
const STANDOFF_SLACK: f32 = 0.5;
const BODY_RADIUS: f32 = 0.2;
const SUMMON_WAVE: usize = 4;
const SUMMON_THRESHOLD: f32 = 0.5;
const SUMMON_RINGS: [f32; 3] = [1.5, 1.0, 0.5];
const ENEMY_PROJECTILE_LIFETIME_SLACK: f32 = 0.5;

/// Offset that moves `from` up to `step` toward `to` without overshooting.
fn toward(from: Vec2, to: Vec2, step: f32) -> Vec2 {
    let offset = to - from;
    let length = offset.length();
    if length <= f32::EPSILON || !length.is_finite() {
        return Vec2::ZERO;
    }
    offset * (step.min(length) / length)
}

impl Game {
    /// Step 7: status effects, then AI. Enemies hold still while a boss
    /// intro plays.
    pub(super) fn update_enemies(&mut self, dt: f32) {
        let ids: Vec<EnemyId> = self.state.enemies.keys().collect();
        let intro = self.state.boss_intro > 0.0;
        for id in ids {
            if !self.tick_status(id, dt) || intro {
                continue;
            }
            self.think(id, dt);
            self.check_boss_summon(id);
        }
    }

    fn think(&mut self, id: EnemyId, dt: f32) {
        let target = self.state.player.pos;
        let Some(enemy) = self.state.enemies.get_mut(id) else {
            return;
        };
        let def = enemy_def(enemy.kind);
        let distance = enemy.pos.distance(target);
        enemy.attack_cooldown = (enemy.attack_cooldown - dt).max(0.0);
        match enemy.state {
            EnemyState::Idle if distance <= def.detection_radius => {
                enemy.state = EnemyState::Chasing;
            }
            EnemyState::Chasing | EnemyState::Attacking
                if distance > def.detection_radius * LEASH =>
            {
                enemy.state = EnemyState::Idle;
            }
            _ => {}
        }
        if enemy.state == EnemyState::Idle || enemy.status.is_suspended() {
            return;
        }

        enemy.angle = enemy.pos.angle_to(target);
        let slow = if enemy.status.frozen > 0.0 { FREEZE_SLOW } else { 1.0 };
        let step = enemy.speed * slow * dt;
        let in_range = distance <= def.attack_range;
        let clear_shot = match def.behavior {
            Behavior::Melee => true,
            Behavior::Ranged { .. } => self.state.grid.has_line_of_sight(enemy.pos, target),
        };
        let attacks = in_range && enemy.attack_cooldown <= 0.0 && clear_shot;
        enemy.state = if in_range { EnemyState::Attacking } else { EnemyState::Chasing };
        if attacks {
            enemy.attack_cooldown = def.attack_cooldown;
        }
        let (pos, angle, damage) = (enemy.pos, enemy.angle, enemy.damage);

        match def.behavior {
            Behavior::Melee => {
                if attacks {
                    self.damage_player(damage);
                } else if !in_range {
                    self.advance_enemy(id, step);
                }
            }
            Behavior::Ranged { standoff, projectile_speed } => {
                if distance < standoff - STANDOFF_SLACK {
                    let away = (pos - target).normalized() * step;
                    self.move_enemy(id, away);
                } else if distance > standoff + STANDOFF_SLACK {
                    self.advance_enemy(id, step);
                }
                if attacks {
                    self.state.projectiles.push(Projectile {
                        pos,
                        angle,
                        speed: projectile_speed,
                        damage,
                        lifetime: def.attack_range / projectile_speed
                            + ENEMY_PROJECTILE_LIFETIME_SLACK,
                        origin: ProjectileOrigin::Enemy,
                        piercing: false,
                        elemental: false,
                        status: StatusPayload::None,
                        color: def.color,
                        alive: true,
                        hits: Vec::new(),
                    });
                }
            }
        }
    }

    /// One distance-field step toward the player, or a straight line when
    /// the field offers no step or the step is blocked.
    fn advance_enemy(&mut self, id: EnemyId, step: f32) {
        let target = self.state.player.pos;
        let Some(enemy) = self.state.enemies.get_mut(id) else {
            return;
        };
        let grid = &self.state.grid;
        let start = enemy.pos;
        let stepped = match self.path_field.best_step(start.cell()) {
            Some(cell) => slide(grid, start, toward(start, cell.center(), step), BODY_RADIUS),
            None => start,
        };
        enemy.pos = if stepped == start {
            slide(grid, start, toward(start, target, step), BODY_RADIUS)
        } else {
            stepped
        };
    }

    fn move_enemy(&mut self, id: EnemyId, delta: Vec2) {
        if let Some(enemy) = self.state.enemies.get_mut(id)
            && delta.is_finite()
        {
            enemy.pos = slide(&self.state.grid, enemy.pos, delta, BODY_RADIUS);
        }
    }

    /// Bosses call a wave of minions the first time they drop to half health.
    fn check_boss_summon(&mut self, id: EnemyId) {
        let Some(boss) = self.state.enemies.get_mut(id) else {
            return;
        };
        if !boss.boss || boss.summoned || boss.health > boss.max_health * SUMMON_THRESHOLD {
            return;
        }
        boss.summoned = true;
        let center = boss.pos;
        let depth = self.state.depth;
        let scale = depth_scale(depth);
        let pool = regular_pool(depth);

        let mut count = 0;
        for index in 0..SUMMON_WAVE {
            let Some(&kind) = self.rng.pick(pool) else {
                break;
            };
            let angle = index as f32 * TAU / SUMMON_WAVE as f32;
            let pos = SUMMON_RINGS
                .iter()
                .map(|&ring| center + Vec2::from_angle(angle) * ring)
                .find(|&pos| self.state.grid.is_floor_at(pos))
                .unwrap_or(center);
            let mut minion = Enemy::spawn(kind, pos, scale);
            minion.state = EnemyState::Chasing;
            self.state.enemies.insert(minion);
            count += 1;
        }
        self.push_log(LogEvent::BossSummoned { count });
        self.play(SoundCue::BossRoar);
        info!(depth, count, "boss summoned minions");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Suspension;
    use crate::game::test_support::*;

    #[test]
    fn enemies_notice_the_player_inside_their_detection_radius() {
        let mut game = open_room_game();
        let near = add_enemy(&mut game, EnemyKind::Rat, Vec2::new(8.5, 3.5));
        let far = add_enemy(&mut game, EnemyKind::Rat, Vec2::new(13.5, 13.5));
        game.update_enemies(0.016);
        assert_eq!(game.state.enemies[near].state, EnemyState::Chasing);
        assert_eq!(game.state.enemies[far].state, EnemyState::Idle);
    }

    #[test]
    fn melee_enemies_close_in_and_attack_on_cooldown() {
        let mut game = open_room_game();
        let id = add_enemy(&mut game, EnemyKind::Skeleton, Vec2::new(7.5, 3.5));
        let start = game.state.enemies[id].pos.distance(game.state.player.pos);
        for _ in 0..10 {
            game.path_field.recompute(&game.state.grid, game.state.player.cell());
            game.update_enemies(0.1);
        }
        let now = game.state.enemies[id].pos.distance(game.state.player.pos);
        assert!(now < start);

        game.state.enemies[id].pos = Vec2::new(4.2, 3.5);
        game.update_enemies(0.1);
        assert_eq!(game.state.enemies[id].state, EnemyState::Attacking);
        assert_eq!(game.state.player.health, game.state.player.max_health - 8.0);
        game.update_enemies(0.1);
        assert_eq!(game.state.player.health, game.state.player.max_health - 8.0);
    }

    #[test]
    fn frozen_enemies_move_slower() {
        let mut plain = open_room_game();
        let mut chilled = open_room_game();
        let a = add_enemy(&mut plain, EnemyKind::Rat, Vec2::new(9.5, 3.5));
        let b = add_enemy(&mut chilled, EnemyKind::Rat, Vec2::new(9.5, 3.5));
        chilled.state.enemies[b].status.frozen = 5.0;
        for game in [&mut plain, &mut chilled] {
            game.path_field.recompute(&game.state.grid, game.state.player.cell());
            game.update_enemies(0.25);
        }
        let moved_plain = 9.5 - plain.state.enemies[a].pos.x;
        let moved_chilled = 9.5 - chilled.state.enemies[b].pos.x;
        assert!((moved_chilled - moved_plain * FREEZE_SLOW).abs() < 1e-4);
    }

    #[test]
    fn suspended_enemies_do_not_move() {
        let mut game = open_room_game();
        let id = add_enemy(&mut game, EnemyKind::Rat, Vec2::new(9.5, 3.5));
        game.state.enemies[id].status.suspended =
            Some(Suspension::new(3.0, 0.0, 0.0));
        game.update_enemies(0.5);
        assert_eq!(game.state.enemies[id].pos, Vec2::new(9.5, 3.5));
    }

    #[test]
    fn ranged_enemies_fire_with_line_of_sight() {
        let mut game = open_room_game();
        let id = add_enemy(&mut game, EnemyKind::SkeletonArcher, Vec2::new(8.0, 3.5));
        game.update_enemies(0.016);
        assert_eq!(game.state.projectiles.len(), 1);
        assert_eq!(game.state.projectiles[0].origin, ProjectileOrigin::Enemy);
        // 4.5 away sits inside the standoff band, so no movement.
        assert_eq!(game.state.enemies[id].pos, Vec2::new(8.0, 3.5));
    }

    #[test]
    fn ranged_enemies_back_away_when_crowded() {
        let mut game = open_room_game();
        let id = add_enemy(&mut game, EnemyKind::SkeletonArcher, Vec2::new(5.5, 3.5));
        game.update_enemies(0.1);
        assert!(game.state.enemies[id].pos.x > 5.5);
    }

    #[test]
    fn bosses_summon_once_at_half_health() {
        let mut game = open_room_game();
        game.state.depth = 5;
        let boss = add_enemy(&mut game, EnemyKind::DemonLord, Vec2::new(10.5, 10.5));
        game.update_enemies(0.016);
        assert_eq!(game.state.enemies.len(), 1);

        let max = game.state.enemies[boss].max_health;
        game.state.enemies[boss].health = max * 0.5;
        game.update_enemies(0.016);
        assert_eq!(game.state.enemies.len(), 1 + SUMMON_WAVE);
        assert!(game.log().contains(&LogEvent::BossSummoned { count: SUMMON_WAVE }));
        for enemy in game.state.enemies.values() {
            assert!(game.state.grid.is_floor_at(enemy.pos));
        }

        game.update_enemies(0.016);
        assert_eq!(game.state.enemies.len(), 1 + SUMMON_WAVE);
    }

    #[test]
    fn boss_intro_freezes_the_ai() {
        let mut game = open_room_game();
        let id = add_enemy(&mut game, EnemyKind::Rat, Vec2::new(5.5, 3.5));
        game.state.boss_intro = 2.0;
        game.update_enemies(0.1);
        assert_eq!(game.state.enemies[id].state, EnemyState::Idle);
        assert_eq!(game.state.player.health, game.state.player.max_health);
    }
}
