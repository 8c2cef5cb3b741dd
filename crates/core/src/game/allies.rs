//! Summoned allies: walk to the nearest enemy and strike in melee range.

use super::kills::KillSource;
use super::player::slide;
use super::*;

const ALLY_SPEED: f32 = 2.5;
const ALLY_REACH: f32 = 0.8;
const ALLY_ATTACK_COOLDOWN: f32 = 1.0;
const ALLY_RADIUS: f32 = 0.2;

impl Game {
    pub(super) fn update_allies(&mut self, dt: f32) {
        let mut allies = mem::take(&mut self.state.allies);
        for ally in &mut allies {
            ally.lifetime -= dt;
            ally.attack_cooldown = (ally.attack_cooldown - dt).max(0.0);
            if ally.lifetime <= 0.0 {
                continue;
            }
            let nearest = self
                .state
                .enemies
                .iter()
                .map(|(id, enemy)| (enemy.pos.distance(ally.pos), id, enemy.pos))
                .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            let Some((distance, id, target)) = nearest else {
                continue;
            };
            if distance <= ALLY_REACH {
                if ally.attack_cooldown <= 0.0 {
                    ally.attack_cooldown = ALLY_ATTACK_COOLDOWN;
                    self.damage_enemy(id, ally.damage);
                    self.kill_if_dead(id, KillSource::Direct);
                }
            } else {
                let delta = (target - ally.pos).normalized() * (ALLY_SPEED * dt).min(distance);
                ally.pos = slide(&self.state.grid, ally.pos, delta, ALLY_RADIUS);
            }
        }
        allies.retain(|ally| ally.lifetime > 0.0);
        allies.append(&mut self.state.allies);
        self.state.allies = allies;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    fn ally(pos: Vec2) -> Ally {
        Ally { pos, lifetime: 10.0, damage: 12.0, attack_cooldown: 0.0 }
    }

    #[test]
    fn allies_walk_to_and_strike_the_nearest_enemy() {
        let mut game = open_room_game();
        let near = add_enemy(&mut game, EnemyKind::Rat, Vec2::new(8.5, 8.5));
        let far = add_enemy(&mut game, EnemyKind::Rat, Vec2::new(13.5, 13.5));
        game.state.allies.push(ally(Vec2::new(6.5, 8.5)));

        game.update_allies(0.5);
        assert!(game.state.allies[0].pos.x > 6.5);
        game.update_allies(0.5);
        assert_eq!(game.state.enemies[near].health, 8.0);
        assert_eq!(game.state.enemies[far].health, game.state.enemies[far].max_health);
    }

    #[test]
    fn ally_kills_use_the_kill_path() {
        let mut game = open_room_game();
        let id = add_enemy(&mut game, EnemyKind::Rat, Vec2::new(8.5, 8.5));
        game.state.enemies[id].health = 5.0;
        game.state.allies.push(ally(Vec2::new(8.0, 8.5)));
        game.update_allies(0.1);
        assert!(game.state.enemies.is_empty());
        assert_eq!(kill_events(&game), 1);
        assert_eq!(game.state.player.kills, 1);
    }

    #[test]
    fn allies_expire() {
        let mut game = open_room_game();
        let mut short = ally(Vec2::new(8.5, 8.5));
        short.lifetime = 0.2;
        game.state.allies.push(short);
        game.update_allies(0.25);
        assert!(game.state.allies.is_empty());
    }
}
