//! Projectile flight and overlap resolution.

use super::*;

/// Player body radius used for enemy-projectile hits.
const PLAYER_HIT_RADIUS: f32 = 0.5;

impl Game {
    /// Step 4: fixed-angle flight. A projectile whose next position is not
    /// floor, or whose lifetime ran out, dies where it stands.
    pub(super) fn advance_projectiles(&mut self, dt: f32) {
        let grid = &self.state.grid;
        for projectile in self.state.projectiles.iter_mut().filter(|p| p.alive) {
            projectile.lifetime -= dt;
            let next = projectile.pos + Vec2::from_angle(projectile.angle) * (projectile.speed * dt);
            if projectile.lifetime <= 0.0 || !next.is_finite() || !grid.is_floor_at(next) {
                projectile.alive = false;
            } else {
                projectile.pos = next;
            }
        }
    }

    /// Step 5: overlap tests, then dead projectiles are dropped.
    pub(super) fn resolve_projectile_hits(&mut self) {
        let mut projectiles = mem::take(&mut self.state.projectiles);
        for projectile in projectiles.iter_mut().filter(|p| p.alive) {
            match projectile.origin {
                ProjectileOrigin::Enemy => {
                    if projectile.pos.distance(self.state.player.pos) <= PLAYER_HIT_RADIUS {
                        projectile.alive = false;
                        self.damage_player(projectile.damage);
                    }
                }
                ProjectileOrigin::Player => self.resolve_player_projectile(projectile),
            }
        }
        projectiles.retain(|p| p.alive);
        projectiles.append(&mut self.state.projectiles);
        self.state.projectiles = projectiles;
    }

    fn resolve_player_projectile(&mut self, projectile: &mut Projectile) {
        let mut targets: Vec<(f32, EnemyId)> = self
            .state
            .enemies
            .iter()
            .filter(|(id, _)| !projectile.hits.contains(id))
            .map(|(id, enemy)| (enemy.pos.distance(projectile.pos), id, enemy.kind))
            .filter(|&(distance, _, kind)| distance <= Self::enemy_hit_radius(kind))
            .map(|(distance, id, _)| (distance, id))
            .collect();
        if targets.is_empty() {
            return;
        }
        targets.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        if !projectile.piercing {
            targets.truncate(1);
            projectile.alive = false;
        }
        for (_, id) in targets {
            projectile.hits.push(id);
            if let Some(enemy) = self.state.enemies.get_mut(id) {
                enemy.status.apply(projectile.status);
            }
            self.strike_enemy(id, projectile.damage, projectile.elemental);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StatusPayload;
    use crate::game::test_support::*;

    fn bolt(pos: Vec2, origin: ProjectileOrigin) -> Projectile {
        Projectile {
            pos,
            angle: 0.0,
            speed: 10.0,
            damage: 15.0,
            lifetime: 2.0,
            origin,
            piercing: false,
            elemental: false,
            status: StatusPayload::None,
            color: Rgba::rgb(255, 255, 255),
            alive: true,
            hits: Vec::new(),
        }
    }

    #[test]
    fn wall_collision_kills_the_projectile_without_damage() {
        let mut game = open_room_game();
        let target = add_enemy(&mut game, EnemyKind::Ogre, Vec2::new(14.7, 5.5));
        game.state.projectiles.push(bolt(Vec2::new(14.6, 5.5), ProjectileOrigin::Player));

        game.advance_projectiles(0.1);
        assert!(!game.state.projectiles[0].alive);
        game.resolve_projectile_hits();

        assert!(game.state.projectiles.is_empty());
        assert_eq!(game.state.enemies[target].health, game.state.enemies[target].max_health);
        assert_eq!(kill_events(&game), 0);
    }

    #[test]
    fn lifetime_expiry_removes_projectiles() {
        let mut game = open_room_game();
        let mut short = bolt(Vec2::new(4.5, 8.5), ProjectileOrigin::Player);
        short.lifetime = 0.05;
        game.state.projectiles.push(short);
        game.advance_projectiles(0.1);
        game.resolve_projectile_hits();
        assert!(game.state.projectiles.is_empty());
    }

    #[test]
    fn player_projectile_hits_the_nearest_enemy_and_applies_status() {
        let mut game = open_room_game();
        let near = add_enemy(&mut game, EnemyKind::Ogre, Vec2::new(8.6, 8.5));
        let behind = add_enemy(&mut game, EnemyKind::Ogre, Vec2::new(9.0, 8.5));
        let mut frost = bolt(Vec2::new(8.5, 8.5), ProjectileOrigin::Player);
        frost.status = StatusPayload::Freeze { duration: 2.5 };
        game.state.projectiles.push(frost);

        game.resolve_projectile_hits();
        let hit = &game.state.enemies[near];
        assert!(hit.health < hit.max_health);
        assert_eq!(hit.status.frozen, 2.5);
        assert_eq!(game.state.enemies[behind].health, game.state.enemies[behind].max_health);
        assert!(game.state.projectiles.is_empty());
    }

    #[test]
    fn piercing_projectile_hits_each_enemy_once() {
        let mut game = open_room_game();
        let first = add_enemy(&mut game, EnemyKind::Ogre, Vec2::new(8.5, 8.5));
        let mut lance = bolt(Vec2::new(8.5, 8.5), ProjectileOrigin::Player);
        lance.piercing = true;
        game.state.projectiles.push(lance);

        game.resolve_projectile_hits();
        let after_one = game.state.enemies[first].health;
        game.resolve_projectile_hits();
        assert_eq!(game.state.enemies[first].health, after_one);
        assert_eq!(game.state.projectiles.len(), 1);
        assert_eq!(game.state.projectiles[0].hits, vec![first]);
    }

    #[test]
    fn enemy_projectile_damages_the_player() {
        let mut game = open_room_game();
        let pos = game.state.player.pos;
        game.state.projectiles.push(bolt(pos, ProjectileOrigin::Enemy));
        game.resolve_projectile_hits();
        assert_eq!(game.state.player.health, game.state.player.max_health - 15.0);
        assert!(game.state.projectiles.is_empty());
        assert!(game.log().contains(&LogEvent::PlayerDamaged { amount: 15.0 }));
    }
}
