//! Player movement, mana, cooldowns and ability casting.

use std::f32::consts::{FRAC_PI_2, TAU};

use super::*;
use crate::combat::{Suspension, enemies_in_radius, knockback_destination};
use crate::content::{AbilityEffect, ability_def};
use crate::input::ControlState;

const PITCH_SPEED: f32 = 1.2;
const MAX_PITCH: f32 = 0.3;
const MUZZLE_OFFSET: f32 = 0.3;
const HURT_FLASH: Rgba = Rgba::rgb(200, 30, 30);

/// Moves `pos` by `delta`, rejecting each axis whose destination (or the
/// body edge in the direction of travel) is not floor.
pub(super) fn slide(grid: &DungeonGrid, pos: Vec2, delta: Vec2, radius: f32) -> Vec2 {
    let mut next = pos;
    if delta.x != 0.0 {
        let candidate = Vec2::new(next.x + delta.x, next.y);
        let edge = Vec2::new(candidate.x + radius * delta.x.signum(), candidate.y);
        if grid.is_floor_at(candidate) && grid.is_floor_at(edge) {
            next = candidate;
        }
    }
    if delta.y != 0.0 {
        let candidate = Vec2::new(next.x, next.y + delta.y);
        let edge = Vec2::new(candidate.x, candidate.y + radius * delta.y.signum());
        if grid.is_floor_at(candidate) && grid.is_floor_at(edge) {
            next = candidate;
        }
    }
    next
}

impl Game {
    /// Step 2: turn, pitch, walk with wall sliding, regenerate mana.
    pub(super) fn update_player(&mut self, controls: &ControlState, dt: f32) {
        let sensitivity = self.config.look_sensitivity;
        let speed = self.effective_speed();
        let regen = BASE_MANA_REGEN * self.progression.upgrades.mana_regen_multiplier();
        let count = self.state.player.abilities.len();

        let player = &mut self.state.player;
        player.angle = (player.angle + controls.look_x * TURN_SPEED * sensitivity * dt)
            .rem_euclid(TAU);
        player.pitch = (player.pitch + controls.look_y * PITCH_SPEED * dt).clamp(-MAX_PITCH, MAX_PITCH);

        let forward = Vec2::from_angle(player.angle);
        let right = Vec2::from_angle(player.angle + FRAC_PI_2);
        let mut wish = forward * controls.move_y + right * controls.move_x;
        if wish.length() > 1.0 {
            wish = wish.normalized();
        }
        let delta = wish * (speed * dt);
        if delta.is_finite() {
            player.pos = slide(&self.state.grid, player.pos, delta, PLAYER_RADIUS);
        }
        player.restore_mana(regen * dt);

        if count > 0 {
            if controls.next_ability {
                player.selected = (player.selected + 1) % count;
            }
            if controls.previous_ability {
                player.selected = (player.selected + count - 1) % count;
            }
        }
    }

    /// Step 3: cooldowns fall toward zero and never below it.
    pub(super) fn tick_cooldowns(&mut self, dt: f32) {
        for slot in &mut self.state.player.abilities {
            slot.cooldown = (slot.cooldown - dt).max(0.0);
        }
    }

    pub fn select_ability(&mut self, ability: AbilityId) -> Result<(), CastError> {
        let index = self
            .state
            .player
            .abilities
            .iter()
            .position(|slot| slot.id == ability)
            .ok_or(CastError::NotEquipped(ability))?;
        self.state.player.selected = index;
        Ok(())
    }

    pub fn cast_selected(&mut self) -> Result<AbilityId, CastError> {
        let ability = self.state.player.selected_ability().ok_or(CastError::NothingSelected)?;
        self.cast(ability)?;
        Ok(ability)
    }

    /// Spends mana, starts the cooldown and applies the ability's effect.
    pub fn cast(&mut self, ability: AbilityId) -> Result<(), CastError> {
        let def = ability_def(ability);
        let player = &mut self.state.player;
        let mana = player.mana;
        let slot = player.slot_mut(ability).ok_or(CastError::NotEquipped(ability))?;
        if slot.cooldown > 0.0 {
            return Err(CastError::OnCooldown { remaining: slot.cooldown });
        }
        if mana < def.mana_cost {
            return Err(CastError::InsufficientMana { need: def.mana_cost, have: mana });
        }
        slot.cooldown = def.cooldown;
        player.mana -= def.mana_cost;

        match def.effect {
            AbilityEffect::Projectile { speed, lifetime, piercing, status } => {
                let angle = self.state.player.angle;
                let origin = self.state.player.pos;
                let muzzle = origin + Vec2::from_angle(angle) * MUZZLE_OFFSET;
                let pos = if self.state.grid.is_floor_at(muzzle) { muzzle } else { origin };
                self.state.projectiles.push(Projectile {
                    pos,
                    angle,
                    speed,
                    damage: def.base_damage,
                    lifetime,
                    origin: ProjectileOrigin::Player,
                    piercing,
                    elemental: def.elemental,
                    status,
                    color: def.color,
                    alive: true,
                    hits: Vec::new(),
                });
            }
            AbilityEffect::Knockback { radius, force, damage_fraction } => {
                self.cast_shockwave(def.base_damage * damage_fraction, def.elemental, radius, force);
            }
            AbilityEffect::Ward { hits } => {
                self.state.player.ward = Some(hits);
            }
            AbilityEffect::GravityWell { radius, duration, damage_fraction, drain_fraction } => {
                let damage_buff = self.state.player.buffs.is_active(BuffKind::DamageBoost);
                let per_tick =
                    self.stats.scaled_damage(def.base_damage, def.elemental, damage_buff)
                        * damage_fraction;
                let center = self.state.player.pos;
                for id in self.enemy_ids_within(center, radius) {
                    if let Some(enemy) = self.state.enemies.get_mut(id) {
                        enemy.status.suspended =
                            Some(Suspension::new(duration, per_tick, drain_fraction));
                    }
                }
            }
        }
        self.push_log(LogEvent::AbilityCast { ability });
        self.play(SoundCue::Cast(ability));
        Ok(())
    }

    fn cast_shockwave(&mut self, base: f32, elemental: bool, radius: f32, force: f32) {
        let center = self.state.player.pos;
        for id in self.enemy_ids_within(center, radius) {
            if let Some(enemy) = self.state.enemies.get_mut(id) {
                enemy.pos = knockback_destination(&self.state.grid, center, enemy.pos, force);
            }
            self.strike_enemy(id, base, elemental);
        }
        self.state.shake = (self.state.shake + 0.4).min(2.0);
    }

    /// The shared player-damage branch for enemy projectiles and melee:
    /// invincibility ignores the hit, an active ward absorbs it, otherwise
    /// health drops and the screen flashes.
    pub(super) fn damage_player(&mut self, amount: f32) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        let player = &mut self.state.player;
        if player.buffs.is_active(BuffKind::Invincibility) {
            return;
        }
        if let Some(hits) = player.ward {
            let remaining = hits.saturating_sub(1);
            player.ward = (remaining > 0).then_some(remaining);
            self.push_log(LogEvent::WardAbsorbed { remaining });
            self.play(SoundCue::WardBlock);
            return;
        }
        player.health = (player.health - amount).max(0.0);
        self.push_log(LogEvent::PlayerDamaged { amount });
        self.schedule_now(FeedbackEvent::ScreenFlash { color: HURT_FLASH, intensity: 0.6 });
        self.play(SoundCue::PlayerHurt);
    }

    /// Live enemies within `radius`, in slot order.
    pub(super) fn enemy_ids_within(&self, center: Vec2, radius: f32) -> Vec<EnemyId> {
        let (ids, positions): (Vec<EnemyId>, Vec<Vec2>) =
            self.state.enemies.iter().map(|(id, enemy)| (id, enemy.pos)).unzip();
        enemies_in_radius(&positions, center, radius).into_iter().map(|index| ids[index]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    fn forward() -> ControlState {
        ControlState { move_y: 1.0, ..ControlState::default() }
    }

    #[test]
    fn walking_into_a_wall_slides_along_it() {
        let mut game = open_room_game();
        game.state.player.pos = Vec2::new(3.5, 1.5);
        game.state.player.angle = -FRAC_PI_2 + 0.3;
        for _ in 0..60 {
            game.update_player(&forward(), 0.05);
            assert!(game.state.grid.is_floor_at(game.state.player.pos));
        }
        assert!(game.state.player.pos.y >= 1.0 + PLAYER_RADIUS - 1e-4);
        assert!(game.state.player.pos.x > 5.0);
    }

    #[test]
    fn casting_sets_cooldown_and_spends_mana() {
        let mut game = open_room_game();
        assert_eq!(game.cast_selected(), Ok(AbilityId::MagicMissile));
        assert_eq!(game.state.player.mana, 95.0);
        assert_eq!(game.state.projectiles.len(), 1);
        let slot = game.state.player.abilities[0];
        assert_eq!(slot.cooldown, ability_def(AbilityId::MagicMissile).cooldown);
        assert!(matches!(game.cast_selected(), Err(CastError::OnCooldown { .. })));
        assert_eq!(game.cast(AbilityId::Fireball), Err(CastError::NotEquipped(AbilityId::Fireball)));
    }

    #[test]
    fn cooldown_reaches_exactly_zero() {
        let mut game = open_room_game();
        game.cast_selected().unwrap();
        let mut previous = game.state.player.abilities[0].cooldown;
        for _ in 0..10 {
            game.tick_cooldowns(0.05);
            let now = game.state.player.abilities[0].cooldown;
            assert!(now <= previous);
            previous = now;
        }
        assert_eq!(previous, 0.0);
    }

    #[test]
    fn empty_mana_blocks_casts() {
        let mut game = open_room_game();
        game.state.player.mana = 1.0;
        assert!(matches!(game.cast_selected(), Err(CastError::InsufficientMana { .. })));
        assert!(game.state.projectiles.is_empty());
    }

    #[test]
    fn mana_regenerates_up_to_max() {
        let mut game = open_room_game();
        game.state.player.mana = 50.0;
        game.update_player(&idle(), 1.0);
        assert_eq!(game.state.player.mana, 56.0);
        game.update_player(&idle(), 100.0);
        assert_eq!(game.state.player.mana, game.state.player.max_mana);
    }

    #[test]
    fn ability_cycling_wraps() {
        let mut progression = ProgressionSnapshot::default();
        progression.unlock(AbilityId::Ward);
        let mut game = open_room_game_with(progression);
        let next = ControlState { next_ability: true, ..ControlState::default() };
        game.update_player(&next, 0.0);
        assert_eq!(game.state.player.selected_ability(), Some(AbilityId::Ward));
        game.update_player(&next, 0.0);
        assert_eq!(game.state.player.selected_ability(), Some(AbilityId::MagicMissile));
        let previous = ControlState { previous_ability: true, ..ControlState::default() };
        game.update_player(&previous, 0.0);
        assert_eq!(game.state.player.selected_ability(), Some(AbilityId::Ward));
    }

    #[test]
    fn shockwave_pushes_enemies_but_not_into_walls() {
        let mut progression = ProgressionSnapshot::default();
        progression.unlock(AbilityId::Shockwave);
        let mut game = open_room_game_with(progression);
        game.state.player.pos = Vec2::new(5.5, 5.5);
        let open = add_enemy(&mut game, EnemyKind::Ogre, Vec2::new(7.5, 5.5));
        let pinned = add_enemy(&mut game, EnemyKind::Ogre, Vec2::new(5.5, 3.5));
        game.state.grid.set_tile(Cell::new(5, 2), TileKind::SOLID);

        game.cast(AbilityId::Shockwave).unwrap();
        assert_eq!(game.state.enemies[open].pos, Vec2::new(9.0, 5.5));
        assert_eq!(game.state.enemies[pinned].pos, Vec2::new(5.5, 3.5));
        assert!(game.state.enemies[open].health < game.state.enemies[open].max_health);
    }

    #[test]
    fn ward_absorbs_three_hits_then_lets_damage_through() {
        let mut progression = ProgressionSnapshot::default();
        progression.unlock(AbilityId::Ward);
        let mut game = open_room_game_with(progression);
        game.cast(AbilityId::Ward).unwrap();
        let full = game.state.player.health;

        for expected in [2, 1, 0] {
            game.damage_player(10.0);
            assert_eq!(game.state.player.health, full);
            assert_eq!(game.log().last(), Some(&LogEvent::WardAbsorbed { remaining: expected }));
        }
        assert_eq!(game.state.player.ward, None);
        game.damage_player(10.0);
        assert_eq!(game.state.player.health, full - 10.0);
    }

    #[test]
    fn invincibility_ignores_damage_and_keeps_the_ward() {
        let mut game = open_room_game();
        game.state.player.ward = Some(2);
        game.state.player.buffs.grant(BuffKind::Invincibility, 5.0);
        game.damage_player(50.0);
        assert_eq!(game.state.player.health, game.state.player.max_health);
        assert_eq!(game.state.player.ward, Some(2));
    }
}
