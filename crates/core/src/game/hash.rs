//! Stable snapshot hashing for deterministic verification.
//! Floats are hashed by bit pattern; presentation-only state (shake, flash,
//! pending feedback) is left out.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

fn write_vec2(hasher: &mut Xxh3, value: Vec2) {
    hasher.write_u32(value.x.to_bits());
    hasher.write_u32(value.y.to_bits());
}

fn write_f32(hasher: &mut Xxh3, value: f32) {
    hasher.write_u32(value.to_bits());
}

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u32(self.state.depth);
        hasher.write_u8(u8::from(self.state.boss_level));
        hasher.write_u8(match self.outcome {
            None => 0,
            Some(RunOutcome::Death) => 1,
            Some(RunOutcome::LevelCleared) => 2,
        });
        hasher.write(&self.state.grid.canonical_bytes());

        let player = &self.state.player;
        write_vec2(&mut hasher, player.pos);
        write_f32(&mut hasher, player.angle);
        write_f32(&mut hasher, player.health);
        write_f32(&mut hasher, player.max_health);
        write_f32(&mut hasher, player.mana);
        write_f32(&mut hasher, player.max_mana);
        hasher.write_u32(player.level);
        hasher.write_u32(player.xp);
        hasher.write_u32(player.gold);
        hasher.write_u32(player.kills);
        hasher.write_u8(player.ward.unwrap_or(0));
        for slot in &player.abilities {
            hasher.write_u8(slot.id as u8);
            write_f32(&mut hasher, slot.cooldown);
        }
        for kind in [BuffKind::DamageBoost, BuffKind::SpeedBoost, BuffKind::Invincibility] {
            write_f32(&mut hasher, player.buffs.remaining(kind));
        }

        hasher.write_usize(self.state.enemies.len());
        for enemy in self.state.enemies.values() {
            hasher.write_u8(enemy.kind as u8);
            write_vec2(&mut hasher, enemy.pos);
            write_f32(&mut hasher, enemy.health);
            hasher.write_u8(enemy.state as u8);
            write_f32(&mut hasher, enemy.attack_cooldown);
            write_f32(&mut hasher, enemy.status.frozen);
            write_f32(&mut hasher, enemy.status.burning);
        }
        hasher.write_usize(self.state.projectiles.len());
        for projectile in &self.state.projectiles {
            write_vec2(&mut hasher, projectile.pos);
            write_f32(&mut hasher, projectile.lifetime);
            hasher.write_u8(projectile.origin as u8);
        }
        for item in &self.state.items {
            hasher.write_u8(u8::from(item.collected));
        }
        for chest in &self.state.chests {
            hasher.write_u8(u8::from(chest.opened));
        }
        hasher.write_usize(self.state.allies.len());
        for ally in &self.state.allies {
            write_vec2(&mut hasher, ally.pos);
            write_f32(&mut hasher, ally.lifetime);
        }
        hasher.write_u32(self.state.combo.count());
        write_f32(&mut hasher, self.state.combo.timer());
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::game::test_support::*;

    #[test]
    fn hash_ignores_presentation_state() {
        let mut game = new_game(21);
        let before = game.snapshot_hash();
        game.state.shake = 1.5;
        game.state.flash = 0.8;
        assert_eq!(game.snapshot_hash(), before);
    }

    #[test]
    fn hash_tracks_gameplay_state() {
        let mut game = new_game(21);
        let before = game.snapshot_hash();
        game.state.player.gold += 1;
        assert_ne!(game.snapshot_hash(), before);
    }

    #[test]
    fn equal_seeds_hash_equal() {
        assert_eq!(new_game(77).snapshot_hash(), new_game(77).snapshot_hash());
        assert_ne!(new_game(77).snapshot_hash(), new_game(78).snapshot_hash());
    }
}
