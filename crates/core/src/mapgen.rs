//! Procedural level generation split into coherent submodules.

pub mod model;

mod decor;
mod generator;
mod layout;
mod secret_rooms;
mod spawns;

pub use generator::LevelGenerator;
pub use layout::{SPAWN_ANCHOR, SPAWN_ROOM};
pub use model::{ChestSpawn, EnemySpawn, GeneratedLevel, ItemSpawn, Room, SecretRoom};
pub use spawns::{MIN_SPAWN_DISTANCE, depth_scale, is_boss_level};

pub fn generate_level(
    run_seed: u64,
    depth: u32,
    grid_size: usize,
    boss_difficulty: f32,
) -> GeneratedLevel {
    LevelGenerator::new(run_seed, grid_size, boss_difficulty).generate(depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::enemy_def;
    use crate::pathfield::PathField;

    #[test]
    fn generate_level_matches_level_generator_output() {
        let from_helper = generate_level(123, 2, 30, 1.0);
        let from_generator = LevelGenerator::new(123, 30, 1.0).generate(2);
        assert_eq!(from_helper, from_generator);
    }

    #[test]
    fn depth_one_has_spawn_room_and_enough_rooms() {
        let level = generate_level(42, 1, 30, 1.0);
        assert_eq!(level.spawn_cell, SPAWN_ANCHOR);
        assert!(level.room_count >= 7);
        assert!(!level.is_boss_level);
        for cell in SPAWN_ROOM.cells() {
            assert!(level.grid.is_floor(cell), "{cell:?}");
        }
        let field = PathField::compute(&level.grid, level.spawn_cell);
        assert!(SPAWN_ROOM.cells().all(|cell| field.is_reachable(cell)));
        assert_eq!(level.enemy_spawns.len(), 13);
    }

    #[test]
    fn each_secret_room_has_exactly_one_chest() {
        for seed in 0..30 {
            let level = generate_level(seed, 1, 30, 1.0);
            for room in &level.secret_rooms {
                let chests = level
                    .chest_spawns
                    .iter()
                    .filter(|chest| chest.in_secret_room && room.interior.contains(chest.cell))
                    .count();
                assert_eq!(chests, 1);
            }
            let regular = level.chest_spawns.iter().filter(|chest| !chest.in_secret_room).count();
            assert_eq!(regular, 1);
        }
    }

    #[test]
    fn depth_five_is_a_boss_level() {
        let level = generate_level(7, 5, 30, 1.3);
        assert!(level.is_boss_level);
        let bosses: Vec<_> = level
            .enemy_spawns
            .iter()
            .filter(|spawn| enemy_def(spawn.kind).boss)
            .collect();
        assert_eq!(bosses.len(), 1);
        assert_eq!(level.enemy_spawns.len(), 1 + 5 + 5);
        assert!((bosses[0].scale - depth_scale(5) * 1.3).abs() < 1e-5);
    }
}
