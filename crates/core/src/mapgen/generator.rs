//! Level generation orchestration: rooms, decoration, secret rooms, then spawns.

use tracing::debug;

use crate::grid::DungeonGrid;
use crate::rng::{GameRng, derive_level_seed};
use crate::types::TileKind;

use super::decor::decorate_walls;
use super::layout::{SPAWN_ANCHOR, carve_rooms, extra_room_count};
use super::model::{ChestSpawn, GeneratedLevel};
use super::secret_rooms::carve_secret_rooms;
use super::spawns::{
    SpawnSampler, generate_enemy_spawns, generate_item_spawns, generate_regular_chest,
    is_boss_level,
};

pub struct LevelGenerator {
    run_seed: u64,
    grid_size: usize,
    boss_difficulty: f32,
}

impl LevelGenerator {
    pub fn new(run_seed: u64, grid_size: usize, boss_difficulty: f32) -> Self {
        Self { run_seed, grid_size, boss_difficulty }
    }

    pub fn generate(&self, depth: u32) -> GeneratedLevel {
        let depth = depth.max(1);
        let mut rng = GameRng::seed_from_u64(derive_level_seed(self.run_seed, depth));
        let mut grid = DungeonGrid::filled(self.grid_size, self.grid_size, TileKind::SOLID);

        let rooms = carve_rooms(&mut grid, &mut rng, extra_room_count(depth));
        decorate_walls(&mut grid, &mut rng);
        let secret_rooms = carve_secret_rooms(&mut grid, &mut rng);

        let sampler = SpawnSampler::new(&grid, SPAWN_ANCHOR);
        let enemy_spawns = generate_enemy_spawns(&sampler, &mut rng, depth, self.boss_difficulty);
        let item_spawns = generate_item_spawns(&sampler, &mut rng, depth);

        let mut chest_spawns = vec![generate_regular_chest(&sampler, &mut rng)];
        chest_spawns.extend(
            secret_rooms
                .iter()
                .map(|room| ChestSpawn { cell: room.interior.center(), in_secret_room: true }),
        );

        debug!(
            depth,
            rooms = rooms.len(),
            secret_rooms = secret_rooms.len(),
            enemies = enemy_spawns.len(),
            items = item_spawns.len(),
            "level generated"
        );

        GeneratedLevel {
            depth,
            grid,
            spawn_cell: SPAWN_ANCHOR,
            room_count: rooms.len(),
            secret_rooms,
            is_boss_level: is_boss_level(depth),
            enemy_spawns,
            item_spawns,
            chest_spawns,
        }
    }
}
