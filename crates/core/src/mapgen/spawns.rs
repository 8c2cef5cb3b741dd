//! Enemy, pickup and chest placement on reachable floor away from the spawn room.

use crate::content::{boss_for_depth, regular_pool};
use crate::grid::DungeonGrid;
use crate::pathfield::PathField;
use crate::rng::GameRng;
use crate::types::{Cell, PickupKind};

use super::model::{ChestSpawn, EnemySpawn, ItemSpawn};

pub const MIN_SPAWN_DISTANCE: f32 = 6.0;
const SAMPLE_ATTEMPTS: usize = 400;
const DEPTH_SCALE_PER_LEVEL: f32 = 0.12;

const PICKUP_WEIGHTS: [(PickupKind, u32); 5] = [
    (PickupKind::HealthPotion, 35),
    (PickupKind::ManaPotion, 30),
    (PickupKind::DamageTonic, 15),
    (PickupKind::SwiftnessTonic, 12),
    (PickupKind::InvulnerabilityCharm, 8),
];

pub fn depth_scale(depth: u32) -> f32 {
    1.0 + DEPTH_SCALE_PER_LEVEL * depth.saturating_sub(1) as f32
}

pub fn is_boss_level(depth: u32) -> bool {
    depth > 0 && depth.is_multiple_of(5)
}

/// Rejection sampler over cells reachable from the anchor.
pub(super) struct SpawnSampler {
    anchor: Cell,
    field: PathField,
    width: i32,
    height: i32,
    fallback: Vec<Cell>,
}

impl SpawnSampler {
    pub(super) fn new(grid: &DungeonGrid, anchor: Cell) -> Self {
        let field = PathField::compute(grid, anchor);
        let mut sampler = Self {
            anchor,
            field,
            width: grid.width() as i32,
            height: grid.height() as i32,
            fallback: Vec::new(),
        };
        sampler.fallback = grid.floor_cells().filter(|&cell| sampler.accepts(cell)).collect();
        sampler
    }

    fn accepts(&self, cell: Cell) -> bool {
        self.field.is_reachable(cell)
            && cell.center().distance(self.anchor.center()) >= MIN_SPAWN_DISTANCE
    }

    /// Reachable cell with the largest step distance; ties go to the first in row order.
    pub(super) fn farthest(&self) -> Cell {
        let mut best = (0, self.anchor);
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = Cell { y, x };
                if let Some(distance) = self.field.distance(cell)
                    && distance > best.0
                {
                    best = (distance, cell);
                }
            }
        }
        best.1
    }

    pub(super) fn sample(&self, rng: &mut GameRng) -> Cell {
        for _ in 0..SAMPLE_ATTEMPTS {
            let cell = Cell {
                y: rng.range_i32(0, self.height - 1),
                x: rng.range_i32(0, self.width - 1),
            };
            if self.accepts(cell) {
                return cell;
            }
        }
        rng.pick(&self.fallback).copied().unwrap_or_else(|| self.farthest())
    }
}

pub(super) fn generate_enemy_spawns(
    sampler: &SpawnSampler,
    rng: &mut GameRng,
    depth: u32,
    boss_difficulty: f32,
) -> Vec<EnemySpawn> {
    let scale = depth_scale(depth);
    let pool = regular_pool(depth);
    let mut spawns = Vec::new();

    let regular_count = if is_boss_level(depth) {
        spawns.push(EnemySpawn {
            kind: boss_for_depth(depth),
            cell: sampler.farthest(),
            scale: scale * boss_difficulty,
        });
        5 + depth as usize
    } else {
        10 + 3 * depth as usize
    };

    for _ in 0..regular_count {
        let Some(&kind) = rng.pick(pool) else {
            break;
        };
        spawns.push(EnemySpawn { kind, cell: sampler.sample(rng), scale });
    }
    spawns
}

pub(super) fn generate_item_spawns(
    sampler: &SpawnSampler,
    rng: &mut GameRng,
    depth: u32,
) -> Vec<ItemSpawn> {
    let count = 3 + depth as usize / 2;
    (0..count).map(|_| ItemSpawn { kind: pick_pickup(rng), cell: sampler.sample(rng) }).collect()
}

pub(super) fn generate_regular_chest(sampler: &SpawnSampler, rng: &mut GameRng) -> ChestSpawn {
    ChestSpawn { cell: sampler.sample(rng), in_secret_room: false }
}

fn pick_pickup(rng: &mut GameRng) -> PickupKind {
    let mut roll = rng.range_i32(0, 99) as u32;
    for (kind, weight) in PICKUP_WEIGHTS {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    PickupKind::HealthPotion
}
