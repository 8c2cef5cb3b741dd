//! Cosmetic wall-style variants on walls facing open floor.

use crate::grid::DungeonGrid;
use crate::rng::GameRng;
use crate::types::{Cell, TileKind, WallStyle};

const DECORATION_CHANCE: f32 = 0.18;

/// Weighted style table; weights sum to 100.
const STYLE_WEIGHTS: [(WallStyle, u32); 4] = [
    (WallStyle::Brick, 40),
    (WallStyle::Mossy, 30),
    (WallStyle::Cracked, 20),
    (WallStyle::Crystal, 10),
];

pub(super) fn decorate_walls(grid: &mut DungeonGrid, rng: &mut GameRng) -> usize {
    let facing_floor: Vec<Cell> = grid
        .cells()
        .filter(|&cell| grid.tile_at(cell) == TileKind::Wall(WallStyle::Stone))
        .filter(|&cell| cell.neighbors().into_iter().any(|neighbor| grid.is_floor(neighbor)))
        .collect();

    let mut decorated = 0;
    for cell in facing_floor {
        if rng.chance(DECORATION_CHANCE) {
            grid.set_tile(cell, TileKind::Wall(pick_style(rng)));
            decorated += 1;
        }
    }
    decorated
}

fn pick_style(rng: &mut GameRng) -> WallStyle {
    let mut roll = rng.range_i32(0, 99) as u32;
    for (style, weight) in STYLE_WEIGHTS {
        if roll < weight {
            return style;
        }
        roll -= weight;
    }
    WallStyle::Brick
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_walls_facing_floor_change_style() {
        let mut grid = DungeonGrid::filled(12, 12, TileKind::SOLID);
        for x in 3..9 {
            grid.set_tile(Cell::new(x, 6), TileKind::Floor);
        }
        let before = grid.clone();
        let mut rng = GameRng::seed_from_u64(11);
        decorate_walls(&mut grid, &mut rng);

        for cell in grid.cells() {
            let changed = grid.tile_at(cell) != before.tile_at(cell);
            if changed {
                assert!(matches!(grid.tile_at(cell), TileKind::Wall(_)));
                assert!(cell.neighbors().into_iter().any(|n| grid.is_floor(n)));
            }
        }
        assert_eq!(grid.floor_cells().count(), 6);
    }
}
