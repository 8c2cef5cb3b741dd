//! Hidden 3x3 rooms cut into solid rock next to existing floor, each sealed
//! by one secret door.

use std::array;

use crate::grid::DungeonGrid;
use crate::rng::GameRng;
use crate::types::{Cell, TileKind};

use super::model::{Room, SecretRoom};

const SECRET_ROOM_CHANCE: f32 = 0.5;
const PLACEMENT_ATTEMPTS: usize = 200;
const REPAIR_BUDGET: usize = 64;
const NEAR_FLOOR_RADIUS: i32 = 3;
const BLOCK_SIDE: i32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    North,
    South,
    West,
    East,
}

const SIDES: [Side; 4] = [Side::North, Side::South, Side::West, Side::East];

/// Rolls for and carves zero, one or two secret rooms.
pub(super) fn carve_secret_rooms(grid: &mut DungeonGrid, rng: &mut GameRng) -> Vec<SecretRoom> {
    if !rng.chance(SECRET_ROOM_CHANCE) {
        return Vec::new();
    }
    let wanted = rng.range_usize(1, 2);
    let mut placed: Vec<Room> = Vec::new();
    let mut rooms = Vec::new();
    for _ in 0..wanted {
        if let Some((block, room)) = place_secret_room(grid, rng, &placed) {
            placed.push(block);
            rooms.push(room);
        }
    }
    rooms
}

fn place_secret_room(
    grid: &mut DungeonGrid,
    rng: &mut GameRng,
    placed: &[Room],
) -> Option<(Room, SecretRoom)> {
    // Keep the block's outward neighbors off the border.
    let max_x = grid.width() as i32 - BLOCK_SIDE - 2;
    let max_y = grid.height() as i32 - BLOCK_SIDE - 2;
    if max_x < 2 || max_y < 2 {
        return None;
    }

    for _ in 0..PLACEMENT_ATTEMPTS {
        let block = Room {
            x: rng.range_i32(2, max_x),
            y: rng.range_i32(2, max_y),
            width: BLOCK_SIDE,
            height: BLOCK_SIDE,
        };
        if placed.iter().any(|other| overlaps(other, &block)) {
            continue;
        }
        if !block.cells().all(|cell| matches!(grid.tile_at(cell), TileKind::Wall(_))) {
            continue;
        }
        let Some(target) = nearest_floor(grid, &block) else {
            continue;
        };
        if let Some(room) = open_secret_room(grid, rng, &block, target, placed) {
            return Some((block, room));
        }
    }
    None
}

fn overlaps(a: &Room, b: &Room) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}

fn block_distance(block: &Room, cell: Cell) -> i32 {
    let dx = (block.x - cell.x).max(cell.x - (block.x + block.width - 1)).max(0);
    let dy = (block.y - cell.y).max(cell.y - (block.y + block.height - 1)).max(0);
    dx.max(dy)
}

/// Closest floor cell within the search ring, nearest to the block center.
fn nearest_floor(grid: &DungeonGrid, block: &Room) -> Option<Cell> {
    let center = block.center();
    let search = Room {
        x: block.x - NEAR_FLOOR_RADIUS,
        y: block.y - NEAR_FLOOR_RADIUS,
        width: block.width + 2 * NEAR_FLOOR_RADIUS,
        height: block.height + 2 * NEAR_FLOOR_RADIUS,
    };
    search
        .cells()
        .filter(|&cell| block_distance(block, cell) >= 1 && grid.is_floor(cell))
        .min_by_key(|&cell| (cell.manhattan(center), cell.y, cell.x))
}

/// Non-corner perimeter cells of one side, paired with the cell just outside.
fn side_cells(block: &Room, side: Side) -> [(Cell, Cell); 3] {
    let right = block.x + block.width - 1;
    let bottom = block.y + block.height - 1;
    array::from_fn(|offset| {
        let offset = offset as i32 + 1;
        let (door, dy, dx) = match side {
            Side::North => (Cell { y: block.y, x: block.x + offset }, -1, 0),
            Side::South => (Cell { y: bottom, x: block.x + offset }, 1, 0),
            Side::West => (Cell { y: block.y + offset, x: block.x }, 0, -1),
            Side::East => (Cell { y: block.y + offset, x: right }, 0, 1),
        };
        (door, Cell { y: door.y + dy, x: door.x + dx })
    })
}

fn open_secret_room(
    grid: &mut DungeonGrid,
    rng: &mut GameRng,
    block: &Room,
    target: Cell,
    placed: &[Room],
) -> Option<SecretRoom> {
    let interior = Room { x: block.x + 1, y: block.y + 1, width: 3, height: 3 };

    let candidates: Vec<Cell> = SIDES
        .into_iter()
        .flat_map(|side| side_cells(block, side))
        .filter(|&(_, outward)| grid.is_floor(outward))
        .map(|(door, _)| door)
        .collect();

    let (door, connector, repaired) = match rng.pick(&candidates) {
        Some(&door) => (door, Vec::new(), false),
        None => {
            let (door, outward) = SIDES
                .into_iter()
                .map(|side| side_cells(block, side)[1])
                .min_by_key(|&(_, outward)| outward.manhattan(target))?;
            let connector = repair_walk(grid, block, placed, outward, target)?;
            (door, connector, true)
        }
    };

    for cell in interior.cells() {
        grid.set_tile(cell, TileKind::Floor);
    }
    for &cell in &connector {
        grid.set_tile(cell, TileKind::Floor);
    }
    grid.set_tile(door, TileKind::SecretDoor);
    Some(SecretRoom { interior, door, repaired })
}

/// Straight Manhattan walk from `start` toward `target`, stopping at the first
/// cell that is already floor. `None` when the walk would cut through a
/// secret block or exceed the step budget.
fn repair_walk(
    grid: &DungeonGrid,
    block: &Room,
    placed: &[Room],
    start: Cell,
    target: Cell,
) -> Option<Vec<Cell>> {
    [true, false].into_iter().find_map(|horizontal_first| {
        let mut path = Vec::new();
        let mut cell = start;
        loop {
            if grid.is_floor(cell) {
                return Some(path);
            }
            let blocked =
                block.contains(cell) || placed.iter().any(|other| other.contains(cell));
            if blocked || grid.is_border(cell) || path.len() >= REPAIR_BUDGET {
                return None;
            }
            path.push(cell);
            let step_x = (target.x - cell.x).signum();
            let step_y = (target.y - cell.y).signum();
            cell = if (horizontal_first && step_x != 0) || step_y == 0 {
                Cell { y: cell.y, x: cell.x + step_x }
            } else {
                Cell { y: cell.y + step_y, x: cell.x }
            };
            if step_x == 0 && step_y == 0 {
                return None;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfield::PathField;

    fn rock_with_corridor() -> DungeonGrid {
        let mut grid = DungeonGrid::filled(20, 20, TileKind::SOLID);
        for x in 1..19 {
            grid.set_tile(Cell::new(x, 1), TileKind::Floor);
        }
        grid
    }

    #[test]
    fn adjacent_floor_gets_a_door_without_repair() {
        let mut grid = rock_with_corridor();
        let mut rng = GameRng::seed_from_u64(3);
        let block = Room { x: 6, y: 2, width: 5, height: 5 };
        let room = open_secret_room(&mut grid, &mut rng, &block, Cell::new(8, 1), &[])
            .expect("door side touches the corridor");

        assert!(!room.repaired);
        assert_eq!(room.door.y, 2);
        assert_eq!(grid.tile_at(room.door), TileKind::SecretDoor);
        for cell in room.interior.cells() {
            assert!(grid.is_floor(cell));
        }
    }

    #[test]
    fn distant_floor_is_reached_by_a_repair_walk() {
        let mut grid = rock_with_corridor();
        let mut rng = GameRng::seed_from_u64(3);
        let block = Room { x: 6, y: 4, width: 5, height: 5 };
        let target = nearest_floor(&grid, &block).expect("corridor within range");
        let room = open_secret_room(&mut grid, &mut rng, &block, target, &[]).expect("repairable");

        assert!(room.repaired);
        grid.reveal_secret_door(room.door);
        let field = PathField::compute(&grid, Cell::new(1, 1));
        for cell in room.interior.cells() {
            assert!(field.is_reachable(cell), "{cell:?}");
        }
    }

    #[test]
    fn secret_rooms_are_sealed_until_revealed() {
        let mut grid = rock_with_corridor();
        for seed in 0..40 {
            let mut grid = grid.clone();
            let mut rng = GameRng::seed_from_u64(seed);
            let rooms = carve_secret_rooms(&mut grid, &mut rng);
            let field = PathField::compute(&grid, Cell::new(1, 1));
            for room in &rooms {
                assert!(!field.is_reachable(room.interior.center()));
                assert!(!grid.is_border(room.door));
            }
        }
        let mut rng = GameRng::seed_from_u64(0);
        let rooms = carve_secret_rooms(&mut grid, &mut rng);
        assert!(rooms.len() <= 2);
    }
}
