//! Spawn room, extra room placement and L-shaped corridor carving.

use crate::grid::DungeonGrid;
use crate::rng::GameRng;
use crate::types::{Cell, TileKind};

use super::model::Room;

pub const SPAWN_ANCHOR: Cell = Cell { y: 3, x: 3 };
pub const SPAWN_ROOM: Room = Room { x: 1, y: 1, width: 5, height: 5 };
const MIN_ROOM_SIDE: i32 = 3;
const MAX_ROOM_SIDE: i32 = 6;

pub(super) fn extra_room_count(depth: u32) -> usize {
    5 + 2 * depth as usize
}

pub(super) fn carve_room(grid: &mut DungeonGrid, room: &Room) {
    for cell in room.cells() {
        if !grid.is_border(cell) {
            grid.set_tile(cell, TileKind::Floor);
        }
    }
}

/// Places `count` rooms anywhere inside the border, each joined to the
/// previous room's center, so the room chain is connected by construction.
pub(super) fn carve_rooms(grid: &mut DungeonGrid, rng: &mut GameRng, count: usize) -> Vec<Room> {
    carve_room(grid, &SPAWN_ROOM);
    let width = grid.width() as i32;
    let height = grid.height() as i32;

    let mut previous_center = SPAWN_ROOM.center();
    let mut rooms = Vec::with_capacity(count);
    for _ in 0..count {
        let room_width = rng.range_i32(MIN_ROOM_SIDE, MAX_ROOM_SIDE).min(width - 2);
        let room_height = rng.range_i32(MIN_ROOM_SIDE, MAX_ROOM_SIDE).min(height - 2);
        let room = Room {
            x: rng.range_i32(1, width - 1 - room_width),
            y: rng.range_i32(1, height - 1 - room_height),
            width: room_width,
            height: room_height,
        };
        carve_room(grid, &room);
        let center = room.center();
        carve_l_corridor(grid, previous_center, center, rng.chance(0.5));
        previous_center = center;
        rooms.push(room);
    }
    rooms
}

pub(super) fn carve_l_corridor(grid: &mut DungeonGrid, from: Cell, to: Cell, horizontal_first: bool) {
    let corner =
        if horizontal_first { Cell { y: from.y, x: to.x } } else { Cell { y: to.y, x: from.x } };
    carve_straight(grid, from, corner);
    carve_straight(grid, corner, to);
}

fn carve_straight(grid: &mut DungeonGrid, from: Cell, to: Cell) {
    let step_x = (to.x - from.x).signum();
    let step_y = (to.y - from.y).signum();
    let mut cell = from;
    loop {
        if !grid.is_border(cell) {
            grid.set_tile(cell, TileKind::Floor);
        }
        if cell == to {
            break;
        }
        cell = Cell { y: cell.y + step_y, x: cell.x + step_x };
    }
}
