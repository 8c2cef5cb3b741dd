//! Public data models for generated levels and their spawn rosters.

use crate::grid::DungeonGrid;
use crate::types::{Cell, EnemyKind, PickupKind};

/// Axis-aligned carving rectangle. Only lives for the duration of generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn center(&self) -> Cell {
        Cell { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.x
            && cell.x < self.x + self.width
            && cell.y >= self.y
            && cell.y < self.y + self.height
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| Cell { y, x }))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SecretRoom {
    pub interior: Room,
    pub door: Cell,
    /// Whether the door needed a carved connector to reach existing floor.
    pub repaired: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub cell: Cell,
    /// Multiplier on health and damage from depth and boss difficulty.
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemSpawn {
    pub kind: PickupKind,
    pub cell: Cell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChestSpawn {
    pub cell: Cell,
    pub in_secret_room: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedLevel {
    pub depth: u32,
    pub grid: DungeonGrid,
    pub spawn_cell: Cell,
    /// Rooms carved beyond the spawn room.
    pub room_count: usize,
    pub secret_rooms: Vec<SecretRoom>,
    pub is_boss_level: bool,
    pub enemy_spawns: Vec<EnemySpawn>,
    pub item_spawns: Vec<ItemSpawn>,
    pub chest_spawns: Vec<ChestSpawn>,
}

impl GeneratedLevel {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = self.grid.canonical_bytes();
        bytes.extend(self.depth.to_le_bytes());
        bytes.extend(self.spawn_cell.y.to_le_bytes());
        bytes.extend(self.spawn_cell.x.to_le_bytes());
        bytes.extend((self.room_count as u32).to_le_bytes());
        bytes.push(u8::from(self.is_boss_level));

        bytes.extend((self.secret_rooms.len() as u32).to_le_bytes());
        for room in &self.secret_rooms {
            bytes.extend(room.door.y.to_le_bytes());
            bytes.extend(room.door.x.to_le_bytes());
            bytes.push(u8::from(room.repaired));
        }

        bytes.extend((self.enemy_spawns.len() as u32).to_le_bytes());
        for spawn in &self.enemy_spawns {
            bytes.push(spawn.kind as u8);
            bytes.extend(spawn.cell.y.to_le_bytes());
            bytes.extend(spawn.cell.x.to_le_bytes());
            bytes.extend(spawn.scale.to_bits().to_le_bytes());
        }

        bytes.extend((self.item_spawns.len() as u32).to_le_bytes());
        for spawn in &self.item_spawns {
            bytes.push(spawn.kind as u8);
            bytes.extend(spawn.cell.y.to_le_bytes());
            bytes.extend(spawn.cell.x.to_le_bytes());
        }

        bytes.extend((self.chest_spawns.len() as u32).to_le_bytes());
        for chest in &self.chest_spawns {
            bytes.extend(chest.cell.y.to_le_bytes());
            bytes.extend(chest.cell.x.to_le_bytes());
            bytes.push(u8::from(chest.in_secret_room));
        }
        bytes
    }
}
