//! Shared tile grid read by generation, simulation and the renderer.
//! Reads outside the playable extent always report solid wall.

use crate::types::{Cell, TileKind, Vec2};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DungeonGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl DungeonGrid {
    pub fn filled(width: usize, height: usize, tile: TileKind) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    /// Walled border around an open floor interior.
    pub fn open_room(width: usize, height: usize) -> Self {
        let mut grid = Self::filled(width, height, TileKind::SOLID);
        for y in 1..height.saturating_sub(1) {
            for x in 1..width.saturating_sub(1) {
                grid.set_tile(Cell { y: y as i32, x: x as i32 }, TileKind::Floor);
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    pub fn is_border(&self, cell: Cell) -> bool {
        self.in_bounds(cell)
            && (cell.x == 0
                || cell.y == 0
                || cell.x as usize == self.width - 1
                || cell.y as usize == self.height - 1)
    }

    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell).then(|| cell.y as usize * self.width + cell.x as usize)
    }

    pub fn cell_at(&self, index: usize) -> Cell {
        Cell { y: (index / self.width.max(1)) as i32, x: (index % self.width.max(1)) as i32 }
    }

    pub fn tile_at(&self, cell: Cell) -> TileKind {
        self.index(cell).map_or(TileKind::SOLID, |index| self.tiles[index])
    }

    /// Writes are ignored outside the grid.
    pub fn set_tile(&mut self, cell: Cell, tile: TileKind) {
        if let Some(index) = self.index(cell) {
            self.tiles[index] = tile;
        }
    }

    pub fn is_floor(&self, cell: Cell) -> bool {
        self.tile_at(cell).is_floor()
    }

    pub fn is_floor_at(&self, pos: Vec2) -> bool {
        pos.is_finite() && self.is_floor(pos.cell())
    }

    /// Turns a secret door into floor. Returns whether anything changed.
    pub fn reveal_secret_door(&mut self, cell: Cell) -> bool {
        if self.tile_at(cell) != TileKind::SecretDoor {
            return false;
        }
        self.set_tile(cell, TileKind::Floor);
        true
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.tiles.len()).map(|index| self.cell_at(index))
    }

    pub fn floor_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(|&cell| self.is_floor(cell))
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    /// Samples the segment every tenth of a cell; any non-floor sample blocks sight.
    pub fn has_line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        if !from.is_finite() || !to.is_finite() {
            return false;
        }
        let distance = from.distance(to);
        let steps = (distance / 0.1).ceil().max(1.0) as u32;
        (1..steps).all(|step| {
            let t = step as f32 / steps as f32;
            self.is_floor_at(from + (to - from) * t)
        })
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.tiles.len());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.tiles.iter().map(|tile| tile.code()));
        bytes
    }
}
