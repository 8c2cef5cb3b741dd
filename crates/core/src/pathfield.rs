//! Breadth-first step distances from one origin cell over 4-connected floor.
//! Enemies share one field per tick instead of searching individually.

use std::collections::VecDeque;

use crate::grid::DungeonGrid;
use crate::types::Cell;

const UNREACHABLE: u32 = u32::MAX;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathField {
    width: usize,
    height: usize,
    origin: Cell,
    distances: Vec<u32>,
}

impl PathField {
    pub fn compute(grid: &DungeonGrid, origin: Cell) -> Self {
        let mut field = Self {
            width: grid.width(),
            height: grid.height(),
            origin,
            distances: vec![UNREACHABLE; grid.width() * grid.height()],
        };
        field.fill(grid);
        field
    }

    /// Reuses the allocation when the grid extent is unchanged.
    pub fn recompute(&mut self, grid: &DungeonGrid, origin: Cell) {
        if self.width != grid.width() || self.height != grid.height() {
            *self = Self::compute(grid, origin);
            return;
        }
        self.origin = origin;
        self.distances.fill(UNREACHABLE);
        self.fill(grid);
    }

    fn fill(&mut self, grid: &DungeonGrid) {
        // A non-floor origin leaves everything unreachable.
        let Some(start) = grid.index(self.origin).filter(|_| grid.is_floor(self.origin)) else {
            return;
        };
        self.distances[start] = 0;
        let mut queue = VecDeque::from([self.origin]);
        while let Some(current) = queue.pop_front() {
            let Some(current_index) = grid.index(current) else {
                continue;
            };
            let next_distance = self.distances[current_index] + 1;
            for neighbor in current.neighbors() {
                if !grid.is_floor(neighbor) {
                    continue;
                }
                if let Some(index) = grid.index(neighbor)
                    && self.distances[index] == UNREACHABLE
                {
                    self.distances[index] = next_distance;
                    queue.push_back(neighbor);
                }
            }
        }
    }

    pub fn origin(&self) -> Cell {
        self.origin
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let in_bounds = cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height;
        in_bounds.then(|| cell.y as usize * self.width + cell.x as usize)
    }

    /// Step count from the origin, `None` when unreachable or out of bounds.
    pub fn distance(&self, cell: Cell) -> Option<u32> {
        self.index(cell).map(|index| self.distances[index]).filter(|&d| d != UNREACHABLE)
    }

    pub fn is_reachable(&self, cell: Cell) -> bool {
        self.distance(cell).is_some()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|&&d| d != UNREACHABLE).count()
    }

    pub fn all_unreachable(&self) -> bool {
        self.reachable_count() == 0
    }

    /// Neighbor of `from` one step closer to the origin. Ties break in
    /// `Cell::neighbors` order so the choice is deterministic.
    pub fn best_step(&self, from: Cell) -> Option<Cell> {
        let here = self.distance(from)?;
        from.neighbors()
            .into_iter()
            .filter_map(|neighbor| self.distance(neighbor).map(|d| (d, neighbor)))
            .filter(|&(d, _)| d < here)
            .min_by_key(|&(d, _)| d)
            .map(|(_, neighbor)| neighbor)
    }
}
