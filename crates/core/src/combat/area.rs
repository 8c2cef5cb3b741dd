use crate::grid::DungeonGrid;
use crate::types::Vec2;

/// Interval between gravity-suspension damage ticks.
const SUSPENSION_TICK: f32 = 1.0;

/// Indices of the positions within `radius` of `center`, in input order.
pub fn enemies_in_radius(positions: &[Vec2], center: Vec2, radius: f32) -> Vec<usize> {
    positions
        .iter()
        .enumerate()
        .filter(|(_, pos)| pos.distance(center) <= radius)
        .map(|(index, _)| index)
        .collect()
}

/// Where a radial push moves `target`. The whole push is rejected when the
/// destination is not floor.
pub fn knockback_destination(grid: &DungeonGrid, center: Vec2, target: Vec2, force: f32) -> Vec2 {
    let direction = (target - center).normalized();
    let destination = target + direction * force;
    if destination.is_finite() && grid.is_floor_at(destination) { destination } else { target }
}

/// Gravity-well hold: no movement while active, damage once per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Suspension {
    pub remaining: f32,
    pub damage_per_tick: f32,
    pub drain_fraction: f32,
    until_tick: f32,
}

impl Suspension {
    pub fn new(duration: f32, damage_per_tick: f32, drain_fraction: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
            damage_per_tick: damage_per_tick.max(0.0),
            drain_fraction: drain_fraction.max(0.0),
            until_tick: SUSPENSION_TICK,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Advances the hold and returns the damage of every tick that fell due.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let step = dt.max(0.0).min(self.remaining);
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        self.until_tick -= step;
        let mut damage = 0.0;
        while self.until_tick <= 0.0 {
            damage += self.damage_per_tick;
            self.until_tick += SUSPENSION_TICK;
        }
        damage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, TileKind};

    #[test]
    fn radius_query_keeps_input_order() {
        let positions = [Vec2::new(1.0, 1.0), Vec2::new(9.0, 9.0), Vec2::new(2.0, 1.5)];
        assert_eq!(enemies_in_radius(&positions, Vec2::new(1.5, 1.5), 1.0), vec![0, 2]);
    }

    #[test]
    fn knockback_into_a_wall_is_rejected() {
        let mut grid = DungeonGrid::open_room(10, 10);
        grid.set_tile(Cell::new(6, 4), TileKind::SOLID);
        let center = Vec2::new(3.5, 4.5);

        let blocked = knockback_destination(&grid, center, Vec2::new(5.5, 4.5), 1.0);
        assert_eq!(blocked, Vec2::new(5.5, 4.5));

        let open = knockback_destination(&grid, center, Vec2::new(3.5, 6.5), 1.5);
        assert_eq!(open, Vec2::new(3.5, 8.0));
    }

    #[test]
    fn suspension_ticks_once_per_second() {
        let mut hold = Suspension::new(3.0, 10.0, 0.25);
        let mut total = 0.0;
        for _ in 0..12 {
            total += hold.advance(0.25);
        }
        assert_eq!(total, 30.0);
        assert!(!hold.is_active());
        assert_eq!(hold.advance(1.0), 0.0);
    }
}
