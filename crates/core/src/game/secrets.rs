//! Secret-door reveal on the reveal input.

use super::*;

const REVEAL_REACH: f32 = 1.5;

impl Game {
    /// Step 12: secret doors within reach of the player become floor.
    pub(super) fn reveal_nearby_secrets(&mut self) {
        let pos = self.state.player.pos;
        let here = self.state.player.cell();
        let reach = REVEAL_REACH.ceil() as i32;
        let mut revealed = Vec::new();
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let cell = Cell::new(here.x + dx, here.y + dy);
                if cell.center().distance(pos) <= REVEAL_REACH
                    && self.state.grid.reveal_secret_door(cell)
                {
                    revealed.push(cell);
                }
            }
        }
        if revealed.is_empty() {
            return;
        }
        for &cell in &revealed {
            self.push_log(LogEvent::SecretDoorRevealed { cell });
            self.schedule_now(FeedbackEvent::SecretRevealed { cell });
        }
        self.play(SoundCue::SecretDoor);
        self.path_field.recompute(&self.state.grid, here);
        info!(count = revealed.len(), "secret doors revealed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;
    use crate::input::ControlState;

    #[test]
    fn reveal_opens_adjacent_secret_doors_only() {
        let mut game = open_room_game();
        game.state.grid.set_tile(Cell::new(4, 3), TileKind::SecretDoor);
        game.state.grid.set_tile(Cell::new(9, 9), TileKind::SecretDoor);
        game.reveal_nearby_secrets();

        assert_eq!(game.state.grid.tile_at(Cell::new(4, 3)), TileKind::Floor);
        assert_eq!(game.state.grid.tile_at(Cell::new(9, 9)), TileKind::SecretDoor);
        assert_eq!(game.log(), &[LogEvent::SecretDoorRevealed { cell: Cell::new(4, 3) }]);
    }

    #[test]
    fn reveal_runs_only_on_the_reveal_input() {
        let mut game = open_room_game();
        add_enemy(&mut game, EnemyKind::Rat, Vec2::new(13.5, 13.5));
        game.state.grid.set_tile(Cell::new(3, 4), TileKind::SecretDoor);
        game.tick(&idle(), 0.016);
        assert_eq!(game.state.grid.tile_at(Cell::new(3, 4)), TileKind::SecretDoor);

        let reveal = ControlState { reveal: true, ..ControlState::default() };
        game.tick(&reveal, 0.016);
        assert_eq!(game.state.grid.tile_at(Cell::new(3, 4)), TileKind::Floor);
        assert!(game.path_field().is_reachable(Cell::new(3, 4)));
    }
}
