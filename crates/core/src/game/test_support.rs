//! Shared fixtures for the `game` submodule tests.

use super::*;
use crate::input::ControlState;
use crate::mapgen::GeneratedLevel;

pub(super) fn new_game(seed: u64) -> Game {
    Game::new(seed, GameConfig::default(), ProgressionSnapshot::default()).unwrap()
}

pub(super) fn game_at_depth(seed: u64, depth: u32) -> Game {
    Game::with_depth(seed, GameConfig::default(), ProgressionSnapshot::default(), depth).unwrap()
}

/// Empty 16x16 room with the player at (3.5, 3.5) facing east and no
/// enemies, items or chests.
pub(super) fn open_room_game() -> Game {
    open_room_game_with(ProgressionSnapshot::default())
}

pub(super) fn open_room_game_with(progression: ProgressionSnapshot) -> Game {
    let mut game = Game::new(1, GameConfig::default(), progression).unwrap();
    game.install_generated(GeneratedLevel {
        depth: 1,
        grid: DungeonGrid::open_room(16, 16),
        spawn_cell: Cell::new(3, 3),
        room_count: 0,
        secret_rooms: Vec::new(),
        is_boss_level: false,
        enemy_spawns: Vec::new(),
        item_spawns: Vec::new(),
        chest_spawns: Vec::new(),
    });
    game.log.clear();
    game
}

pub(super) fn add_enemy(game: &mut Game, kind: EnemyKind, pos: Vec2) -> EnemyId {
    game.state.enemies.insert(Enemy::spawn(kind, pos, 1.0))
}

pub(super) fn idle() -> ControlState {
    ControlState::default()
}

pub(super) fn kill_events(game: &Game) -> usize {
    game.log().iter().filter(|event| matches!(event, LogEvent::EnemyKilled { .. })).count()
}
