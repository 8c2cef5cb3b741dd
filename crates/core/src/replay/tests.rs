use super::*;
use crate::config::GameConfig;
use crate::input::ControlState;
use crate::progression::ProgressionSnapshot;

const DT: f32 = 1.0 / 60.0;

fn scripted_controls(step: u64) -> ControlState {
    ControlState {
        move_y: if step % 40 < 25 { 1.0 } else { -0.5 },
        look_x: if step % 90 < 30 { 0.6 } else { 0.0 },
        primary: step % 7 == 0,
        next_ability: step == 50,
        pause: step == 120,
        reveal: step % 30 == 0,
        ..ControlState::default()
    }
}

/// Plays a scripted run while recording it, returning the live game too.
fn record_run(seed: u64, steps: u64) -> (Game, InputJournal) {
    let progression = ProgressionSnapshot::default();
    let config = GameConfig::default();
    let mut game = Game::new(seed, config.clone(), progression).unwrap();
    let mut journal = InputJournal::new(seed, 1, progression, config);
    for step in 0..steps {
        let controls = scripted_controls(step);
        journal.record_tick(game.current_tick(), DT, controls);
        game.tick(&controls, DT);
    }
    (game, journal)
}

#[test]
fn replay_matches_live_run() {
    let (live, journal) = record_run(4242, 300);
    let result = replay_to_end(&journal).unwrap();

    assert_eq!(result.final_snapshot_hash, live.snapshot_hash());
    assert_eq!(result.final_tick, live.current_tick());
    assert_eq!(result.final_outcome, live.outcome());
    assert_eq!(result.final_depth, 1);
}

#[test]
fn pause_inputs_do_not_advance_the_tick() {
    let mut journal =
        InputJournal::new(7, 1, ProgressionSnapshot::default(), GameConfig::default());
    let paused = ControlState { pause: true, ..ControlState::default() };
    for tick in 0..4 {
        journal.record_tick(tick, DT, ControlState::default());
    }
    journal.record_tick(4, DT, paused);
    journal.record_tick(4, DT, ControlState::default());
    assert_eq!(replay_to_end(&journal).unwrap().final_tick, 5);
}

#[test]
fn replay_is_repeatable() {
    let (_, journal) = record_run(99, 200);
    assert_eq!(replay_to_end(&journal), replay_to_end(&journal));
}

#[test]
fn content_mismatch_is_rejected() {
    let (_, mut journal) = record_run(1, 10);
    journal.content_hash ^= 1;
    assert!(matches!(replay_to_end(&journal), Err(ReplayError::ContentMismatch { .. })));
}

#[test]
fn sequence_gap_is_rejected() {
    let (_, mut journal) = record_run(1, 10);
    journal.inputs.remove(4);
    assert_eq!(
        replay_to_end(&journal),
        Err(ReplayError::SequenceGap { expected: 4, found: 5 })
    );
}

#[test]
fn tick_mismatch_is_rejected() {
    let (_, mut journal) = record_run(1, 10);
    journal.inputs[3].tick = 9;
    assert_eq!(
        replay_to_end(&journal),
        Err(ReplayError::TickMismatch { seq: 3, recorded: 9, actual: 3 })
    );
}

#[test]
fn descend_before_clear_is_rejected() {
    let (_, mut journal) = record_run(1, 5);
    journal.record_descend(5);
    assert_eq!(replay_to_end(&journal), Err(ReplayError::DescendRejected { seq: 5 }));
}

#[test]
fn invalid_config_is_reported() {
    let (_, mut journal) = record_run(1, 0);
    journal.config.grid_size = 4;
    assert!(matches!(replay_to_end(&journal), Err(ReplayError::Config(_))));
}

#[test]
fn replay_starts_at_the_recorded_depth() {
    let mut journal =
        InputJournal::new(3, 4, ProgressionSnapshot::default(), GameConfig::default());
    journal.record_tick(0, DT, ControlState::default());
    let result = replay_to_end(&journal).unwrap();
    assert_eq!(result.final_depth, 4);
    assert_eq!(result.final_tick, 1);
}
