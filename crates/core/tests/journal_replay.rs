use delve_core::journal_file::{JournalWriter, load_journal_from_file, save_journal_to_file};
use delve_core::replay::replay_to_end;
use delve_core::{ControlState, Game, GameConfig, InputJournal, InputPayload, ProgressionSnapshot};

const DT: f32 = 1.0 / 60.0;

fn patrol(step: u32) -> ControlState {
    ControlState {
        move_y: 1.0,
        look_x: if (step / 45) % 2 == 0 { 0.8 } else { -0.4 },
        primary: step % 5 == 0,
        reveal: step % 20 == 0,
        ..ControlState::default()
    }
}

/// Play a run while streaming every input to a JSONL file, then load the
/// file and replay it. The snapshot hash must match the live game.
#[test]
fn test_file_journal_replay_equivalence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("replay_equiv.jsonl");
    let seed = 12345u64;
    let progression = ProgressionSnapshot::default();
    let config = GameConfig::default();

    let mut game = Game::new(seed, config.clone(), progression).unwrap();
    let header = InputJournal::new(seed, 1, progression, config);
    let mut writer = JournalWriter::create(&path, &header).unwrap();
    for step in 0..240 {
        let controls = patrol(step);
        let payload = InputPayload::Tick { dt: DT, controls };
        writer.append(game.current_tick(), &payload).unwrap();
        game.tick(&controls, DT);
    }
    drop(writer);

    let loaded = load_journal_from_file(&path).unwrap();
    assert_eq!(loaded.journal.inputs.len(), 240);
    let result = replay_to_end(&loaded.journal).unwrap();
    assert_eq!(result.final_snapshot_hash, game.snapshot_hash());
    assert_eq!(result.final_tick, game.current_tick());
    assert_eq!(result.final_outcome, game.outcome());
}

/// A crashed session resumes appending to the same file and the combined
/// journal still replays to the live state.
#[test]
fn test_resumed_journal_replays_whole_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumed.jsonl");
    let seed = 808u64;
    let progression = ProgressionSnapshot::default();
    let config = GameConfig::default();

    let mut game = Game::new(seed, config.clone(), progression).unwrap();
    let mut writer =
        JournalWriter::create(&path, &InputJournal::new(seed, 1, progression, config)).unwrap();
    for step in 0..100 {
        let controls = patrol(step);
        writer.append(game.current_tick(), &InputPayload::Tick { dt: DT, controls }).unwrap();
        game.tick(&controls, DT);
    }
    drop(writer);

    let loaded = load_journal_from_file(&path).unwrap();
    let mut writer = JournalWriter::resume(&path, loaded.tip).unwrap();
    for step in 100..200 {
        let controls = patrol(step);
        writer.append(game.current_tick(), &InputPayload::Tick { dt: DT, controls }).unwrap();
        game.tick(&controls, DT);
    }
    drop(writer);

    let reloaded = load_journal_from_file(&path).unwrap();
    assert_eq!(reloaded.tip.next_seq, 200);
    let result = replay_to_end(&reloaded.journal).unwrap();
    assert_eq!(result.final_snapshot_hash, game.snapshot_hash());
}

#[test]
fn test_saved_journal_replays_identically_to_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.jsonl");
    let progression = ProgressionSnapshot::default();

    let mut journal = InputJournal::new(31, 2, progression, GameConfig::default());
    for step in 0..150 {
        journal.record_tick(step as u64, DT, patrol(step));
    }
    save_journal_to_file(&path, &journal).unwrap();

    let loaded = load_journal_from_file(&path).unwrap();
    assert_eq!(replay_to_end(&loaded.journal), replay_to_end(&journal));
}
