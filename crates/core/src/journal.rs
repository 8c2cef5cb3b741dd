//! In-memory input journal: everything needed to rebuild a run exactly.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::content::content_hash;
use crate::input::ControlState;
use crate::progression::ProgressionSnapshot;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    pub content_hash: u64,
    pub seed: u64,
    /// Depth the run started at.
    pub depth: u32,
    pub progression: ProgressionSnapshot,
    pub config: GameConfig,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    /// Game tick at which the input was applied.
    pub tick: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputPayload {
    /// One call to `Game::tick`.
    Tick { dt: f32, controls: ControlState },
    /// One call to `Game::descend` after a cleared level.
    Descend,
}

impl InputJournal {
    pub fn new(seed: u64, depth: u32, progression: ProgressionSnapshot, config: GameConfig) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: env!("CARGO_PKG_VERSION").to_string(),
            content_hash: content_hash(),
            seed,
            depth,
            progression,
            config,
            inputs: Vec::new(),
        }
    }

    pub fn next_seq(&self) -> u64 {
        self.inputs.len() as u64
    }

    /// Appends an input and returns the stored record.
    pub fn record(&mut self, tick: u64, payload: InputPayload) -> &InputRecord {
        let seq = self.next_seq();
        self.inputs.push(InputRecord { seq, tick, payload });
        &self.inputs[self.inputs.len() - 1]
    }

    pub fn record_tick(&mut self, tick: u64, dt: f32, controls: ControlState) {
        self.record(tick, InputPayload::Tick { dt, controls });
    }

    pub fn record_descend(&mut self, tick: u64) {
        self.record(tick, InputPayload::Descend);
    }
}
