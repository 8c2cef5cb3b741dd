//! Headless re-execution of an input journal.

use thiserror::Error;
use tracing::debug;

use crate::config::ConfigError;
use crate::content::content_hash;
use crate::game::Game;
use crate::journal::{InputJournal, InputPayload};
use crate::types::RunOutcome;

#[derive(Debug, Error, PartialEq)]
pub enum ReplayError {
    #[error("journal content hash {recorded:#018x} does not match current content {current:#018x}")]
    ContentMismatch { recorded: u64, current: u64 },
    #[error("input sequence gap: expected {expected}, found {found}")]
    SequenceGap { expected: u64, found: u64 },
    #[error("input {seq} was recorded at tick {recorded}, replay is at tick {actual}")]
    TickMismatch { seq: u64, recorded: u64, actual: u64 },
    #[error("input {seq} descends but the level was not cleared")]
    DescendRejected { seq: u64 },
    #[error("journal config is invalid: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub final_outcome: Option<RunOutcome>,
    pub final_snapshot_hash: u64,
    pub final_tick: u64,
    pub final_depth: u32,
}

/// Rebuilds the game the journal was recorded against and applies every
/// input in order.
pub fn replay_to_end(journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    let current = content_hash();
    if journal.content_hash != current {
        return Err(ReplayError::ContentMismatch { recorded: journal.content_hash, current });
    }
    let mut game = Game::with_depth(
        journal.seed,
        journal.config.clone(),
        journal.progression,
        journal.depth,
    )?;

    for (expected, record) in (0u64..).zip(&journal.inputs) {
        if record.seq != expected {
            return Err(ReplayError::SequenceGap { expected, found: record.seq });
        }
        if record.tick != game.current_tick() {
            return Err(ReplayError::TickMismatch {
                seq: record.seq,
                recorded: record.tick,
                actual: game.current_tick(),
            });
        }
        match record.payload {
            InputPayload::Tick { dt, controls } => {
                game.tick(&controls, dt);
            }
            InputPayload::Descend => {
                game.descend().ok_or(ReplayError::DescendRejected { seq: record.seq })?;
            }
        }
    }

    let result = ReplayResult {
        final_outcome: game.outcome(),
        final_snapshot_hash: game.snapshot_hash(),
        final_tick: game.current_tick(),
        final_depth: game.state().depth,
    };
    debug!(inputs = journal.inputs.len(), hash = result.final_snapshot_hash, "replay finished");
    Ok(result)
}

#[cfg(test)]
mod tests;
