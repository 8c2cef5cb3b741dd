//! Per-run input journal streamed to the data directory.

use std::io;
use std::path::{Path, PathBuf};

use delve_core::InputJournal;
use delve_core::journal_file::JournalWriter;
use directories::ProjectDirs;
use tracing::{info, warn};

use crate::APP_NAME;
use crate::app_loop::AcceptedInput;

pub struct RunJournal {
    path: PathBuf,
    writer: Option<JournalWriter>,
}

impl RunJournal {
    pub fn get_default_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("journals");
            path
        })
    }

    pub fn file_name(seed: u64, started_unix_ms: u64) -> String {
        format!("run-{seed}-{started_unix_ms}.jsonl")
    }

    /// Creates the journal file and writes its header.
    pub fn start(dir: &Path, journal: &InputJournal, started_unix_ms: u64) -> io::Result<Self> {
        let path = dir.join(Self::file_name(journal.seed, started_unix_ms));
        let writer = JournalWriter::create(&path, journal)?;
        info!(path = %path.display(), "recording run journal");
        Ok(Self { path, writer: Some(writer) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_recording(&self) -> bool {
        self.writer.is_some()
    }

    /// Appends the frame's accepted inputs. The first write failure stops
    /// recording for the rest of the run.
    pub fn record(&mut self, inputs: &[AcceptedInput]) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        for input in inputs {
            if let Err(error) = writer.append(input.tick, &input.payload) {
                warn!(%error, path = %self.path.display(), "journal write failed; recording stopped");
                self.writer = None;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::journal::InputPayload;
    use delve_core::journal_file::load_journal_from_file;
    use delve_core::{ControlState, GameConfig, ProgressionSnapshot};
    use tempfile::tempdir;

    #[test]
    fn recorded_inputs_load_back() {
        let dir = tempdir().unwrap();
        let header = InputJournal::new(77, 1, ProgressionSnapshot::default(), GameConfig::default());
        let mut journal = RunJournal::start(dir.path(), &header, 1_700_000_000_000).unwrap();
        assert!(journal.is_recording());
        assert!(journal.path().ends_with("run-77-1700000000000.jsonl"));

        let tick = InputPayload::Tick { dt: 0.016, controls: ControlState::default() };
        journal.record(&[
            AcceptedInput { tick: 0, payload: tick },
            AcceptedInput { tick: 1, payload: tick },
        ]);
        journal.record(&[AcceptedInput { tick: 2, payload: InputPayload::Descend }]);

        let loaded = load_journal_from_file(journal.path()).unwrap();
        assert_eq!(loaded.journal.seed, 77);
        assert_eq!(loaded.journal.inputs.len(), 3);
        assert_eq!(loaded.journal.inputs[2].payload, InputPayload::Descend);
    }
}
