//! Run journals on disk, one JSON object per line.
//!
//! The first line is the run header: everything in [`InputJournal`] except
//! the inputs. Every following line is one [`InputRecord`] plus two SHA-256
//! links, `prev` and `sha256`. A record's hash covers its own JSON body and
//! the previous record's hash, so an edited, dropped or reordered line breaks
//! the chain at that line. Records are flushed as they are written and a
//! crash can at worst leave a partial last line, which loading reports.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::journal::{InputJournal, InputPayload, InputRecord};
use crate::progression::ProgressionSnapshot;

/// `prev` of the first record.
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Serialize, Deserialize)]
struct RunHeader {
    format_version: u16,
    build_id: String,
    content_hash: u64,
    seed: u64,
    depth: u32,
    progression: ProgressionSnapshot,
    config: GameConfig,
}

impl RunHeader {
    fn of(journal: &InputJournal) -> Self {
        Self {
            format_version: journal.format_version,
            build_id: journal.build_id.clone(),
            content_hash: journal.content_hash,
            seed: journal.seed,
            depth: journal.depth,
            progression: journal.progression,
            config: journal.config.clone(),
        }
    }

    fn into_journal(self) -> InputJournal {
        InputJournal {
            format_version: self.format_version,
            build_id: self.build_id,
            content_hash: self.content_hash,
            seed: self.seed,
            depth: self.depth,
            progression: self.progression,
            config: self.config,
            inputs: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ChainedRecord {
    #[serde(flatten)]
    record: InputRecord,
    prev: String,
    sha256: String,
}

fn link_hash(record: &InputRecord, prev: &str) -> serde_json::Result<String> {
    let body = serde_json::to_vec(record)?;
    let digest = Sha256::new().chain_update(&body).chain_update(prev.as_bytes()).finalize();
    Ok(format!("{digest:064x}"))
}

/// Where appending continues in an existing journal file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainTip {
    pub next_seq: u64,
    pub last_hash: String,
}

impl Default for ChainTip {
    fn default() -> Self {
        Self { next_seq: 0, last_hash: GENESIS_HASH.to_string() }
    }
}

/// Appends applied inputs to a journal file, extending the hash chain.
pub struct JournalWriter {
    out: BufWriter<File>,
    tip: ChainTip,
}

impl JournalWriter {
    /// Creates (or truncates) `path` and writes the header of `journal`.
    /// Inputs already held by `journal` are not written.
    pub fn create(path: &Path, journal: &InputJournal) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut out, &RunHeader::of(journal))?;
        out.write_all(b"\n")?;
        out.flush()?;
        debug!(path = %path.display(), seed = journal.seed, depth = journal.depth, "journal created");
        Ok(Self { out, tip: ChainTip::default() })
    }

    /// Reopens a loaded journal for appending at `tip`.
    pub fn resume(path: &Path, tip: ChainTip) -> io::Result<Self> {
        let out = BufWriter::new(OpenOptions::new().append(true).open(path)?);
        debug!(path = %path.display(), next_seq = tip.next_seq, "journal resumed");
        Ok(Self { out, tip })
    }

    pub fn next_seq(&self) -> u64 {
        self.tip.next_seq
    }

    /// Writes one input and flushes it.
    pub fn append(&mut self, tick: u64, payload: &InputPayload) -> io::Result<()> {
        let record = InputRecord { seq: self.tip.next_seq, tick, payload: *payload };
        let sha256 = link_hash(&record, &self.tip.last_hash)?;
        let line = ChainedRecord { record, prev: self.tip.last_hash.clone(), sha256 };
        serde_json::to_writer(&mut self.out, &line)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;

        self.tip = ChainTip { next_seq: self.tip.next_seq + 1, last_hash: line.sha256 };
        Ok(())
    }
}

#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: InputJournal,
    pub tip: ChainTip,
}

#[derive(Debug, Error)]
pub enum JournalLoadError {
    #[error("journal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("journal file is empty")]
    EmptyFile,
    #[error("line {line}: bad journal header: {message}")]
    InvalidHeader { line: usize, message: String },
    #[error("line {line}: bad journal record: {message}")]
    InvalidRecord { line: usize, message: String },
    #[error("line {line}: expected record {expected}, found {found}")]
    OutOfSequence { line: usize, expected: u64, found: u64 },
    /// The file ended without a trailing newline.
    #[error("line {line}: incomplete record")]
    IncompleteLine { line: usize },
    #[error("line {line}: hash chain broken")]
    HashChainBroken { line: usize },
}

/// Reads and verifies a journal file, failing at the first bad line.
pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = String::new();

    if reader.read_line(&mut line)? == 0 {
        return Err(JournalLoadError::EmptyFile);
    }
    let header: RunHeader = complete_line(&line, 1)
        .and_then(|text| {
            serde_json::from_str(text)
                .map_err(|e| JournalLoadError::InvalidHeader { line: 1, message: e.to_string() })
        })?;
    let mut journal = header.into_journal();
    let mut tip = ChainTip::default();

    for number in 2.. {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let text = complete_line(&line, number)?;
        let chained: ChainedRecord = serde_json::from_str(text).map_err(|e| {
            JournalLoadError::InvalidRecord { line: number, message: e.to_string() }
        })?;
        if chained.record.seq != tip.next_seq {
            return Err(JournalLoadError::OutOfSequence {
                line: number,
                expected: tip.next_seq,
                found: chained.record.seq,
            });
        }
        let expected = link_hash(&chained.record, &tip.last_hash).map_err(|e| {
            JournalLoadError::InvalidRecord { line: number, message: e.to_string() }
        })?;
        if chained.prev != tip.last_hash || chained.sha256 != expected {
            warn!(path = %path.display(), line = number, "journal hash chain broken");
            return Err(JournalLoadError::HashChainBroken { line: number });
        }

        journal.inputs.push(chained.record);
        tip = ChainTip { next_seq: tip.next_seq + 1, last_hash: chained.sha256 };
    }

    debug!(path = %path.display(), inputs = journal.inputs.len(), "journal loaded");
    Ok(LoadedJournal { journal, tip })
}

fn complete_line(raw: &str, number: usize) -> Result<&str, JournalLoadError> {
    let text = raw.strip_suffix('\n').ok_or(JournalLoadError::IncompleteLine { line: number })?;
    let text = text.strip_suffix('\r').unwrap_or(text);
    if text.is_empty() {
        return Err(JournalLoadError::InvalidRecord { line: number, message: "blank line".into() });
    }
    Ok(text)
}

/// Writes a whole in-memory journal to `path`, replacing any existing file.
pub fn save_journal_to_file(path: &Path, journal: &InputJournal) -> io::Result<()> {
    let mut writer = JournalWriter::create(path, journal)?;
    for record in &journal.inputs {
        writer.append(record.tick, &record.payload)?;
    }
    Ok(())
}
