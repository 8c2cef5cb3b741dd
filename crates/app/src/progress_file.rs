//! JSON-backed progression store.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use delve_core::{MemoryStore, ProgressionSnapshot, ProgressionStore};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::APP_NAME;

const PROGRESS_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct ProgressDocument {
    format_version: u32,
    values: BTreeMap<String, i64>,
}

/// Key/value counters persisted as one JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressFile {
    store: MemoryStore,
}

impl ProgressFile {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("progress.json");
            path
        })
    }

    /// Missing file means a fresh profile.
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(error) => return Err(error),
        };
        let document: ProgressDocument = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        debug!(path = %path.display(), keys = document.values.len(), "progress loaded");
        Ok(Self { store: document.values.into_iter().collect() })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let document = ProgressDocument {
            format_version: PROGRESS_FORMAT_VERSION,
            values: self.store.entries().map(|(key, value)| (key.to_string(), value)).collect(),
        };
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&document).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn snapshot(&self) -> ProgressionSnapshot {
        ProgressionSnapshot::load(self)
    }

    /// Folds `snapshot` into the store and writes it out.
    pub fn save_snapshot(&mut self, snapshot: &ProgressionSnapshot, path: &Path) -> io::Result<()> {
        snapshot.write(self);
        self.write_atomic(path)
    }
}

impl ProgressionStore for ProgressFile {
    fn get(&self, key: &str) -> i64 {
        self.store.get(key)
    }

    fn set(&mut self, key: &str, value: i64) {
        self.store.set(key, value);
    }
}
