// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recently cloned repositories.
//!
//! ```text
//! <config dir>/gittty/history.json
//!   { "entries": [ { url, path, last_used, count }, ... ] }   most recent first
//!
//! load(path)        missing file -> empty
//! record(url, path) dedupe by URL, bump count, move to front, truncate
//! get(n)            n-th entry as listed, 1-based
//! save(path)        temp file in the same directory + rename
//! ```

use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::HistoryError;

/// Entries kept when nothing else is configured.
pub const DEFAULT_LIMIT: usize = 20;

/// One remembered repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    /// Where it was last cloned to.
    pub path: PathBuf,
    pub last_used: DateTime<Utc>,
    /// Number of successful clones.
    pub count: u32,
}

/// The history document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// `<config dir>/gittty/history.json`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gittty").join("history.json"))
    }

    /// Reads the history at `path`. A missing file is an empty history.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Read` if the file exists but cannot be read,
    /// or `HistoryError::Parse` if it is not a history document.
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no history file yet");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(HistoryError::Read {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| HistoryError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Writes the history to `path`, creating parent directories.
    ///
    /// Readers never observe a half-written file.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Write` if any step of the write fails.
    pub fn save(&self, path: &Path) -> Result<(), HistoryError> {
        let write_error = |source| HistoryError::Write {
            path: path.display().to_string(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_error)?;

        let json = serde_json::to_string_pretty(self).map_err(|e| write_error(e.into()))?;
        let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
        file.write_all(json.as_bytes()).map_err(write_error)?;
        file.as_file().sync_all().map_err(write_error)?;
        file.persist(path).map_err(|e| write_error(e.error))?;

        debug!(path = %path.display(), entries = self.entries.len(), "history saved");
        Ok(())
    }

    /// Remembers a clone of `url` into `path` now, keeping at most `limit`
    /// entries (at least one).
    pub fn record(&mut self, url: &str, path: &Path, limit: usize) {
        self.record_at(url, path, Utc::now(), limit);
    }

    /// Remembers a clone of `url` into `path` at `when`.
    pub fn record_at(&mut self, url: &str, path: &Path, when: DateTime<Utc>, limit: usize) {
        let count = match self.entries.iter().position(|e| e.url == url) {
            Some(index) => self.entries.remove(index).count.saturating_add(1),
            None => 1,
        };
        self.entries.insert(
            0,
            HistoryEntry {
                url: url.to_string(),
                path: path.to_path_buf(),
                last_used: when,
                count,
            },
        );
        self.entries.truncate(limit.max(1));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, most recently used first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entry `number` as listed by `history`, counting from 1.
    #[must_use]
    pub fn get(&self, number: NonZeroUsize) -> Option<&HistoryEntry> {
        self.entries.get(number.get() - 1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
