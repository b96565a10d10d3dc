// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Advisory key-value preferences persisted as a small JSON file.
//
// Reads and writes are plain whole-file operations with no locking or
// transactions. The only value kept here is the last artifact path, which
// is a hint for cleanup and never required for correctness.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use docscan_core::error::StoreError;
use tracing::{debug, warn};

/// Key for the path of the most recently saved artifact.
pub const LAST_ARTIFACT_PATH: &str = "last_artifact_path";

/// File name of the preferences file inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// String key-value slots backed by a JSON file.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
}

impl Preferences {
    /// Preferences stored at `path`. The file is created on first write.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Preferences stored in `data_dir/preferences.json`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::at(data_dir.join(PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a value. A missing or unreadable file reads as empty.
    pub fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    /// Write a value, keeping the other keys.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.load();
        values.insert(key.to_owned(), value.to_owned());
        let json = serde_json::to_string_pretty(&values)
            .map_err(|e| StoreError::Preferences(format!("serialize: {e}")))?;
        std::fs::write(&self.path, json).map_err(|e| {
            StoreError::Preferences(format!("write {}: {e}", self.path.display()))
        })?;
        debug!(key, "preference written");
        Ok(())
    }

    /// The recorded last artifact path, if any.
    pub fn last_artifact_path(&self) -> Option<PathBuf> {
        self.get(LAST_ARTIFACT_PATH)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    fn load(&self) -> BTreeMap<String, String> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(_) => return BTreeMap::new(),
        };
        serde_json::from_str(&data).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "ignoring corrupt preferences file");
            BTreeMap::new()
        })
    }
}
