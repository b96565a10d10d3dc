// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Temporary artifact store.
//
// Exactly one slot exists: `<dir>/<file_name>`. Saving again overwrites it in
// place. The store remembers the last handle it wrote and, if configured,
// mirrors that path into the preferences file so a later run can clean up
// after this one.

use std::io::Write;
use std::path::{Path, PathBuf};

use docscan_core::error::StoreError;
use docscan_core::{DocumentArtifact, ScanConfig};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

use crate::integrity::{file_matches, hash_bytes};
use crate::preferences::{LAST_ARTIFACT_PATH, Preferences};

/// Where the last artifact was written, with what it contained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempArtifactHandle {
    path: PathBuf,
    len: u64,
    sha256: String,
}

impl TempArtifactHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size in bytes at the time of writing.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Lowercase hex SHA-256 of the written bytes.
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Whether the file on disk still holds exactly what was written.
    pub fn verify(&self) -> bool {
        file_matches(&self.path, &self.sha256)
    }
}

/// Owns the single on-disk copy of the most recent artifact.
#[derive(Debug)]
pub struct ArtifactStore {
    /// Directory holding the slot.
    dir: PathBuf,
    /// Fixed file name of the slot.
    file_name: String,
    /// Handle from the last successful save. Never cleared by `delete`.
    current: Option<TempArtifactHandle>,
    /// Optional advisory mirror of `current`'s path.
    preferences: Option<Preferences>,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
            current: None,
            preferences: None,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.temp_dir(), config.export_file_name.clone())
    }

    /// Record every saved path in `preferences` as well.
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// The fixed location every save writes to.
    pub fn slot_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    pub fn current_handle(&self) -> Option<&TempArtifactHandle> {
        self.current.as_ref()
    }

    /// Write `artifact` to the slot, replacing whatever is there.
    ///
    /// The bytes go to a temporary file next to the slot which is then
    /// renamed over it, so the slot never holds a partial PDF. On failure the
    /// previous handle (if any) is left untouched.
    #[instrument(skip_all, fields(pages = artifact.page_count(), bytes = artifact.bytes().len()))]
    pub fn save(&mut self, artifact: &DocumentArtifact) -> Result<TempArtifactHandle, StoreError> {
        let path = self.slot_path();
        let write_failed = |source| StoreError::WriteFailed {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(write_failed)?;
        let mut staged = NamedTempFile::new_in(&self.dir).map_err(write_failed)?;
        staged.write_all(artifact.bytes()).map_err(write_failed)?;
        staged.as_file().sync_all().map_err(write_failed)?;
        staged.persist(&path).map_err(|e| write_failed(e.error))?;

        let handle = TempArtifactHandle {
            path: path.clone(),
            len: artifact.bytes().len() as u64,
            sha256: hash_bytes(artifact.bytes()),
        };
        info!(path = %path.display(), sha256 = %handle.sha256, "PDF saved");

        if let Some(prefs) = &self.preferences {
            if let Err(e) = prefs.set(LAST_ARTIFACT_PATH, &path.to_string_lossy()) {
                warn!(error = %e, "could not record last artifact path");
            }
        }

        self.current = Some(handle.clone());
        Ok(handle)
    }

    /// Remove the file behind the current handle, or `backup` when nothing
    /// has been saved in this process.
    #[instrument(skip(self))]
    pub fn delete(&self, backup: Option<&Path>) -> Result<(), StoreError> {
        let target = match &self.current {
            Some(handle) => handle.path.clone(),
            None => match backup {
                Some(path) => path.to_path_buf(),
                None => return Err(StoreError::NotFound { path: None }),
            },
        };

        match std::fs::remove_file(&target) {
            Ok(()) => {
                info!(path = %target.display(), "PDF deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %target.display(), "nothing to delete");
                Err(StoreError::NotFound { path: Some(target) })
            }
            Err(source) => Err(StoreError::RemoveFailed {
                path: target,
                source,
            }),
        }
    }

    /// `delete`, with failures logged rather than returned. Returns whether
    /// a file was removed.
    pub fn cleanup(&self, backup: Option<&Path>) -> bool {
        match self.delete(backup) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to delete PDF");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docscan_core::config::DEFAULT_FILE_NAME;

    fn artifact(bytes: &[u8]) -> DocumentArtifact {
        DocumentArtifact::new(bytes.to_vec(), 1, "Scanned Document")
    }

    #[test]
    fn save_writes_fixed_slot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = ArtifactStore::new(dir.path(), DEFAULT_FILE_NAME);

        let handle = store.save(&artifact(b"%PDF-1.7 one")).expect("save");
        assert_eq!(handle.path(), dir.path().join("Scanned Document.pdf"));
        assert_eq!(handle.len(), 12);
        assert!(handle.exists());
        assert!(handle.verify());
        assert_eq!(store.current_handle(), Some(&handle));
    }

    #[test]
    fn second_save_overwrites_same_slot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = ArtifactStore::new(dir.path(), DEFAULT_FILE_NAME);

        let first = store.save(&artifact(b"first")).expect("save 1");
        let second = store.save(&artifact(b"second, longer")).expect("save 2");

        assert_eq!(first.path(), second.path());
        assert_ne!(first.sha256(), second.sha256());
        assert!(!first.verify(), "old contents are gone");
        assert_eq!(std::fs::read(second.path()).unwrap(), b"second, longer");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn delete_then_delete_again_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = ArtifactStore::new(dir.path(), DEFAULT_FILE_NAME);
        let handle = store.save(&artifact(b"%PDF")).expect("save");

        store.delete(None).expect("first delete");
        assert!(!handle.exists());

        match store.delete(None) {
            Err(StoreError::NotFound { path }) => assert_eq!(path.as_deref(), Some(handle.path())),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn delete_without_handle_uses_backup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let leftover = dir.path().join("leftover.pdf");
        std::fs::write(&leftover, b"%PDF old run").expect("write leftover");

        let store = ArtifactStore::new(dir.path(), DEFAULT_FILE_NAME);
        store.delete(Some(&leftover)).expect("delete via backup");
        assert!(!leftover.exists());
    }

    #[test]
    fn handle_takes_precedence_over_backup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let other = dir.path().join("other.pdf");
        std::fs::write(&other, b"keep me").expect("write other");

        let mut store = ArtifactStore::new(dir.path(), DEFAULT_FILE_NAME);
        let handle = store.save(&artifact(b"%PDF")).expect("save");
        store.delete(Some(&other)).expect("delete");

        assert!(!handle.exists());
        assert!(other.exists());
    }

    #[test]
    fn delete_with_nothing_to_resolve_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ArtifactStore::new(dir.path(), DEFAULT_FILE_NAME);
        assert!(matches!(
            store.delete(None),
            Err(StoreError::NotFound { path: None })
        ));
        assert!(!store.cleanup(Some(&dir.path().join("missing.pdf"))));
    }

    #[test]
    fn failed_write_records_no_handle() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A regular file where the directory should be.
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").expect("write blocker");

        let mut store = ArtifactStore::new(&blocker, DEFAULT_FILE_NAME);
        let err = store.save(&artifact(b"%PDF")).unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed { .. }));
        assert!(store.current_handle().is_none());
    }

    #[test]
    fn failed_replace_keeps_slot_and_handle_clean() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = ArtifactStore::new(dir.path(), DEFAULT_FILE_NAME);
        let first = store.save(&artifact(b"%PDF first")).expect("save");

        // Something that cannot be renamed over now occupies the slot.
        std::fs::remove_file(first.path()).expect("remove");
        std::fs::create_dir(first.path()).expect("mkdir at slot");
        std::fs::write(first.path().join("keep"), b"").expect("fill dir");

        let err = store.save(&artifact(b"%PDF second")).unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed { .. }));
        assert_eq!(store.current_handle(), Some(&first));

        // The staged copy is gone; only the occupied slot remains.
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from(DEFAULT_FILE_NAME)]);
    }

    #[test]
    fn save_mirrors_path_into_preferences() {
        let dir = tempfile::tempdir().expect("tempdir");
        let prefs = Preferences::in_dir(dir.path());
        let mut store =
            ArtifactStore::new(dir.path().join("tmp"), DEFAULT_FILE_NAME).with_preferences(prefs.clone());

        let handle = store.save(&artifact(b"%PDF")).expect("save");
        assert_eq!(prefs.last_artifact_path().as_deref(), Some(handle.path()));
    }
}
