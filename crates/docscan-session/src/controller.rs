// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan controller: drives one session from the scan button to the share
// sheet.
//
// Capture and encoding problems end up in the session state, not in the
// `Result` of `scan()`: callers look at the state to decide what to show.
// Only requests the state machine refuses (scan while scanning, export with
// nothing scanned) and storage/export failures come back as errors.

use std::path::Path;

use docscan_bridge::{CaptureOutcome, PlatformBridge, capture_channel};
use docscan_core::error::{CaptureError, DocScanError, Result, SessionError};
use docscan_core::ScanConfig;
use docscan_document::PageAssembler;
use docscan_store::{ArtifactStore, TempArtifactHandle};
use tracing::{info, instrument, warn};

use crate::state::{NextStep, ScanSession, SessionState};

/// Owns the session, the assembler, the store and the platform bridge.
pub struct ScanController {
    bridge: Box<dyn PlatformBridge>,
    assembler: PageAssembler,
    store: ArtifactStore,
    session: ScanSession,
    /// Name suggested to the export surface.
    export_name: String,
}

impl ScanController {
    pub fn new(bridge: Box<dyn PlatformBridge>, config: &ScanConfig, store: ArtifactStore) -> Self {
        Self {
            bridge,
            assembler: PageAssembler::from_config(config),
            store,
            session: ScanSession::new(config.end_of_session),
            export_name: config.export_file_name.clone(),
        }
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn platform_name(&self) -> &str {
        self.bridge.platform_name()
    }

    /// Run one capture session to completion.
    ///
    /// Suspends only while the capture source is open. Returns the settled
    /// state.
    #[instrument(skip(self), fields(platform = self.bridge.platform_name()))]
    pub async fn scan(&mut self) -> Result<&SessionState> {
        let session_id = self.session.begin()?;
        let (completion, receiver) = capture_channel();

        let outcome = match self.bridge.start_capture(completion) {
            Ok(()) => receiver.outcome().await,
            Err(e) => {
                warn!(session = %session_id, error = %e, "capture source failed to start");
                CaptureOutcome::Failed(start_failure(e))
            }
        };

        self.session.complete(outcome, &self.assembler);
        Ok(self.session.state())
    }

    /// Write the scanned PDF to the temporary slot.
    pub fn save(&mut self) -> Result<TempArtifactHandle> {
        let artifact = self
            .session
            .state()
            .artifact()
            .ok_or(SessionError::NothingToExport)?;
        Ok(self.store.save(artifact)?)
    }

    /// Save the scanned PDF, then hand it to the export surface. The session
    /// state does not change.
    #[instrument(skip(self))]
    pub fn export(&mut self) -> Result<TempArtifactHandle> {
        let artifact = self
            .session
            .state()
            .artifact()
            .ok_or(SessionError::NothingToExport)?;
        let handle = self.store.save(artifact)?;
        self.bridge.export(artifact, &self.export_name)?;
        info!(path = %handle.path().display(), name = %self.export_name, "PDF offered for export");
        Ok(handle)
    }

    pub fn next_step(&self) -> NextStep {
        self.session.next_step()
    }

    /// Back to Idle for another scan.
    pub fn reset(&mut self) -> Result<()> {
        Ok(self.session.reset()?)
    }

    /// Best-effort removal of the temporary PDF; `backup` is used when this
    /// process has not saved anything (e.g. a previous run's leftover).
    pub fn cleanup(&self, backup: Option<&Path>) -> bool {
        self.store.cleanup(backup)
    }
}

/// A capture source that could not even start still ends the session.
fn start_failure(err: DocScanError) -> CaptureError {
    match err {
        DocScanError::Capture(e) => e,
        DocScanError::PlatformUnavailable => CaptureError::Unsupported,
        other => CaptureError::Device(other.to_string()),
    }
}
