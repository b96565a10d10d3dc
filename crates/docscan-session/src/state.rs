// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan session state machine.
//
//   Idle --begin--> Scanning --complete--> Succeeded | Cancelled | Failed
//
// Only a capture outcome moves a session out of Scanning, and only the
// first one counts. Cancelled and Failed are terminal; the configured
// `SessionEndPolicy` says whether the app goes back to Idle or exits.

use chrono::{DateTime, Utc};
use docscan_bridge::CaptureOutcome;
use docscan_core::config::SessionEndPolicy;
use docscan_core::error::{AssemblyError, CaptureError, SessionError};
use docscan_core::human_errors::{HumanError, humanize_assembly, humanize_capture};
use docscan_core::{DocumentArtifact, SessionId};
use docscan_document::PageAssembler;
use thiserror::Error;
use tracing::{info, warn};

/// Why a session ended in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionFailure {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

impl SessionFailure {
    /// Diagnostic for the scan screen.
    pub fn humanize(&self) -> HumanError {
        match self {
            Self::Capture(e) => humanize_capture(e),
            Self::Assembly(e) => humanize_assembly(e),
        }
    }
}

/// Where a session currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Scanning,
    Succeeded(DocumentArtifact),
    Cancelled,
    Failed(SessionFailure),
}

impl SessionState {
    /// Succeeded, Cancelled or Failed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Cancelled | Self::Failed(_))
    }

    pub fn artifact(&self) -> Option<&DocumentArtifact> {
        match self {
            Self::Succeeded(artifact) => Some(artifact),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Scanning => "scanning",
            Self::Succeeded(_) => "succeeded",
            Self::Cancelled => "cancelled",
            Self::Failed(_) => "failed",
        }
    }
}

/// What the application should do once a session has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Keep showing the current state.
    Stay,
    /// Reset to Idle and offer the scan button again.
    ResetToIdle,
    /// Quit the application.
    Exit,
}

/// One scan session at a time.
#[derive(Debug)]
pub struct ScanSession {
    id: SessionId,
    state: SessionState,
    policy: SessionEndPolicy,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl ScanSession {
    pub fn new(policy: SessionEndPolicy) -> Self {
        Self {
            id: SessionId::new(),
            state: SessionState::Idle,
            policy,
            started_at: None,
            finished_at: None,
        }
    }

    /// Id of the current (or most recent) session.
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Idle → Scanning. Each session gets a fresh id.
    pub fn begin(&mut self) -> Result<SessionId, SessionError> {
        match self.state {
            SessionState::Idle => {
                self.id = SessionId::new();
                self.state = SessionState::Scanning;
                self.started_at = Some(Utc::now());
                self.finished_at = None;
                info!(session = %self.id, "scan session started");
                Ok(self.id)
            }
            SessionState::Scanning => Err(SessionError::ScanInProgress),
            _ => Err(SessionError::SessionFinished),
        }
    }

    /// Apply the capture outcome. Pages are assembled with `assembler`; an
    /// empty page list means nothing was captured and counts as a
    /// cancellation.
    ///
    /// Returns `false` (and changes nothing) unless the session is Scanning.
    pub fn complete(&mut self, outcome: CaptureOutcome, assembler: &PageAssembler) -> bool {
        if self.state != SessionState::Scanning {
            warn!(
                session = %self.id,
                state = self.state.label(),
                outcome = outcome.kind(),
                "ignoring capture outcome outside of a scan"
            );
            return false;
        }

        self.state = match outcome {
            CaptureOutcome::Pages(pages) if pages.is_empty() => SessionState::Cancelled,
            CaptureOutcome::Pages(pages) => match assembler.assemble(&pages) {
                Ok(artifact) => SessionState::Succeeded(artifact),
                Err(e) => SessionState::Failed(e.into()),
            },
            CaptureOutcome::Cancelled => SessionState::Cancelled,
            CaptureOutcome::Failed(e) => SessionState::Failed(e.into()),
        };
        self.finished_at = Some(Utc::now());

        match &self.state {
            SessionState::Failed(failure) => {
                warn!(session = %self.id, error = %failure, "scan session failed")
            }
            state => info!(
                session = %self.id,
                state = state.label(),
                pages = state.artifact().map_or(0, DocumentArtifact::page_count),
                "scan session finished"
            ),
        }
        true
    }

    /// Policy decision for the current state.
    pub fn next_step(&self) -> NextStep {
        match (&self.state, self.policy) {
            (SessionState::Cancelled | SessionState::Failed(_), SessionEndPolicy::Exit) => {
                NextStep::Exit
            }
            (SessionState::Cancelled | SessionState::Failed(_), SessionEndPolicy::ReturnToIdle) => {
                NextStep::ResetToIdle
            }
            _ => NextStep::Stay,
        }
    }

    /// Back to Idle. Refused while a capture is in flight.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Scanning {
            return Err(SessionError::ScanInProgress);
        }
        self.state = SessionState::Idle;
        Ok(())
    }
}
