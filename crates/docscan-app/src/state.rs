// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// UI state: what the scan screen renders, derived from the session.

use docscan_core::human_errors::HumanError;
use docscan_session::SessionState;

/// Screen-level projection of `SessionState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanView {
    Idle,
    Scanning,
    /// A PDF is ready to share.
    Ready { pages: usize, bytes: usize },
    Cancelled,
    Failed(HumanError),
}

impl ScanView {
    pub fn from_state(state: &SessionState) -> Self {
        match state {
            SessionState::Idle => Self::Idle,
            SessionState::Scanning => Self::Scanning,
            SessionState::Succeeded(artifact) => Self::Ready {
                pages: artifact.page_count(),
                bytes: artifact.bytes().len(),
            },
            SessionState::Cancelled => Self::Cancelled,
            SessionState::Failed(failure) => Self::Failed(failure.humanize()),
        }
    }

    /// The scan button is only offered from Idle.
    pub fn can_scan(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Shared state accessible to the scan screen via `use_context`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub view: ScanView,
    /// Status line under the main action (export result, errors).
    pub status_message: Option<String>,
    /// An export is being written.
    pub exporting: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: ScanView::Idle,
            status_message: None,
            exporting: false,
        }
    }
}
