// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One-shot completion channel for capture sessions.
//
// Platform scanners report through delegate callbacks, and nothing stops a
// delegate from firing more than one of them. The sender side therefore
// lives in a shared `Option` slot: the first signal takes it and is
// delivered, every later signal finds the slot empty and is dropped. The
// receiver side resolves exactly once.

use std::sync::{Arc, Mutex};

use docscan_core::PageImage;
use docscan_core::error::CaptureError;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// The single result of one capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Pages in scan order.
    Pages(Vec<PageImage>),
    /// The user backed out of the scanner.
    Cancelled,
    /// The scanner reported an error.
    Failed(CaptureError),
}

impl CaptureOutcome {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Pages(_) => "pages",
            Self::Cancelled => "cancelled",
            Self::Failed(_) => "failed",
        }
    }
}

/// Create a linked completion/receiver pair for one capture session.
pub fn capture_channel() -> (CaptureCompletion, CaptureReceiver) {
    let (tx, rx) = oneshot::channel();
    (
        CaptureCompletion {
            slot: Arc::new(Mutex::new(Some(tx))),
        },
        CaptureReceiver { rx },
    )
}

/// Handed to the capture source. Cheap to clone; only the first signal
/// across all clones is delivered.
#[derive(Debug, Clone)]
pub struct CaptureCompletion {
    slot: Arc<Mutex<Option<oneshot::Sender<CaptureOutcome>>>>,
}

impl CaptureCompletion {
    /// Deliver `outcome`. Returns `false` if a signal was already delivered.
    pub fn finish(&self, outcome: CaptureOutcome) -> bool {
        let sender = match self.slot.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match sender {
            Some(tx) => {
                let kind = outcome.kind();
                if tx.send(outcome).is_err() {
                    debug!(kind, "capture receiver already dropped");
                }
                debug!(kind, "capture session completed");
                true
            }
            None => {
                warn!(kind = outcome.kind(), "ignoring capture signal after completion");
                false
            }
        }
    }

    pub fn pages(&self, pages: Vec<PageImage>) -> bool {
        self.finish(CaptureOutcome::Pages(pages))
    }

    pub fn cancel(&self) -> bool {
        self.finish(CaptureOutcome::Cancelled)
    }

    pub fn fail(&self, error: CaptureError) -> bool {
        self.finish(CaptureOutcome::Failed(error))
    }

    /// Whether a signal has already been delivered.
    pub fn is_finished(&self) -> bool {
        match self.slot.lock() {
            Ok(guard) => guard.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }
}

/// Awaited by whoever started the session.
#[derive(Debug)]
pub struct CaptureReceiver {
    rx: oneshot::Receiver<CaptureOutcome>,
}

impl CaptureReceiver {
    /// Wait for the session to end.
    ///
    /// A source that drops every completion handle without signalling has
    /// ended the session without producing anything, which reads as a
    /// cancellation.
    pub async fn outcome(self) -> CaptureOutcome {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!("capture source went away without reporting; treating as cancelled");
                CaptureOutcome::Cancelled
            }
        }
    }
}
