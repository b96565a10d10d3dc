// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the scan screen.
//
// Every technical error is mapped to plain English with a clear suggestion.
// There is no automatic retry anywhere, so the suggestion is what the user
// can do next.

use crate::error::{AssemblyError, CaptureError, DocScanError, SessionError, StoreError};

/// Shown whenever the only way forward is a fresh start.
pub const RESTART_HINT: &str = "To retry, leave the app and open it again.";

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
}

impl HumanError {
    fn new(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}

/// Convert a `DocScanError` into a `HumanError`.
pub fn humanize_error(err: &DocScanError) -> HumanError {
    match err {
        DocScanError::Capture(capture) => humanize_capture(capture),
        DocScanError::Assembly(assembly) => humanize_assembly(assembly),

        DocScanError::Store(StoreError::WriteFailed { .. }) => HumanError::new(
            "We couldn't save the scanned document.",
            "Your device may be low on storage. Free some space, then leave the app and open it again.",
        ),
        DocScanError::Store(_) => HumanError::new(
            "Something went wrong tidying up old scans.",
            "Your new scan is not affected.",
        ),

        DocScanError::Session(SessionError::ScanInProgress) => HumanError::new(
            "A scan is already open.",
            "Finish or cancel the current scan first.",
        ),
        DocScanError::Session(SessionError::SessionFinished) => {
            HumanError::new("This scan has already finished.", RESTART_HINT)
        }
        DocScanError::Session(SessionError::NothingToExport) => HumanError::new(
            "There is nothing to share yet.",
            "Tap \"Scan\" to capture some pages first.",
        ),

        DocScanError::PlatformUnavailable => HumanError::new(
            "Scanning isn't available on this device.",
            "Try again on a device with a camera.",
        ),

        DocScanError::PdfError(detail) => HumanError::new(
            "We couldn't build the PDF.",
            format!("{RESTART_HINT} ({detail})"),
        ),

        DocScanError::Bridge(detail) => HumanError::new(
            "We couldn't hand the PDF over.",
            format!("Choose another place to save it and try again. ({detail})"),
        ),

        DocScanError::Io(_) | DocScanError::Serialization(_) => {
            HumanError::new("Something went wrong.", format!("{RESTART_HINT} ({err})"))
        }
    }
}

/// Plain-English version of a capture source failure.
pub fn humanize_capture(err: &CaptureError) -> HumanError {
    match err {
        CaptureError::Unsupported => HumanError::new(
            "This device can't scan documents.",
            "Document scanning needs a camera that supports it.",
        ),
        CaptureError::Decode { index, .. } => HumanError::new(
            format!("Page {} couldn't be read.", index + 1),
            RESTART_HINT,
        ),
        CaptureError::Device(detail) => HumanError::new(
            "The scanner stopped unexpectedly.",
            format!("{RESTART_HINT} ({detail})"),
        ),
    }
}

/// Plain-English version of an assembly failure.
pub fn humanize_assembly(err: &AssemblyError) -> HumanError {
    match err {
        AssemblyError::PageEncodingFailed { index, .. } => HumanError::new(
            format!("Page {} couldn't be added to the PDF.", index + 1),
            RESTART_HINT,
        ),
    }
}
