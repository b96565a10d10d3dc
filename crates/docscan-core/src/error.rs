// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for DocScan.

use std::path::PathBuf;

use thiserror::Error;

/// A page could not be turned into a PDF page. Assembly is all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("page {index} could not be encoded: {reason}")]
    PageEncodingFailed { index: usize, reason: String },
}

/// Failure reported by a capture source. Passed through to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("capture device error: {0}")]
    Device(String),

    #[error("captured page {index} could not be decoded: {reason}")]
    Decode { index: usize, reason: String },

    #[error("document capture is not supported on this device")]
    Unsupported,
}

/// Temporary artifact storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no artifact to delete{}", path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    NotFound { path: Option<PathBuf> },

    #[error("failed to remove {}: {source}", path.display())]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preferences error: {0}")]
    Preferences(String),
}

/// Requests the session state machine refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a scan is already in progress")]
    ScanInProgress,

    #[error("this scan session has already finished")]
    SessionFinished,

    #[error("there is no scanned document to export")]
    NothingToExport,
}

/// Top-level error type for all DocScan operations.
#[derive(Debug, Error)]
pub enum DocScanError {
    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_includes_path_when_known() {
        let err = StoreError::NotFound {
            path: Some(PathBuf::from("/tmp/x.pdf")),
        };
        assert_eq!(err.to_string(), "no artifact to delete at /tmp/x.pdf");

        let err = StoreError::NotFound { path: None };
        assert_eq!(err.to_string(), "no artifact to delete");
    }

    #[test]
    fn assembly_error_converts_transparently() {
        let err: DocScanError = AssemblyError::PageEncodingFailed {
            index: 2,
            reason: "empty pixel buffer".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "page 2 could not be encoded: empty pixel buffer"
        );
    }
}
