// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for targets without a wired-up document camera.
//
// Every trait method returns `PlatformUnavailable`.

use docscan_core::DocumentArtifact;
use docscan_core::error::{DocScanError, Result};

use crate::completion::CaptureCompletion;
use crate::traits::*;

/// No-op bridge.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Unsupported (stub)"
    }
}

impl CaptureSource for StubBridge {
    fn start_capture(&self, _completion: CaptureCompletion) -> Result<()> {
        tracing::warn!("CaptureSource::start_capture called on stub bridge");
        Err(DocScanError::PlatformUnavailable)
    }
}

impl ExportSurface for StubBridge {
    fn export(&self, _pdf: &DocumentArtifact, _suggested_name: &str) -> Result<()> {
        tracing::warn!("ExportSurface::export called on stub bridge");
        Err(DocScanError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::capture_channel;

    #[test]
    fn stub_refuses_everything() {
        let (completion, _receiver) = capture_channel();
        assert!(matches!(
            StubBridge.start_capture(completion.clone()),
            Err(DocScanError::PlatformUnavailable)
        ));
        assert!(!completion.is_finished());

        let pdf = DocumentArtifact::new(Vec::new(), 0, "Scanned Document");
        assert!(matches!(
            StubBridge.export(&pdf, "Scanned Document.pdf"),
            Err(DocScanError::PlatformUnavailable)
        ));
    }
}
