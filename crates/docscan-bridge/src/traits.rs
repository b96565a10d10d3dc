// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use docscan_core::DocumentArtifact;
use docscan_core::error::Result;

use crate::completion::CaptureCompletion;

/// Unified bridge that groups the native capabilities DocScan needs.
pub trait PlatformBridge: CaptureSource + ExportSurface {
    /// Human-readable platform name (e.g. "iOS 17", "Desktop").
    fn platform_name(&self) -> &str;
}

/// A document scanner owned by the platform.
pub trait CaptureSource: Send + Sync {
    /// Begin a capture session.
    ///
    /// The source reports back through `completion`, either before this
    /// returns or later from a platform callback. An `Err` here means the
    /// session never started and `completion` will not be signalled.
    fn start_capture(&self, completion: CaptureCompletion) -> Result<()>;
}

/// The platform's share / save surface.
pub trait ExportSurface: Send + Sync {
    /// Offer `pdf` to the user under `suggested_name`. Returns once the
    /// surface has been presented; what the user does with it is not
    /// reported.
    fn export(&self, pdf: &DocumentArtifact, suggested_name: &str) -> Result<()>;
}
