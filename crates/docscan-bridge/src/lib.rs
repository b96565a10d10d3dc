// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DocScan: platform bridge abstractions.
//
// The capture source and the export surface are owned by the host platform.
// This crate defines the traits the rest of DocScan talks to, the one-shot
// completion channel a capture session reports through, and the platform
// dispatch that picks an implementation at compile time.

pub mod completion;
pub mod stub;
pub mod traits;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod desktop;

pub use completion::{CaptureCompletion, CaptureOutcome, CaptureReceiver, capture_channel};
pub use traits::{CaptureSource, ExportSurface, PlatformBridge};

/// Returns the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn PlatformBridge> {
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        // Desktop: file dialogs stand in for the camera and the share sheet.
        Box::new(desktop::DesktopBridge::new())
    }
    #[cfg(any(target_os = "ios", target_os = "android"))]
    {
        Box::new(stub::StubBridge)
    }
}
