// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for DocScan.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pixel layout of a captured page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 8-bit grayscale.
    Luma8,
    /// 8-bit RGB, 3 bytes per pixel.
    Rgb8,
    /// 8-bit RGBA, 4 bytes per pixel. Alpha is dropped when encoding.
    Rgba8,
}

impl PixelFormat {
    /// Bytes per pixel.
    pub fn channels(&self) -> usize {
        match self {
            Self::Luma8 => 1,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

/// One captured page as handed over by a capture source.
///
/// The capture source is opaque, so nothing is checked here: a page whose
/// buffer does not match its dimensions is rejected when it is encoded.
/// Pixel data is shared, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Arc<[u8]>,
}

impl PageImage {
    pub fn new(width: u32, height: u32, format: PixelFormat, pixels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            format,
            pixels: pixels.into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Number of bytes the pixel buffer should hold for these dimensions,
    /// or `None` if that overflows.
    pub fn expected_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.format.channels())
    }
}

/// A finished multi-page PDF.
///
/// Immutable once built; assembling again produces a new artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentArtifact {
    bytes: Arc<[u8]>,
    page_count: usize,
    title: String,
}

impl DocumentArtifact {
    pub fn new(bytes: impl Into<Arc<[u8]>>, page_count: usize, title: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            page_count,
            title: title.into(),
        }
    }

    /// Serialised PDF bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

/// How captured pages are laid out in the PDF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLayout {
    /// Each PDF page is exactly the image size at 72 DPI.
    #[default]
    Native,
    /// Fixed paper size; the image is fitted inside the margins.
    Paper(PaperSize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_len_accounts_for_channels() {
        let page = PageImage::new(4, 3, PixelFormat::Rgb8, vec![0u8; 36]);
        assert_eq!(page.expected_len(), Some(36));

        let gray = PageImage::new(4, 3, PixelFormat::Luma8, vec![0u8; 12]);
        assert_eq!(gray.expected_len(), Some(12));
    }

    #[test]
    fn expected_len_overflow_is_none() {
        let page = PageImage::new(u32::MAX, u32::MAX, PixelFormat::Rgba8, Vec::new());
        assert!(page.expected_len().is_none());
    }

    #[test]
    fn cloned_artifact_shares_bytes() {
        let artifact = DocumentArtifact::new(vec![1u8, 2, 3], 1, "Scanned Document");
        let copy = artifact.clone();
        assert_eq!(copy.bytes().as_ptr(), artifact.bytes().as_ptr());
        assert_eq!(copy.page_count(), 1);
        assert!(!copy.is_empty());
    }
}
