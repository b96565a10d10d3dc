// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Decode encoded image files (JPEG, PNG, TIFF, BMP, ...) into RGB8 page
// images using the `image` crate.

use std::path::Path;

use docscan_core::error::CaptureError;
use docscan_core::{PageImage, PixelFormat};
use tracing::{debug, instrument};

/// Decode one captured page. `index` is the page's position in the scan and
/// is only used for error reporting.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_page(index: usize, data: &[u8]) -> Result<PageImage, CaptureError> {
    let dynamic = ::image::load_from_memory(data).map_err(|err| CaptureError::Decode {
        index,
        reason: err.to_string(),
    })?;

    let rgb = dynamic.to_rgb8();
    let (width, height) = rgb.dimensions();
    debug!(width, height, "Page decoded");

    Ok(PageImage::new(width, height, PixelFormat::Rgb8, rgb.into_raw()))
}

/// Read and decode a page from disk.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn decode_page_file(index: usize, path: impl AsRef<Path>) -> Result<PageImage, CaptureError> {
    let bytes = std::fs::read(path.as_ref()).map_err(|err| CaptureError::Decode {
        index,
        reason: format!("failed to read {}: {}", path.as_ref().display(), err),
    })?;
    decode_page(index, &bytes)
}
