// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan-document: Document processing for DocScan.
//
// Provides the page assembler (captured images to one multi-page PDF), a
// lopdf-based inspector for reopening the result, and decoding of image
// files handed over by file-based capture sources.

pub mod image;
pub mod pdf;

// Re-export the primary items so callers can use `docscan_document::PageAssembler` etc.
pub use self::image::decode::{decode_page, decode_page_file};
pub use pdf::assembler::PageAssembler;
pub use pdf::inspector::PdfInspector;
