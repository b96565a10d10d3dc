// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: assembling scans into a PDF and inspecting the result.

pub mod assembler;
pub mod inspector;

pub use assembler::PageAssembler;
pub use inspector::PdfInspector;
