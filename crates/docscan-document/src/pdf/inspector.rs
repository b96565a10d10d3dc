// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF inspector: reopen an assembled PDF with `lopdf` and report its page
// tree, so callers can check what actually landed on disk.

use std::path::Path;

use docscan_core::error::DocScanError;
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, instrument};

/// Read-only view over an existing PDF.
pub struct PdfInspector {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfInspector {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocScanError> {
        let path_ref = path.as_ref();
        let document = Document::load(path_ref).map_err(|err| {
            DocScanError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");
        Ok(Self { document })
    }

    /// Load a PDF already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, DocScanError> {
        let document = Document::load_mem(data).map_err(|err| {
            DocScanError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");
        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Width and height of every page in points, in page order.
    ///
    /// Sizes come from each page's `/MediaBox`, following `/Parent` links
    /// when the box is inherited from the page tree.
    pub fn page_sizes_pt(&self) -> Result<Vec<(f32, f32)>, DocScanError> {
        // lopdf keys pages by 1-indexed page number in a BTreeMap, so
        // iteration is already in page order.
        self.document
            .get_pages()
            .into_iter()
            .map(|(number, id)| {
                let media_box = self.media_box(id).ok_or_else(|| {
                    DocScanError::PdfError(format!("page {number} has no usable MediaBox"))
                })?;
                Ok((media_box[2] - media_box[0], media_box[3] - media_box[1]))
            })
            .collect()
    }

    fn media_box(&self, page_id: ObjectId) -> Option<[f32; 4]> {
        let mut dict = self.dictionary(page_id)?;
        // Bounded walk up the page tree.
        for _ in 0..32 {
            if let Ok(obj) = dict.get(b"MediaBox") {
                return self.rect(obj);
            }
            let parent = dict.get(b"Parent").ok()?.as_reference().ok()?;
            dict = self.dictionary(parent)?;
        }
        None
    }

    fn dictionary(&self, id: ObjectId) -> Option<&Dictionary> {
        self.document.get_object(id).ok()?.as_dict().ok()
    }

    fn rect(&self, obj: &Object) -> Option<[f32; 4]> {
        let obj = match obj {
            Object::Reference(id) => self.document.get_object(*id).ok()?,
            other => other,
        };
        let values = obj.as_array().ok()?;
        if values.len() != 4 {
            return None;
        }
        let mut rect = [0.0f32; 4];
        for (slot, value) in rect.iter_mut().zip(values) {
            *slot = number(value)?;
        }
        Some(rect)
    }
}

pub(crate) fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_a_pdf_error() {
        let err = PdfInspector::from_bytes(b"not a pdf").err().expect("must fail");
        assert!(matches!(err, DocScanError::PdfError(_)));
    }

    #[test]
    fn missing_file_is_a_pdf_error() {
        let err = PdfInspector::open("/definitely/not/here.pdf")
            .err()
            .expect("must fail");
        assert!(matches!(err, DocScanError::PdfError(_)));
    }

    #[test]
    fn number_accepts_integers_and_reals() {
        assert_eq!(number(&Object::Integer(612)), Some(612.0));
        assert_eq!(number(&Object::Real(595.5)), Some(595.5));
        assert_eq!(number(&Object::Null), None);
    }
}
