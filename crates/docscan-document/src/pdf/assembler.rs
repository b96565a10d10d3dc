// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page assembler: turn an ordered run of captured pages into one PDF using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: every page is a `PdfPage` holding a
// `Vec<Op>`, images are registered once on the document as XObjects, and the
// whole document is serialised in one go via `PdfDocument::save()`.

use docscan_core::config::DEFAULT_DOCUMENT_TITLE;
use docscan_core::error::AssemblyError;
use docscan_core::{DocumentArtifact, PageImage, PageLayout, PixelFormat, ScanConfig};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectId, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

/// Margin around the image when laying out on fixed paper.
const PAPER_MARGIN_MM: f32 = 15.0;

/// Resolution assumed for scans placed on fixed paper.
const PAPER_DPI: f32 = 150.0;

/// Builds a multi-page PDF, one captured image per page.
///
/// Assembly is pure: nothing touches the filesystem and a failed page
/// leaves no partial document behind.
#[derive(Debug, Clone)]
pub struct PageAssembler {
    /// Page geometry.
    layout: PageLayout,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: String,
}

impl PageAssembler {
    pub fn new(layout: PageLayout, title: impl Into<String>) -> Self {
        Self {
            layout,
            title: title.into(),
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.page_layout, config.document_title.clone())
    }

    /// Encode `pages` in order into a single PDF.
    ///
    /// An empty slice yields a zero-page artifact. If any page cannot be
    /// encoded the first offending index is reported and no artifact is
    /// produced.
    #[instrument(skip_all, fields(pages = pages.len(), layout = ?self.layout))]
    pub fn assemble(&self, pages: &[PageImage]) -> Result<DocumentArtifact, AssemblyError> {
        let mut doc = PdfDocument::new(&self.title);
        let mut pdf_pages = Vec::with_capacity(pages.len());

        for (index, page) in pages.iter().enumerate() {
            let raw = encode_page(index, page)?;
            let xobject_id = doc.add_image(&raw);
            pdf_pages.push(self.place_image(xobject_id, page.width(), page.height()));
        }

        doc.with_pages(pdf_pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "printpdf reported warnings");
        }

        info!(
            pages = pages.len(),
            bytes = bytes.len(),
            title = %self.title,
            "Assembled scan PDF"
        );

        Ok(DocumentArtifact::new(bytes, pages.len(), self.title.clone()))
    }

    /// Build one page showing `xobject_id` according to the layout.
    fn place_image(&self, xobject_id: XObjectId, width_px: u32, height_px: u32) -> PdfPage {
        match self.layout {
            PageLayout::Native => {
                // One pixel per point: the page is the image.
                let page_w_pt = width_px as f32;
                let page_h_pt = height_px as f32;
                let ops = vec![Op::UseXobject {
                    id: xobject_id,
                    transform: XObjectTransform {
                        translate_x: Some(Pt(0.0)),
                        translate_y: Some(Pt(0.0)),
                        scale_x: Some(1.0),
                        scale_y: Some(1.0),
                        dpi: Some(72.0),
                        rotate: None,
                    },
                }];
                PdfPage::new(pt_to_mm(page_w_pt), pt_to_mm(page_h_pt), ops)
            }
            PageLayout::Paper(paper) => {
                let (w_mm, h_mm) = paper.dimensions_mm();
                let (page_w, page_h) = (Mm(w_mm as f32), Mm(h_mm as f32));

                let usable_w_pt = Mm(page_w.0 - 2.0 * PAPER_MARGIN_MM).into_pt().0;
                let usable_h_pt = Mm(page_h.0 - 2.0 * PAPER_MARGIN_MM).into_pt().0;

                let img_w_pt = width_px as f32 / PAPER_DPI * 72.0;
                let img_h_pt = height_px as f32 / PAPER_DPI * 72.0;

                // Fit inside the margins, keep the aspect ratio, never upscale.
                let scale = (usable_w_pt / img_w_pt).min(usable_h_pt / img_h_pt).min(1.0);
                let rendered_w_pt = img_w_pt * scale;
                let rendered_h_pt = img_h_pt * scale;

                let margin_pt = Mm(PAPER_MARGIN_MM).into_pt().0;
                let x_offset = margin_pt + (usable_w_pt - rendered_w_pt) / 2.0;
                let y_offset = margin_pt + (usable_h_pt - rendered_h_pt) / 2.0;

                debug!(rendered_w_pt, rendered_h_pt, scale, "Image placed on paper");

                let ops = vec![Op::UseXobject {
                    id: xobject_id,
                    transform: XObjectTransform {
                        translate_x: Some(Pt(x_offset)),
                        translate_y: Some(Pt(y_offset)),
                        scale_x: Some(scale),
                        scale_y: Some(scale),
                        dpi: Some(PAPER_DPI),
                        rotate: None,
                    },
                }];
                PdfPage::new(page_w, page_h, ops)
            }
        }
    }
}

impl Default for PageAssembler {
    fn default() -> Self {
        Self::new(PageLayout::Native, DEFAULT_DOCUMENT_TITLE)
    }
}

/// Validate one page and convert it to the RGB8 raw image printpdf embeds.
fn encode_page(index: usize, page: &PageImage) -> Result<RawImage, AssemblyError> {
    let fail = |reason: String| {
        warn!(index, %reason, "Page rejected");
        AssemblyError::PageEncodingFailed { index, reason }
    };

    if page.width() == 0 || page.height() == 0 {
        return Err(fail(format!(
            "degenerate dimensions {}x{}",
            page.width(),
            page.height()
        )));
    }

    let expected = page
        .expected_len()
        .ok_or_else(|| fail("dimensions overflow".into()))?;
    let pixels = page.pixels();
    if pixels.len() != expected {
        return Err(fail(format!(
            "pixel buffer holds {} bytes, expected {}",
            pixels.len(),
            expected
        )));
    }

    let rgb: Vec<u8> = match page.format() {
        PixelFormat::Rgb8 => pixels.to_vec(),
        PixelFormat::Luma8 => pixels.iter().flat_map(|&l| [l, l, l]).collect(),
        PixelFormat::Rgba8 => pixels
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect(),
    };

    Ok(RawImage {
        pixels: RawImageData::U8(rgb),
        width: page.width() as usize,
        height: page.height() as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    })
}

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::inspector::{PdfInspector, number};
    use docscan_core::PaperSize;

    fn solid_page(width: u32, height: u32, shade: u8) -> PageImage {
        let len = (width * height * 3) as usize;
        PageImage::new(width, height, PixelFormat::Rgb8, vec![shade; len])
    }

    #[test]
    fn page_count_matches_input() {
        let pages = vec![
            solid_page(40, 60, 10),
            solid_page(40, 60, 128),
            solid_page(40, 60, 250),
        ];
        let artifact = PageAssembler::default().assemble(&pages).expect("assemble");

        assert_eq!(artifact.page_count(), 3);
        assert_eq!(artifact.title(), DEFAULT_DOCUMENT_TITLE);
        assert!(artifact.bytes().starts_with(b"%PDF"));

        let inspector = PdfInspector::from_bytes(artifact.bytes()).expect("reopen");
        assert_eq!(inspector.page_count(), 3);
    }

    #[test]
    fn native_pages_keep_capture_order() {
        // Distinct widths make each page identifiable by its MediaBox.
        let widths = [30u32, 50, 70, 90];
        let pages: Vec<PageImage> = widths.iter().map(|&w| solid_page(w, 40, 200)).collect();

        let artifact = PageAssembler::default().assemble(&pages).expect("assemble");
        let sizes = PdfInspector::from_bytes(artifact.bytes())
            .expect("reopen")
            .page_sizes_pt()
            .expect("media boxes");

        assert_eq!(sizes.len(), widths.len());
        for (size, width) in sizes.iter().zip(widths) {
            assert!(
                (size.0 - width as f32).abs() < 0.5,
                "expected page width {width}, got {}",
                size.0
            );
            assert!((size.1 - 40.0).abs() < 0.5);
        }
    }

    #[test]
    fn paper_layout_uses_fixed_page_size() {
        let assembler = PageAssembler::new(PageLayout::Paper(PaperSize::A4), "Receipt");
        let artifact = assembler
            .assemble(&[solid_page(300, 100, 0), solid_page(100, 300, 0)])
            .expect("assemble");
        assert_eq!(artifact.title(), "Receipt");

        let sizes = PdfInspector::from_bytes(artifact.bytes())
            .expect("reopen")
            .page_sizes_pt()
            .expect("media boxes");
        let a4_w = Mm(210.0).into_pt().0;
        for (w, _) in sizes {
            assert!((w - a4_w).abs() < 0.5);
        }
    }

    /// The `cm` matrix that places the image on each page, in page order.
    fn image_matrices(bytes: &[u8]) -> Vec<[f32; 6]> {
        let doc = lopdf::Document::load_mem(bytes).expect("reopen");
        doc.get_pages()
            .values()
            .map(|&page_id| {
                let content = doc.get_and_decode_page_content(page_id).expect("content");
                let cm = content
                    .operations
                    .iter()
                    .rfind(|op| op.operator == "cm")
                    .expect("page has a placement matrix");
                let mut matrix = [0.0f32; 6];
                for (slot, operand) in matrix.iter_mut().zip(&cm.operands) {
                    *slot = number(operand).expect("numeric operand");
                }
                matrix
            })
            .collect()
    }

    fn assert_close(actual: f32, expected: f32, what: &str) {
        assert!(
            (actual - expected).abs() < 0.05,
            "{what}: expected {expected}, got {actual}"
        );
    }

    #[test]
    fn paper_layout_centres_small_scans_without_upscaling() {
        let assembler = PageAssembler::new(PageLayout::Paper(PaperSize::A4), "Receipt");
        // 150 px at 150 DPI is one inch.
        let artifact = assembler.assemble(&[solid_page(150, 150, 0)]).expect("assemble");

        let [a, b, c, d, e, f] = image_matrices(artifact.bytes())[0];
        assert_close(a, 72.0, "width");
        assert_close(d, 72.0, "height");
        assert_close(b, 0.0, "skew");
        assert_close(c, 0.0, "skew");

        let page_w = Mm(210.0).into_pt().0;
        let page_h = Mm(297.0).into_pt().0;
        assert_close(e, (page_w - 72.0) / 2.0, "x offset");
        assert_close(f, (page_h - 72.0) / 2.0, "y offset");
    }

    #[test]
    fn paper_layout_fits_large_scans_inside_margins() {
        let assembler = PageAssembler::new(PageLayout::Paper(PaperSize::A4), "Receipt");
        let artifact = assembler.assemble(&[solid_page(3000, 1000, 0)]).expect("assemble");

        let [a, _, _, d, e, f] = image_matrices(artifact.bytes())[0];
        let margin = Mm(PAPER_MARGIN_MM).into_pt().0;
        let usable_w = Mm(210.0 - 2.0 * PAPER_MARGIN_MM).into_pt().0;
        let usable_h = Mm(297.0 - 2.0 * PAPER_MARGIN_MM).into_pt().0;

        // Width-bound: fills the usable width, keeps the 3:1 aspect ratio.
        assert_close(a, usable_w, "width");
        assert_close(d, usable_w / 3.0, "height");
        assert_close(e, margin, "x offset");
        assert_close(f, margin + (usable_h - usable_w / 3.0) / 2.0, "y offset");
    }

    #[test]
    fn mixed_pixel_formats_are_accepted() {
        let pages = vec![
            PageImage::new(8, 8, PixelFormat::Luma8, vec![90u8; 64]),
            PageImage::new(8, 8, PixelFormat::Rgba8, vec![90u8; 256]),
            solid_page(8, 8, 90),
        ];
        let artifact = PageAssembler::default().assemble(&pages).expect("assemble");
        assert_eq!(artifact.page_count(), 3);
    }

    #[test]
    fn empty_input_gives_empty_artifact() {
        let artifact = PageAssembler::default().assemble(&[]).expect("assemble");
        assert_eq!(artifact.page_count(), 0);
        assert!(artifact.is_empty());
    }

    #[test]
    fn bad_page_fails_whole_assembly() {
        let pages = vec![
            solid_page(10, 10, 0),
            PageImage::new(10, 10, PixelFormat::Rgb8, vec![0u8; 7]),
            PageImage::new(0, 10, PixelFormat::Rgb8, Vec::new()),
        ];
        let assembler = PageAssembler::default();

        let first = assembler.assemble(&pages).unwrap_err();
        let AssemblyError::PageEncodingFailed { index, .. } = &first;
        assert_eq!(*index, 1, "first bad page is reported");

        // Same input, same failure.
        assert_eq!(assembler.assemble(&pages).unwrap_err(), first);
    }

    #[test]
    fn zero_sized_page_is_rejected() {
        let err = PageAssembler::default()
            .assemble(&[PageImage::new(0, 0, PixelFormat::Luma8, Vec::new())])
            .unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::PageEncodingFailed { index: 0, .. }
        ));
    }
}
